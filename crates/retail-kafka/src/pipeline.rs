//! Throttled publish pipeline.
//!
//! Sends are fire-and-forget; the pipeline counts how many went out since the
//! last flush and forces a bounded flush once that count reaches the
//! configured interval.

use crate::client::BrokerClient;
use crate::delivery::{spawn_listener, DeliveryEvent, DeliveryStats};
use crate::error::KafkaPipelineError;
use serde::Serialize;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of a flush attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Complete,
    Incomplete { remaining: usize },
}

/// Counters kept by the pipeline itself, independent of delivery reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishStats {
    pub submitted: u64,
    pub rejected: u64,
    pub flushes: u64,
    pub incomplete_flushes: u64,
}

pub struct PublishPipeline<C: BrokerClient> {
    client: C,
    flush_interval: u64,
    flush_timeout: Duration,
    pending_since_flush: u64,
    stats: PublishStats,
    shutdown: CancellationToken,
    listener: Option<JoinHandle<DeliveryStats>>,
}

impl<C: BrokerClient> PublishPipeline<C> {
    /// Start the pipeline and its delivery listener.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        client: C,
        events: mpsc::UnboundedReceiver<DeliveryEvent>,
        flush_interval: u64,
        flush_timeout: Duration,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let listener = spawn_listener(events, shutdown.clone());

        Self {
            client,
            flush_interval: flush_interval.max(1),
            flush_timeout,
            pending_since_flush: 0,
            stats: PublishStats::default(),
            shutdown,
            listener: Some(listener),
        }
    }

    /// Serialize `document` and hand it to the client.
    ///
    /// Only accepted sends count towards the flush interval.
    pub fn publish<T: Serialize + ?Sized>(
        &mut self,
        document: &T,
        topic: &str,
        key: &[u8],
    ) -> Result<(), KafkaPipelineError> {
        let payload = serde_json::to_vec(document)?;

        if let Err(e) = self.client.send(topic, key, &payload) {
            self.stats.rejected += 1;
            return Err(e);
        }

        self.stats.submitted += 1;
        self.pending_since_flush += 1;
        Ok(())
    }

    /// Flush if at least `flush_interval` sends happened since the last flush.
    ///
    /// The pending count resets whether or not the flush completed.
    pub fn maybe_flush(&mut self) -> Option<FlushOutcome> {
        if self.pending_since_flush < self.flush_interval {
            return None;
        }
        let outcome = self.flush();
        self.pending_since_flush = 0;
        Some(outcome)
    }

    fn flush(&mut self) -> FlushOutcome {
        self.stats.flushes += 1;
        let client = &self.client;
        let timeout = self.flush_timeout;
        match run_blocking(|| client.flush(timeout)) {
            Ok(()) => {
                debug!(
                    "Flushed {} message(s) within {:?}",
                    self.pending_since_flush, self.flush_timeout
                );
                FlushOutcome::Complete
            }
            Err(e) => {
                self.stats.incomplete_flushes += 1;
                let remaining = self.client.in_flight_count();
                warn!(
                    "Failed to flush all messages after {:?} ({}): {} message(s) remain",
                    self.flush_timeout, e, remaining
                );
                FlushOutcome::Incomplete { remaining }
            }
        }
    }

    pub fn pending_since_flush(&self) -> u64 {
        self.pending_since_flush
    }

    pub fn flush_interval(&self) -> u64 {
        self.flush_interval
    }

    pub fn stats(&self) -> PublishStats {
        self.stats
    }

    /// Final bounded flush, then stop the listener and collect its counts.
    ///
    /// Calling this more than once returns empty counts after the first call.
    pub async fn shutdown(&mut self) -> Result<DeliveryStats, KafkaPipelineError> {
        let Some(listener) = self.listener.take() else {
            return Ok(DeliveryStats::default());
        };

        self.flush();
        self.pending_since_flush = 0;
        self.shutdown.cancel();

        listener
            .await
            .map_err(|e| KafkaPipelineError::Listener(e.to_string()))
    }
}

/// Run a blocking client call without stalling the other tasks on this worker.
///
/// `block_in_place` is only available on the multi-threaded runtime; anywhere
/// else the call runs inline.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

impl<C: BrokerClient> Drop for PublishPipeline<C> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
