//! The record loop.
//!
//! Each iteration generates one basket/payment pair and dispatches it:
//! basket to every sink, pause, payment to every sink, pause. The loop ends
//! after `testSize` records or when the cancellation token fires, then
//! closes every sink.

use crate::metrics::RunMetrics;
use crate::throttle::Throttle;
use retail_generator::{DocumentGenerator, GeneratorError};
use retail_sink::{Document, DocumentSink};
use retail_types::{RunConfig, SeedCatalog};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, enabled, error, info, trace, Level};

pub struct RunLoop<'a> {
    generator: DocumentGenerator<'a>,
    sinks: Vec<Box<dyn DocumentSink>>,
    throttle: Throttle,
    test_size: u64,
    cancel: CancellationToken,
    metrics: RunMetrics,
}

impl<'a> RunLoop<'a> {
    pub fn new(
        catalog: &'a SeedCatalog,
        config: &'a RunConfig,
        seed: u64,
        sinks: Vec<Box<dyn DocumentSink>>,
        cancel: CancellationToken,
    ) -> Self {
        let metrics = RunMetrics::new(sinks.iter().map(|s| s.name()));
        Self {
            generator: DocumentGenerator::new(catalog, config, seed),
            sinks,
            throttle: Throttle::new(config.sleep_max_millis, seed),
            test_size: config.effective_test_size(),
            cancel,
            metrics,
        }
    }

    pub fn records(&self) -> u64 {
        self.metrics.records
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn is_done(&self) -> bool {
        self.metrics.records >= self.test_size || self.cancel.is_cancelled()
    }

    /// Generate one pair and hand both documents to every sink.
    ///
    /// Sink failures are logged and counted; only generation errors abort.
    pub async fn step(&mut self) -> Result<(), GeneratorError> {
        let started = Instant::now();
        let (basket, payment) = self.generator.next_pair()?;
        self.metrics.records += 1;

        self.dispatch(Document::Basket(&basket)).await;
        // The payment still goes out if cancelled here, so every basket has one.
        let mut paused = self.throttle.pause(&self.cancel).await.unwrap_or_default();
        self.dispatch(Document::Payment(&payment)).await;
        paused += self.throttle.pause(&self.cancel).await.unwrap_or_default();

        let elapsed = started.elapsed();
        debug!(
            "Record {} took {:?} ({:?} paused)",
            self.metrics.records, elapsed, paused
        );
        self.metrics.record_time(elapsed, paused);

        Ok(())
    }

    async fn dispatch(&mut self, document: Document<'_>) {
        if enabled!(Level::TRACE) {
            if let Ok(rendered) = document.to_pretty_json() {
                trace!("{}:\n{}", document.kind(), rendered);
            }
        }

        for (sink, counts) in self.sinks.iter_mut().zip(self.metrics.sinks.iter_mut()) {
            match sink.accept(document).await {
                Ok(()) => counts.record(document.kind()),
                Err(e) => {
                    counts.skipped += 1;
                    error!(
                        "Sink '{}' skipped {} {}: {}",
                        sink.name(),
                        document.kind(),
                        document.invoice_number(),
                        e
                    );
                }
            }
        }
    }

    /// Run until done, then close every sink.
    pub async fn run(mut self) -> Result<RunMetrics, GeneratorError> {
        if self.test_size == retail_types::config::UNBOUNDED_TEST_SIZE {
            info!("Generating records until interrupted");
        } else {
            info!("Generating {} record(s)", self.test_size);
        }

        let start = Instant::now();
        let mut outcome = Ok(());
        while !self.is_done() {
            if let Err(e) = self.step().await {
                outcome = Err(e);
                break;
            }
        }

        self.close_sinks().await;
        self.metrics.total_duration = start.elapsed();
        self.metrics.finished_at = Some(chrono::Local::now());
        self.metrics.interrupted = self.cancel.is_cancelled();

        outcome.map(|()| self.metrics)
    }

    async fn close_sinks(&mut self) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.close().await {
                error!("Failed to close sink '{}': {}", sink.name(), e);
            }
        }
    }
}
