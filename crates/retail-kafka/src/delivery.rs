//! Delivery report listener.
//!
//! One task per pipeline consumes the delivery report channel until the
//! pipeline cancels it, then drains whatever is already buffered.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

/// Outcome of a single send, as reported by the broker client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryEvent {
    Delivered {
        topic: String,
        partition: i32,
        offset: i64,
    },
    Failed {
        topic: String,
        reason: String,
    },
}

/// Counts of delivery reports seen by the listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
}

impl DeliveryStats {
    fn record(&mut self, event: &DeliveryEvent) {
        match event {
            DeliveryEvent::Delivered {
                topic,
                partition,
                offset,
            } => {
                self.delivered += 1;
                trace!(
                    "Message delivered to topic '{}' (partition {} at offset {})",
                    topic,
                    partition,
                    offset
                );
            }
            DeliveryEvent::Failed { topic, reason } => {
                self.failed += 1;
                error!("Failed to deliver message to topic '{}': {}", topic, reason);
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.delivered + self.failed
    }
}

/// Spawn the listener task.
///
/// The task returns its counts when `shutdown` is cancelled or when every
/// sender is dropped. Events already queued at that moment are still counted.
pub fn spawn_listener(
    mut events: mpsc::UnboundedReceiver<DeliveryEvent>,
    shutdown: CancellationToken,
) -> JoinHandle<DeliveryStats> {
    tokio::spawn(async move {
        let mut stats = DeliveryStats::default();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => stats.record(&event),
                    None => break,
                },
            }
        }

        while let Ok(event) = events.try_recv() {
            stats.record(&event);
        }

        debug!(
            "Delivery listener stopped: {} delivered, {} failed",
            stats.delivered, stats.failed
        );
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivered(offset: i64) -> DeliveryEvent {
        DeliveryEvent::Delivered {
            topic: "baskets".to_string(),
            partition: 0,
            offset,
        }
    }

    #[tokio::test]
    async fn test_counts_events_until_cancelled() {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let handle = spawn_listener(rx, token.clone());

        tx.send(delivered(0)).unwrap();
        tx.send(delivered(1)).unwrap();
        tx.send(DeliveryEvent::Failed {
            topic: "payments".to_string(),
            reason: "Message timed out".to_string(),
        })
        .unwrap();

        token.cancel();
        let stats = handle.await.unwrap();
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total(), 3);
    }

    #[tokio::test]
    async fn test_drains_buffered_events_after_cancel() {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        token.cancel();

        for offset in 0..50 {
            tx.send(delivered(offset)).unwrap();
        }

        let stats = spawn_listener(rx, token).await.unwrap();
        assert_eq!(stats.delivered, 50);
    }

    #[tokio::test]
    async fn test_stops_when_senders_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_listener(rx, CancellationToken::new());

        tx.send(delivered(7)).unwrap();
        drop(tx);

        let stats = handle.await.unwrap();
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_idle_listener_stops_on_cancel() {
        let (_tx, rx) = mpsc::unbounded_channel::<DeliveryEvent>();
        let token = CancellationToken::new();
        let handle = spawn_listener(rx, token.clone());

        token.cancel();
        assert_eq!(handle.await.unwrap(), DeliveryStats::default());
    }
}
