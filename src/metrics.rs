//! Run metrics and the end-of-run summary.

use chrono::{DateTime, Local};
use retail_sink::DocumentKind;
use std::time::Duration;
use tracing::info;

/// Per-sink document counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCounts {
    pub name: &'static str,
    pub baskets: u64,
    pub payments: u64,
    pub skipped: u64,
}

impl SinkCounts {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            baskets: 0,
            payments: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, kind: DocumentKind) {
        match kind {
            DocumentKind::Basket => self.baskets += 1,
            DocumentKind::Payment => self.payments += 1,
        }
    }
}

/// Metrics from a run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Number of basket/payment pairs generated.
    pub records: u64,
    pub total_duration: Duration,
    /// Time spent in throttle pauses.
    pub paused: Duration,
    /// Longest single record, pauses included.
    pub slowest_record: Duration,
    pub sinks: Vec<SinkCounts>,
    /// Whether the run stopped on a cancellation rather than reaching its size.
    pub interrupted: bool,
}

impl RunMetrics {
    pub fn new(sink_names: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            records: 0,
            total_duration: Duration::ZERO,
            paused: Duration::ZERO,
            slowest_record: Duration::ZERO,
            sinks: sink_names.into_iter().map(SinkCounts::new).collect(),
            interrupted: false,
        }
    }

    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Account for one finished record.
    pub fn record_time(&mut self, elapsed: Duration, paused: Duration) {
        self.paused += paused;
        self.slowest_record = self.slowest_record.max(elapsed);
    }

    pub fn skipped(&self) -> u64 {
        self.sinks.iter().map(|s| s.skipped).sum()
    }

    pub fn log_summary(&self) {
        let finished_at = self.finished_at.unwrap_or_else(Local::now);
        info!(
            "Run {}: {} record(s) in {:.3}s ({:.2} records/sec)",
            if self.interrupted { "interrupted" } else { "complete" },
            self.records,
            self.total_duration.as_secs_f64(),
            self.records_per_second()
        );
        info!(
            "Started {}, finished {}",
            self.started_at.format("%Y-%m-%dT%H:%M:%S%.3f"),
            finished_at.format("%Y-%m-%dT%H:%M:%S%.3f")
        );
        info!(
            "Paused {:.3}s in total, slowest record took {:?}",
            self.paused.as_secs_f64(),
            self.slowest_record
        );
        for sink in &self.sinks {
            info!(
                "Sink '{}': {} basket(s), {} payment(s), {} skipped",
                sink.name, sink.baskets, sink.payments, sink.skipped
            );
        }
        if self.sinks.is_empty() {
            info!("No sinks active, documents were generated and discarded");
        }
    }
}
