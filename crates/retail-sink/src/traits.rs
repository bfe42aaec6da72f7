//! DocumentSink trait definition.

use crate::document::Document;
use crate::error::SinkError;

/// Trait for persisting or transmitting generated documents.
///
/// # Usage Pattern
///
/// The run loop owns a list of boxed sinks and offers every document to each
/// of them in turn:
///
/// ```ignore
/// for sink in sinks.iter_mut() {
///     if let Err(e) = sink.accept(Document::Basket(&basket)).await {
///         tracing::error!("{} sink skipped basket: {e}", sink.name());
///     }
/// }
/// ```
///
/// `close` is called exactly once when the run ends, after the last
/// document, and releases whatever handles the sink holds.
#[async_trait::async_trait]
pub trait DocumentSink: Send {
    /// Short name used in logs and run metrics.
    fn name(&self) -> &'static str;

    /// Persist or transmit one document.
    async fn accept(&mut self, document: Document<'_>) -> Result<(), SinkError>;

    /// Flush and release resources at the end of the run.
    async fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
