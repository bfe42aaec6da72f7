//! Document sink abstraction for retail-loadgen.
//!
//! This crate defines the `DocumentSink` trait that every output of the
//! generator implements. The run loop hands each generated document to every
//! active sink; zero, one or several sinks may be active in a run.
//!
//! - [`FileSink`] appends pretty-printed documents to a pair of run files
//! - `retail_kafka::BrokerSink` publishes documents to a topic pair
//!
//! Sinks work on the [`Document`] tagged variant so that a single
//! implementation can route baskets and payments differently.

mod document;
mod error;
mod file;
mod traits;

pub use document::{Document, DocumentKind};
pub use error::SinkError;
pub use file::FileSink;
pub use traits::DocumentSink;
