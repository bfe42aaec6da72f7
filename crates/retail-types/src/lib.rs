//! Core types for the retail-loadgen framework.
//!
//! This crate provides the foundational types shared by the generator, the
//! sinks and the CLI:
//!
//! - [`SeedCatalog`] - Stores, clerks and products sampled to build documents
//! - [`Basket`] / [`Payment`] - The correlated pair of generated documents
//! - [`RunConfig`] - Run configuration loaded from JSON or YAML
//! - [`round2`] - Half-away-from-zero rounding to two decimal places
//!
//! # Architecture
//!
//! ```text
//! retail-types (this crate)
//!    │
//!    ├─── retail-generator  (builds Basket/Payment pairs from a SeedCatalog)
//!    │
//!    ├─── retail-sink       (DocumentSink trait, FileSink)
//!    │
//!    └─── retail-kafka      (PublishPipeline, BrokerSink)
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod duration;
pub mod money;

mod format;

// Re-exports for convenience
pub use catalog::{Address, CatalogError, Clerk, Product, SeedCatalog, Store};
pub use config::{ConfigError, KafkaSettings, RunConfig, SaslSettings};
pub use document::{Basket, BasketItem, Payment};
pub use duration::parse_duration;
pub use money::round2;
