//! Retail load generator.
//!
//! Produces correlated basket and payment documents at a throttled rate and
//! delivers them to run-scoped files and/or a pair of Kafka topics.
//!
//! # Crates
//!
//! - `retail_types` - Catalog, document and configuration types
//! - `retail_generator` - Deterministic basket/payment generation
//! - `retail_sink` - `DocumentSink` trait and the file sink
//! - `retail_kafka` - Publish pipeline, delivery listener and broker sink
//!
//! # CLI Usage
//!
//! ```bash
//! # Run with the configuration in dev_app.json
//! retail-loadgen
//!
//! # Reproducible 1000-record run without touching topic provisioning
//! retail-loadgen --config app.yaml --seed 42 --test-size 1000 --skip-topic-creation
//! ```

pub mod config;
pub mod logging;
pub mod metrics;
pub mod run;
pub mod throttle;

pub use config::{load_catalog, load_config, Overrides};
pub use metrics::{RunMetrics, SinkCounts};
pub use run::RunLoop;
pub use throttle::Throttle;
