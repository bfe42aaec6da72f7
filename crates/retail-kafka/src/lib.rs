//! Kafka publishing for the retail-loadgen framework.
//!
//! This crate turns every generated document into a tracked, non-blocking
//! send. The `PublishPipeline` counts sends since the last flush and forces a
//! bounded flush every `flushInterval` sends; a single background listener
//! drains delivery reports for the lifetime of the pipeline.
//!
//! # Architecture
//!
//! ```text
//!   run loop
//!      │ accept(Document)
//!      ▼
//! ┌────────────┐   publish(doc, topic, key)   ┌────────────────┐
//! │ BrokerSink │ ───────────────────────────► │ PublishPipeline│
//! └────────────┘                              │                │
//!                                             │ - pending      │
//!                                             │ - maybe_flush  │
//!                                             └───────┬────────┘
//!                                                     │ send / flush
//!                                                     ▼
//!                                             ┌────────────────┐
//!                                             │  BrokerClient  │
//!                                             │ (KafkaClient)  │
//!                                             └───────┬────────┘
//!                                                     │ delivery reports
//!                                                     ▼
//!                                          DeliveryEvent channel
//!                                                     │
//!                                                     ▼
//!                                          delivery listener task
//!                                          (stops on CancellationToken)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use retail_kafka::{BrokerSink, KafkaClient, PublishPipeline, TopicRouting};
//!
//! let (client, events) = KafkaClient::new(&settings)?;
//! let pipeline = PublishPipeline::start(
//!     client,
//!     events,
//!     settings.flush_interval,
//!     settings.flush_timeout(),
//! );
//! let mut sink = BrokerSink::new(pipeline, TopicRouting::from_settings(&settings));
//!
//! sink.accept(Document::Basket(&basket)).await?;
//! sink.close().await?;
//! ```

pub mod admin;
pub mod client;
pub mod delivery;
pub mod error;
pub mod pipeline;
pub mod sink;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use admin::create_topics;
pub use client::{client_config, BrokerClient, DeliveryReporter, KafkaClient};
pub use delivery::{spawn_listener, DeliveryEvent, DeliveryStats};
pub use error::KafkaPipelineError;
pub use pipeline::{FlushOutcome, PublishPipeline, PublishStats};
pub use sink::{BrokerSink, TopicRouting};
