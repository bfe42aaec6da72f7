//! Error types for the Kafka publish pipeline.

use retail_sink::SinkError;
use thiserror::Error;

/// Errors that can occur while publishing to Kafka.
#[derive(Error, Debug)]
pub enum KafkaPipelineError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Send rejected: {0}")]
    Submit(String),

    #[error("Topic creation error: {0}")]
    TopicCreation(String),

    #[error("Delivery listener failed: {0}")]
    Listener(String),
}

impl From<KafkaPipelineError> for SinkError {
    fn from(err: KafkaPipelineError) -> Self {
        match err {
            KafkaPipelineError::Serialization(e) => SinkError::Serialization(e),
            other => SinkError::Submit(other.to_string()),
        }
    }
}
