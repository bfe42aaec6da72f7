//! Broker client seam and the rdkafka-backed implementation.

use crate::delivery::DeliveryEvent;
use crate::error::KafkaPipelineError;
use rdkafka::client::ClientContext;
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use rdkafka::producer::{BaseRecord, DeliveryResult, Producer, ProducerContext, ThreadedProducer};
use rdkafka::ClientConfig;
use retail_types::KafkaSettings;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Minimal producer surface used by the publish pipeline.
///
/// `send` only enqueues a message; the outcome arrives later as a
/// [`DeliveryEvent`] on the channel handed out when the client is built.
pub trait BrokerClient: Send + 'static {
    /// Enqueue one message. An error means the client refused it outright.
    fn send(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<(), KafkaPipelineError>;

    /// Wait up to `timeout` for every enqueued message to be acknowledged.
    fn flush(&self, timeout: Duration) -> Result<(), KafkaPipelineError>;

    /// Messages enqueued but not yet acknowledged.
    fn in_flight_count(&self) -> usize;
}

/// Build the client configuration shared by the producer and the admin client.
pub fn client_config(settings: &KafkaSettings) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", &settings.bootstrap_servers)
        .set("broker.version.fallback", "0.10.0.0")
        .set("api.version.fallback.ms", "0");

    if let Some(client_id) = &settings.client_id {
        config.set("client.id", client_id);
    }

    if let Some(sasl) = settings.sasl.as_ref().filter(|s| !s.mechanisms.is_empty()) {
        config
            .set("security.protocol", &sasl.security_protocol)
            .set("sasl.mechanisms", &sasl.mechanisms)
            .set("sasl.username", &sasl.username)
            .set("sasl.password", &sasl.password);
    }

    config
}

/// Producer context that forwards every delivery report to the listener.
pub struct DeliveryReporter {
    events: mpsc::UnboundedSender<DeliveryEvent>,
}

impl DeliveryReporter {
    pub fn new(events: mpsc::UnboundedSender<DeliveryEvent>) -> Self {
        Self { events }
    }
}

impl ClientContext for DeliveryReporter {
    fn error(&self, error: KafkaError, reason: &str) {
        error!("Kafka client error: {}: {}", error, reason);
    }
}

impl ProducerContext for DeliveryReporter {
    type DeliveryOpaque = ();

    fn delivery(&self, result: &DeliveryResult<'_>, _opaque: Self::DeliveryOpaque) {
        let event = match result {
            Ok(message) => DeliveryEvent::Delivered {
                topic: message.topic().to_string(),
                partition: message.partition(),
                offset: message.offset(),
            },
            Err((err, message)) => DeliveryEvent::Failed {
                topic: message.topic().to_string(),
                reason: err.to_string(),
            },
        };

        // The listener is gone once the pipeline shut down; late reports are dropped.
        if self.events.send(event).is_err() {
            debug!("Delivery report arrived after the listener stopped");
        }
    }
}

/// Kafka producer client.
///
/// Wraps a `ThreadedProducer` whose background thread polls for delivery
/// reports, so sends never block the run loop.
pub struct KafkaClient {
    producer: ThreadedProducer<DeliveryReporter>,
}

impl KafkaClient {
    /// Create the producer and the receiving end of its delivery report channel.
    pub fn new(
        settings: &KafkaSettings,
    ) -> Result<(Self, mpsc::UnboundedReceiver<DeliveryEvent>), KafkaPipelineError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let producer: ThreadedProducer<DeliveryReporter> = client_config(settings)
            .set("message.timeout.ms", "30000")
            .create_with_context(DeliveryReporter::new(tx))?;

        debug!(
            "Created Kafka producer for {}",
            settings.bootstrap_servers
        );

        Ok((Self { producer }, rx))
    }
}

impl BrokerClient for KafkaClient {
    fn send(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<(), KafkaPipelineError> {
        let record: BaseRecord<'_, [u8], [u8]> = BaseRecord::to(topic).key(key).payload(payload);
        self.producer
            .send(record)
            .map_err(|(err, _)| KafkaPipelineError::Submit(err.to_string()))
    }

    fn flush(&self, timeout: Duration) -> Result<(), KafkaPipelineError> {
        self.producer.flush(timeout)?;
        Ok(())
    }

    fn in_flight_count(&self) -> usize {
        self.producer.in_flight_count().max(0) as usize
    }
}
