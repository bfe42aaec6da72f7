//! Broker sink: routes documents to their topic and partition key.

use crate::client::BrokerClient;
use crate::delivery::DeliveryStats;
use crate::pipeline::PublishPipeline;
use async_trait::async_trait;
use retail_sink::{Document, DocumentSink, SinkError};
use retail_types::KafkaSettings;
use tracing::info;

/// Topic and key selection for each document kind.
///
/// Baskets are keyed by store name so a store's sales share a partition.
/// Payments all carry the same configured key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRouting {
    pub basket_topic: String,
    pub payment_topic: String,
    pub payment_key: String,
}

impl TopicRouting {
    pub fn from_settings(settings: &KafkaSettings) -> Self {
        Self {
            basket_topic: settings.basket_topic.clone(),
            payment_topic: settings.payment_topic.clone(),
            payment_key: settings.payment_key.clone(),
        }
    }

    /// Topic and partition key for `document`.
    pub fn route<'r>(&'r self, document: Document<'r>) -> (&'r str, &'r [u8]) {
        match document {
            Document::Basket(basket) => (&self.basket_topic, basket.store.name.as_bytes()),
            Document::Payment(_) => (&self.payment_topic, self.payment_key.as_bytes()),
        }
    }
}

pub struct BrokerSink<C: BrokerClient> {
    pipeline: PublishPipeline<C>,
    routing: TopicRouting,
    delivery: Option<DeliveryStats>,
}

impl<C: BrokerClient> BrokerSink<C> {
    pub fn new(pipeline: PublishPipeline<C>, routing: TopicRouting) -> Self {
        Self {
            pipeline,
            routing,
            delivery: None,
        }
    }

    pub fn pipeline(&self) -> &PublishPipeline<C> {
        &self.pipeline
    }

    /// Delivery counts, available once the sink is closed.
    pub fn delivery_stats(&self) -> Option<DeliveryStats> {
        self.delivery
    }
}

#[async_trait]
impl<C: BrokerClient> DocumentSink for BrokerSink<C> {
    fn name(&self) -> &'static str {
        "kafka"
    }

    async fn accept(&mut self, document: Document<'_>) -> Result<(), SinkError> {
        let (topic, key) = self.routing.route(document);
        self.pipeline.publish(&document, topic, key)?;
        self.pipeline.maybe_flush();
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        if self.delivery.is_some() {
            return Ok(());
        }

        let delivery = self.pipeline.shutdown().await?;
        let publish = self.pipeline.stats();
        info!(
            "Kafka sink closed: {} submitted, {} rejected, {} flush(es) ({} incomplete), {} delivered, {} failed",
            publish.submitted,
            publish.rejected,
            publish.flushes,
            publish.incomplete_flushes,
            delivery.delivered,
            delivery.failed
        );
        self.delivery = Some(delivery);
        Ok(())
    }
}
