//! Topic provisioning.

use crate::client::client_config;
use crate::error::KafkaPipelineError;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::types::RDKafkaErrorCode;
use retail_types::KafkaSettings;
use std::time::Duration;
use tracing::info;

/// Create the basket and payment topics.
///
/// Topics that already exist count as success, so this is safe to run
/// against a cluster provisioned by an earlier run.
pub async fn create_topics(
    settings: &KafkaSettings,
    timeout: Duration,
) -> Result<(), KafkaPipelineError> {
    let admin_client: AdminClient<DefaultClientContext> =
        client_config(settings).create().map_err(KafkaPipelineError::Kafka)?;

    let topics = [&settings.basket_topic, &settings.payment_topic].map(|name| {
        NewTopic::new(
            name,
            settings.num_partitions,
            TopicReplication::Fixed(settings.replication_factor),
        )
    });
    let opts = AdminOptions::new().operation_timeout(Some(timeout));

    let results = admin_client
        .create_topics(&topics, &opts)
        .await
        .map_err(|e| KafkaPipelineError::TopicCreation(format!("Failed to create topics: {e}")))?;

    for result in results {
        match result {
            Ok(topic_name) => {
                info!(
                    "Topic '{}' created with {} partition(s), replication factor {}",
                    topic_name, settings.num_partitions, settings.replication_factor
                );
            }
            Err((topic_name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                info!("Topic '{}' already exists", topic_name);
            }
            Err((topic_name, err)) => {
                return Err(KafkaPipelineError::TopicCreation(format!(
                    "Failed to create topic {topic_name}: {err}"
                )));
            }
        }
    }

    Ok(())
}
