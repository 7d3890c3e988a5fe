//! Kafka-backed implementations of the broker interfaces.
//!
//! Transport security is always enabled: the client authenticates over SSL,
//! or SASL_SSL when SASL credentials are configured. There is no plaintext
//! fallback.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::{
    ClientConfig,
    admin::{AdminClient, AdminOptions, NewTopic, TopicReplication},
    client::DefaultClientContext,
    error::{KafkaError, RDKafkaErrorCode},
    producer::{FutureProducer, FutureRecord, Producer},
};
use tokio::sync::Mutex;

use super::{BrokerAdmin, BrokerError, BrokerProducer, TopicCreation};
use crate::{config::AppConfig, models::TopicSpec};

/// Builds the client configuration shared by the admin and producer sides.
fn base_client_config(config: &AppConfig) -> ClientConfig {
    let mut client_config = ClientConfig::new();
    client_config.set("bootstrap.servers", &config.bootstrap_address);

    let security = &config.security;
    if security.sasl_username.is_some() {
        client_config.set("security.protocol", "SASL_SSL");
        if let Some(mechanism) = &security.sasl_mechanism {
            client_config.set("sasl.mechanism", mechanism);
        }
        if let Some(username) = &security.sasl_username {
            client_config.set("sasl.username", username);
        }
        if let Some(password) = &security.sasl_password {
            client_config.set("sasl.password", password);
        }
    } else {
        client_config.set("security.protocol", "SSL");
    }
    if let Some(ca_location) = &security.ssl_ca_location {
        client_config.set("ssl.ca.location", ca_location);
    }

    client_config
}

/// Kafka implementation of the admin interface.
///
/// `connect` builds a fresh `AdminClient`; the handle never outlives the
/// invocation that acquired it.
pub struct KafkaAdmin {
    client_config: ClientConfig,
    request_timeout: Duration,
    client: Mutex<Option<AdminClient<DefaultClientContext>>>,
}

impl KafkaAdmin {
    /// Creates an admin interface from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client_config: base_client_config(config),
            request_timeout: config.call_timeout_ms,
            client: Mutex::new(None),
        }
    }
}

#[async_trait]
impl BrokerAdmin for KafkaAdmin {
    async fn connect(&self) -> Result<(), BrokerError> {
        let client = self.client_config.create::<AdminClient<DefaultClientContext>>()?;
        *self.client.lock().await = Some(client);
        Ok(())
    }

    async fn create_topic(&self, spec: &TopicSpec) -> Result<TopicCreation, BrokerError> {
        let guard = self.client.lock().await;
        let client = guard.as_ref().ok_or(BrokerError::NotConnected)?;

        let topic = NewTopic::new(
            &spec.name,
            spec.partition_count,
            TopicReplication::Fixed(spec.replication_factor),
        );
        let options = AdminOptions::new().request_timeout(Some(self.request_timeout));

        let results = client.create_topics([&topic], &options).await?;
        match results.into_iter().next() {
            Some(Ok(_)) => Ok(TopicCreation::Created),
            Some(Err((_, RDKafkaErrorCode::TopicAlreadyExists))) => {
                Ok(TopicCreation::AlreadyExists)
            }
            Some(Err((name, code))) => Err(map_admin_code(&name, code)),
            None => Err(BrokerError::Kafka(KafkaError::AdminOpCreation(
                "empty create-topics response".to_string(),
            ))),
        }
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.client.lock().await.take();
        Ok(())
    }
}

fn map_admin_code(topic: &str, code: RDKafkaErrorCode) -> BrokerError {
    match code {
        RDKafkaErrorCode::TopicAuthorizationFailed
        | RDKafkaErrorCode::ClusterAuthorizationFailed => {
            BrokerError::Authorization(format!("create topic '{topic}' denied"))
        }
        RDKafkaErrorCode::InvalidPartitions | RDKafkaErrorCode::InvalidReplicationFactor => {
            BrokerError::InvalidSpec(format!("topic '{topic}': {code}"))
        }
        RDKafkaErrorCode::RequestTimedOut | RDKafkaErrorCode::OperationTimedOut => {
            BrokerError::Timeout
        }
        RDKafkaErrorCode::BrokerNotAvailable | RDKafkaErrorCode::AllBrokersDown => {
            BrokerError::Unavailable(code.to_string())
        }
        other => BrokerError::Kafka(KafkaError::AdminOp(other)),
    }
}

/// Kafka implementation of the producer interface.
///
/// `disconnect` flushes buffered records before dropping the handle, so a
/// successful send is on the wire before the invocation returns.
pub struct KafkaProducer {
    client_config: ClientConfig,
    send_timeout: Duration,
    producer: Mutex<Option<FutureProducer>>,
}

impl KafkaProducer {
    /// Creates a producer interface from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut client_config = base_client_config(config);
        client_config
            .set("message.timeout.ms", config.call_timeout_ms.as_millis().to_string())
            .set("acks", "all");

        Self { client_config, send_timeout: config.call_timeout_ms, producer: Mutex::new(None) }
    }
}

#[async_trait]
impl BrokerProducer for KafkaProducer {
    async fn connect(&self) -> Result<(), BrokerError> {
        let producer = self.client_config.create::<FutureProducer>()?;
        *self.producer.lock().await = Some(producer);
        Ok(())
    }

    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        let guard = self.producer.lock().await;
        let producer = guard.as_ref().ok_or(BrokerError::NotConnected)?;

        // Keyless record: partition assignment is left to the broker client.
        let record = FutureRecord::<(), _>::to(topic).payload(payload);
        producer
            .send(record, self.send_timeout)
            .await
            .map(|_| ())
            .map_err(|(kafka_error, _)| map_send_error(topic, kafka_error))
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        if let Some(producer) = self.producer.lock().await.take() {
            producer.flush(self.send_timeout)?;
        }
        Ok(())
    }
}

fn map_send_error(topic: &str, error: KafkaError) -> BrokerError {
    match error {
        KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut)
        | KafkaError::MessageProduction(RDKafkaErrorCode::RequestTimedOut) => BrokerError::Timeout,
        KafkaError::MessageProduction(RDKafkaErrorCode::UnknownTopicOrPartition) => {
            BrokerError::TopicNotFound(topic.to_string())
        }
        KafkaError::MessageProduction(RDKafkaErrorCode::BrokerNotAvailable)
        | KafkaError::MessageProduction(RDKafkaErrorCode::AllBrokersDown) => {
            BrokerError::Unavailable(error.to_string())
        }
        other => BrokerError::Kafka(other),
    }
}
