//! Integration test for the Kafka-backed broker interfaces.
//!
//! Ignored by default: it needs a reachable Kafka broker with a TLS listener
//! (the client always connects over SSL). Point `BOOTSTRAP_ADDRESS` at the
//! broker and run with `cargo test -- --ignored`.

use std::{sync::Arc, time::Duration};

use rdkafka::{
    ClientConfig, Message,
    consumer::{Consumer, StreamConsumer},
};
use teller::{
    broker::{KafkaAdmin, KafkaProducer},
    config::AppConfig,
    context::InvocationContext,
    handler::InvocationHandler,
    models::{TransactionEvent, TransactionStatus},
    publisher::{MessagePublisher, ProvisioningState, TopicProvisioner},
};
use tokio::time::timeout;

#[tokio::test]
#[ignore]
async fn test_kafka_publish_round_trip() {
    let bootstrap =
        std::env::var("BOOTSTRAP_ADDRESS").unwrap_or_else(|_| "127.0.0.1:9094".to_string());

    let config = AppConfig {
        topic_name: "teller-integration-test".to_string(),
        bootstrap_address: bootstrap.clone(),
        ..Default::default()
    };

    let admin = Arc::new(KafkaAdmin::from_config(&config));
    let producer = Arc::new(KafkaProducer::from_config(&config));
    let provisioner = TopicProvisioner::new(
        admin,
        config.topic_spec(),
        config.call_timeout_ms,
        ProvisioningState::new(),
    );
    let publisher =
        MessagePublisher::new(producer, config.topic_name.clone(), config.call_timeout_ms);
    let handler = InvocationHandler::new(provisioner, publisher);

    let event = TransactionEvent { account_id: 42, value: 100.0 };
    let ctx = InvocationContext::new("integration-test");
    let result = handler.handle(&ctx, event).await;
    assert_eq!(result.status, TransactionStatus::Success);

    // Verify the message landed on the topic.
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &bootstrap)
        .set("security.protocol", "SSL")
        .set("group.id", "teller-integration-test-group")
        .set("auto.offset.reset", "earliest")
        .create()
        .expect("Consumer creation failed");

    consumer.subscribe(&[&config.topic_name]).expect("Can't subscribe to topic");

    let message_result = timeout(Duration::from_secs(10), consumer.recv()).await;
    assert!(message_result.is_ok(), "Timed out waiting for message from Kafka");

    let message = message_result.unwrap().expect("Error receiving message");
    let payload = message.payload().expect("Message has no payload");
    assert_eq!(payload, br#"{"accountId":42,"value":100.0}"#);
}
