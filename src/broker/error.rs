//! Error types for broker interactions.

use thiserror::Error;

/// Defines the possible errors reported by the broker interfaces.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The interface was used before `connect` or after `disconnect`.
    #[error("not connected to the broker")]
    NotConnected,

    /// The broker rejected the request for authorization reasons.
    #[error("broker authorization failed: {0}")]
    Authorization(String),

    /// The broker rejected the topic specification.
    #[error("invalid topic specification: {0}")]
    InvalidSpec(String),

    /// The target topic does not exist on the broker.
    #[error("topic '{0}' not found on the broker")]
    TopicNotFound(String),

    /// The call did not complete within its timeout.
    #[error("broker call timed out")]
    Timeout,

    /// The broker could not be reached.
    #[error("broker unavailable: {0}")]
    Unavailable(String),

    /// An error surfaced by the underlying Kafka client.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}
