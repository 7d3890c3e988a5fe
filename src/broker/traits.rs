use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::BrokerError;
use crate::models::TopicSpec;

/// Outcome of a create-topic request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicCreation {
    /// The broker created the topic.
    Created,
    /// The topic was already present; creation converged without effect.
    AlreadyExists,
}

/// The broker's admin interface, scoped to one connection per use.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BrokerAdmin: Send + Sync {
    /// Establishes an admin connection.
    async fn connect(&self) -> Result<(), BrokerError>;

    /// Issues a create-topic request for the given spec.
    async fn create_topic(&self, spec: &TopicSpec) -> Result<TopicCreation, BrokerError>;

    /// Releases the admin connection.
    async fn disconnect(&self) -> Result<(), BrokerError>;
}

/// The broker's data-plane producer interface, scoped to one connection per
/// use.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BrokerProducer: Send + Sync {
    /// Establishes a producer connection.
    async fn connect(&self) -> Result<(), BrokerError>;

    /// Sends one message payload to the named topic.
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError>;

    /// Releases the producer connection.
    async fn disconnect(&self) -> Result<(), BrokerError>;
}
