//! Narrow interfaces to the message broker and their Kafka implementations.
//!
//! The admin and producer sides are modelled as two independent traits with
//! explicit connect/operate/disconnect methods so the publishing core stays
//! broker-agnostic and each side can be mocked on its own.

mod error;
mod kafka;
mod traits;

pub use error::BrokerError;
pub use kafka::{KafkaAdmin, KafkaProducer};
pub use traits::{BrokerAdmin, BrokerProducer, TopicCreation};

#[cfg(test)]
pub use traits::{MockBrokerAdmin, MockBrokerProducer};
