//! Error types for the publishing core.

use thiserror::Error;

use crate::broker::BrokerError;

/// Defines the possible errors while ensuring the target topic exists.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The admin connection could not be established.
    #[error("failed to connect to the broker admin interface: {0}")]
    Connect(#[source] BrokerError),

    /// The create-topic request failed for a reason other than "already
    /// exists".
    #[error("failed to create topic '{topic}': {source}")]
    Create {
        /// The topic the request was for.
        topic: String,
        /// The broker-reported cause.
        source: BrokerError,
    },
}

/// Defines the possible errors while publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The producer connection could not be established.
    #[error("failed to connect to the broker producer interface: {0}")]
    Connect(#[source] BrokerError),

    /// The send failed after a connection was established.
    #[error("failed to send to topic '{topic}': {source}")]
    Send {
        /// The topic the message was addressed to.
        topic: String,
        /// The broker-reported cause.
        source: BrokerError,
    },

    /// The event could not be encoded. This indicates a programming defect
    /// rather than a retryable runtime failure.
    #[error("failed to serialize event payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
