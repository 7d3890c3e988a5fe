//! The publishing core: idempotent topic provisioning and per-invocation
//! message publishing.
//!
//! Both halves follow the same connection discipline: acquire immediately
//! before use, release on every exit path, never hold a connection across
//! invocations.

mod error;
mod message;
mod provisioner;
mod state;

pub use error::{ProvisionError, PublishError};
pub use message::MessagePublisher;
pub use provisioner::TopicProvisioner;
pub use state::ProvisioningState;

use std::{future::Future, time::Duration};

use crate::broker::BrokerError;

/// Bounds a broker call with a timeout, mapping an elapsed timer to
/// `BrokerError::Timeout`.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, BrokerError>
where
    F: Future<Output = Result<T, BrokerError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(BrokerError::Timeout),
    }
}
