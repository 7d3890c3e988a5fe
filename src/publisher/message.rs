use std::{sync::Arc, time::Duration};

use super::{PublishError, bounded};
use crate::{broker::BrokerProducer, context::InvocationContext, models::TransactionEvent};

/// Publishes transaction events to the configured topic, one scoped producer
/// connection per invocation.
pub struct MessagePublisher {
    producer: Arc<dyn BrokerProducer>,
    topic: String,
    call_timeout: Duration,
}

impl MessagePublisher {
    /// Creates a publisher for the given topic.
    pub fn new(producer: Arc<dyn BrokerProducer>, topic: String, call_timeout: Duration) -> Self {
        Self { producer, topic, call_timeout }
    }

    /// Sends one event to the topic as a keyless JSON message.
    ///
    /// The producer connection is released unconditionally, even when the
    /// send fails. There is no internal retry; a failed send surfaces to the
    /// caller, and re-invocation is safe because delivery is at-least-once.
    pub async fn publish(
        &self,
        ctx: &InvocationContext,
        event: &TransactionEvent,
    ) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;
        let per_call = ctx.call_timeout(self.call_timeout);

        bounded(per_call, self.producer.connect()).await.map_err(PublishError::Connect)?;
        tracing::debug!(topic = %self.topic, "Connected to broker producer, sending message...");

        let sent = bounded(per_call, self.producer.send(&self.topic, &payload)).await;

        if let Err(error) = bounded(per_call, self.producer.disconnect()).await {
            tracing::warn!(error = %error, "Failed to release producer connection.");
        }

        sent.map_err(|source| PublishError::Send { topic: self.topic.clone(), source })?;
        tracing::debug!(topic = %self.topic, account_id = event.account_id, "Message sent.");
        Ok(())
    }
}
