//! The invocation entry point: one event in, one well-formed result out.

use crate::{
    context::InvocationContext,
    models::{TransactionEvent, TransactionResult, TransactionStatus},
    publisher::{MessagePublisher, TopicProvisioner},
};

/// Drives one invocation through provisioning and publishing.
///
/// Every error is converted to a `FAILURE` result at this boundary; nothing
/// propagates to the invoking framework. Diagnostic detail goes to the
/// structured log, not into the result contract.
pub struct InvocationHandler {
    provisioner: TopicProvisioner,
    publisher: MessagePublisher,
}

impl InvocationHandler {
    /// Creates a handler from its two collaborators.
    pub fn new(provisioner: TopicProvisioner, publisher: MessagePublisher) -> Self {
        Self { provisioner, publisher }
    }

    /// Handles one transaction event: ensure the topic exists, then publish.
    ///
    /// A provisioning failure short-circuits without a publish attempt.
    #[tracing::instrument(
        skip_all,
        fields(trace_id = %ctx.trace_id, account_id = event.account_id)
    )]
    pub async fn handle(
        &self,
        ctx: &InvocationContext,
        event: TransactionEvent,
    ) -> TransactionResult {
        if let Err(error) = self.provisioner.ensure_topic(ctx).await {
            tracing::error!(error = %error, "Topic provisioning failed, event not published.");
            return TransactionResult { status: TransactionStatus::Failure };
        }

        match self.publisher.publish(ctx, &event).await {
            Ok(()) => TransactionResult { status: TransactionStatus::Success },
            Err(error) => {
                tracing::error!(error = %error, "Failed to publish transaction event.");
                TransactionResult { status: TransactionStatus::Failure }
            }
        }
    }
}
