use std::{sync::Arc, time::Duration};

use super::{ProvisionError, ProvisioningState, bounded};
use crate::{
    broker::{BrokerAdmin, TopicCreation},
    context::InvocationContext,
    models::TopicSpec,
};

/// Ensures the target topic exists on the broker, contacting the broker at
/// most until the first success per process.
pub struct TopicProvisioner {
    admin: Arc<dyn BrokerAdmin>,
    spec: TopicSpec,
    call_timeout: Duration,
    state: ProvisioningState,
}

impl TopicProvisioner {
    /// Creates a provisioner for the given topic spec and shared state.
    pub fn new(
        admin: Arc<dyn BrokerAdmin>,
        spec: TopicSpec,
        call_timeout: Duration,
        state: ProvisioningState,
    ) -> Self {
        Self { admin, spec, call_timeout, state }
    }

    /// Returns once the topic is known to exist.
    ///
    /// Fast path: if a prior invocation in this process already provisioned
    /// the topic, the broker is not contacted. Otherwise one scoped admin
    /// connection is used for a single create-topic request; a
    /// broker-reported "already exists" counts as success. The state flag is
    /// left unset on any other failure so a later invocation retries.
    /// Topic creation is monotonic; nothing is rolled back on later failures.
    pub async fn ensure_topic(&self, ctx: &InvocationContext) -> Result<(), ProvisionError> {
        if self.state.is_created() {
            tracing::debug!(topic = %self.spec.name, "Topic already provisioned, skipping creation.");
            return Ok(());
        }

        let per_call = ctx.call_timeout(self.call_timeout);

        bounded(per_call, self.admin.connect()).await.map_err(ProvisionError::Connect)?;
        tracing::debug!(topic = %self.spec.name, "Connected to broker admin, creating topic...");

        let created = bounded(per_call, self.admin.create_topic(&self.spec)).await;

        // The connection is released before the create result is inspected.
        if let Err(error) = bounded(per_call, self.admin.disconnect()).await {
            tracing::warn!(error = %error, "Failed to release admin connection.");
        }

        match created {
            Ok(TopicCreation::Created) => {
                tracing::info!(topic = %self.spec.name, "Created topic.");
                self.state.mark_created();
                Ok(())
            }
            Ok(TopicCreation::AlreadyExists) => {
                // The existing topic's partition and replication parameters
                // are not verified against the desired spec.
                tracing::debug!(topic = %self.spec.name, "Topic already exists on the broker.");
                self.state.mark_created();
                Ok(())
            }
            Err(source) => {
                Err(ProvisionError::Create { topic: self.spec.name.clone(), source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        broker::{BrokerError, MockBrokerAdmin},
        test_helpers::{RecordingAdmin, create_test_context, create_test_spec},
    };

    fn create_provisioner(admin: Arc<dyn BrokerAdmin>) -> (TopicProvisioner, ProvisioningState) {
        let state = ProvisioningState::new();
        let provisioner = TopicProvisioner::new(
            admin,
            create_test_spec(),
            Duration::from_millis(200),
            state.clone(),
        );
        (provisioner, state)
    }

    #[tokio::test]
    async fn fast_path_skips_the_broker_entirely() {
        let mut admin = MockBrokerAdmin::new();
        admin.expect_connect().times(0);
        admin.expect_create_topic().times(0);
        admin.expect_disconnect().times(0);

        let (provisioner, state) = create_provisioner(Arc::new(admin));
        state.mark_created();

        let result = provisioner.ensure_topic(&create_test_context()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn successful_creation_sets_the_flag_once() {
        let admin = Arc::new(RecordingAdmin::default());
        let (provisioner, state) = create_provisioner(admin.clone());
        let ctx = create_test_context();

        provisioner.ensure_topic(&ctx).await.unwrap();
        assert!(state.is_created());
        assert_eq!(admin.create_count(), 1);
        assert_eq!(admin.connect_count(), admin.disconnect_count());

        // The second call short-circuits.
        provisioner.ensure_topic(&ctx).await.unwrap();
        assert_eq!(admin.create_count(), 1);
        assert_eq!(admin.connect_count(), 1);
    }

    #[tokio::test]
    async fn already_exists_counts_as_success() {
        let admin = Arc::new(RecordingAdmin::default());
        admin.push_create_outcome(Ok(TopicCreation::AlreadyExists));

        let (provisioner, state) = create_provisioner(admin.clone());
        provisioner.ensure_topic(&create_test_context()).await.unwrap();

        assert!(state.is_created());
        assert_eq!(admin.create_count(), 1);
        assert_eq!(admin.connect_count(), admin.disconnect_count());
    }

    #[tokio::test]
    async fn broker_failure_leaves_the_flag_unset_and_releases_the_connection() {
        let admin = Arc::new(RecordingAdmin::default());
        admin.push_create_outcome(Err(BrokerError::Authorization("denied".to_string())));

        let (provisioner, state) = create_provisioner(admin.clone());
        let result = provisioner.ensure_topic(&create_test_context()).await;

        assert!(matches!(result, Err(ProvisionError::Create { .. })));
        assert!(!state.is_created());
        assert_eq!(admin.connect_count(), admin.disconnect_count());

        // A later invocation with a permitted connection retries and succeeds.
        provisioner.ensure_topic(&create_test_context()).await.unwrap();
        assert!(state.is_created());
        assert_eq!(admin.create_count(), 2);
    }

    #[tokio::test]
    async fn connect_failure_surfaces_without_a_create_attempt() {
        let admin = Arc::new(RecordingAdmin::default());
        admin.fail_next_connect(BrokerError::Unavailable("no route".to_string()));

        let (provisioner, state) = create_provisioner(admin.clone());
        let result = provisioner.ensure_topic(&create_test_context()).await;

        assert!(matches!(result, Err(ProvisionError::Connect(_))));
        assert!(!state.is_created());
        assert_eq!(admin.create_count(), 0);
        // Nothing was acquired, so nothing is released.
        assert_eq!(admin.disconnect_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn create_timeout_still_releases_the_connection() {
        let admin = Arc::new(RecordingAdmin::default());
        admin.hang_next_create();

        let (provisioner, state) = create_provisioner(admin.clone());
        let result = provisioner.ensure_topic(&create_test_context()).await;

        match result {
            Err(ProvisionError::Create { source: BrokerError::Timeout, .. }) => {}
            other => panic!("expected create timeout, got {other:?}"),
        }
        assert!(!state.is_created());
        assert_eq!(admin.connect_count(), admin.disconnect_count());
    }
}
