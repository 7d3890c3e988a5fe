use std::{sync::Arc, time::Duration};

use super::{RecordingAdmin, RecordingProducer};
use crate::{
    context::InvocationContext,
    handler::InvocationHandler,
    models::{TopicSpec, TransactionEvent},
    publisher::{MessagePublisher, ProvisioningState, TopicProvisioner},
};

/// Creates the transaction event used throughout the tests.
pub fn create_test_event() -> TransactionEvent {
    TransactionEvent { account_id: 42, value: 100.0 }
}

/// Creates the topic spec used throughout the tests.
pub fn create_test_spec() -> TopicSpec {
    TopicSpec { name: "transactions".to_string(), partition_count: 1, replication_factor: 2 }
}

/// Creates an invocation context without a deadline.
pub fn create_test_context() -> InvocationContext {
    InvocationContext::new("test-trace")
}

/// Wires a handler to recording broker interfaces with a short per-call
/// timeout.
pub fn create_test_handler(
    admin: Arc<RecordingAdmin>,
    producer: Arc<RecordingProducer>,
    state: ProvisioningState,
) -> InvocationHandler {
    let call_timeout = Duration::from_millis(200);
    let provisioner = TopicProvisioner::new(admin, create_test_spec(), call_timeout, state);
    let publisher = MessagePublisher::new(producer, "transactions".to_string(), call_timeout);
    InvocationHandler::new(provisioner, publisher)
}
