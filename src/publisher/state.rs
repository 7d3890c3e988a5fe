use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Process-wide record of whether the target topic has been provisioned.
///
/// Injectable rather than a hidden global, so tests construct a fresh state
/// per case. The flag is set after the first successful creation attempt and
/// never reset for the lifetime of the process. The check-then-act on the
/// flag is not atomic across concurrent invocations; concurrent first
/// invocations may both attempt creation, and both must treat the broker's
/// "already exists" answer as success.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningState {
    created: Arc<AtomicBool>,
}

impl ProvisioningState {
    /// Creates a fresh state with the topic marked as not yet provisioned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a creation attempt has succeeded in this process.
    pub fn is_created(&self) -> bool {
        self.created.load(Ordering::Acquire)
    }

    /// Marks the topic as provisioned for the remainder of the process.
    pub fn mark_created(&self) {
        self.created.store(true, Ordering::Release);
    }
}
