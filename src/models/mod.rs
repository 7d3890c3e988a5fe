//! Wire-facing data structures.

mod event;
mod topic;

pub use event::{TransactionEvent, TransactionResult, TransactionStatus};
pub use topic::TopicSpec;
