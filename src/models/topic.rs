use serde::{Deserialize, Serialize};

/// The desired shape of the target topic, supplied by configuration and
/// immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSpec {
    /// The topic name.
    pub name: String,

    /// Number of partitions, at least 1.
    pub partition_count: i32,

    /// Replication factor, at least 1.
    pub replication_factor: i32,
}
