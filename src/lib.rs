#![warn(missing_docs)]
//! Teller publishes transaction events to a Kafka topic, provisioning the
//! topic on first use and keeping broker connections scoped to a single
//! invocation.

pub mod broker;
pub mod config;
pub mod context;
pub mod handler;
pub mod models;
pub mod publisher;
pub mod test_helpers;
