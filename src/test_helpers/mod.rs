//! A set of helpers for testing

mod broker;
mod fixtures;

pub use broker::{RecordingAdmin, RecordingProducer};
pub use fixtures::{create_test_context, create_test_event, create_test_handler, create_test_spec};
