//! Transaction event and result types exchanged with the invoking framework.

use serde::{Deserialize, Serialize};

/// A single account transaction, supplied by the upstream event source.
///
/// Consumed exactly once per invocation; the JSON field names match the
/// upstream contract (`accountId`, `value`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionEvent {
    /// The account the transaction applies to.
    pub account_id: i64,

    /// The transaction amount.
    pub value: f64,
}

/// The terminal outcome of one handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Whether the event reached the broker.
    pub status: TransactionStatus,
}

/// Invocation status reported back to the invoking framework.
///
/// Diagnostic detail stays in the log output; the result contract carries
/// only success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Both provisioning and publishing succeeded.
    Success,
    /// Provisioning or publishing failed; the event was not delivered.
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_uses_upstream_field_names() {
        let event: TransactionEvent =
            serde_json::from_str(r#"{"accountId": 42, "value": 100.0}"#).unwrap();
        assert_eq!(event.account_id, 42);
        assert_eq!(event.value, 100.0);

        let encoded = serde_json::to_string(&event).unwrap();
        assert_eq!(encoded, r#"{"accountId":42,"value":100.0}"#);
    }

    #[test]
    fn event_rejects_unknown_fields() {
        let result: Result<TransactionEvent, _> =
            serde_json::from_str(r#"{"accountId": 1, "value": 2.0, "memo": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn result_status_serializes_screaming() {
        let success = TransactionResult { status: TransactionStatus::Success };
        assert_eq!(serde_json::to_string(&success).unwrap(), r#"{"status":"SUCCESS"}"#);

        let failure = TransactionResult { status: TransactionStatus::Failure };
        assert_eq!(serde_json::to_string(&failure).unwrap(), r#"{"status":"FAILURE"}"#);
    }
}
