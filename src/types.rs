use tracing::warn;

use crate::error::Error;

/// Execution record of one transaction, as handed over by the fetch layer.
///
/// Deserializing a record without a `succeeded` flag, or a failed record without
/// `logs`, yields [`RawTransactionRecord::empty_failure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "RecordFields")]
pub struct RawTransactionRecord {
    /// `true` iff the transaction-level error indicator was absent/null.
    pub succeeded: bool,
    /// Log lines in execution order.
    pub logs: Vec<String>,
}

#[derive(serde::Deserialize)]
struct RecordFields {
    #[serde(default)]
    succeeded: Option<bool>,
    #[serde(default)]
    logs: Option<Vec<String>>,
}

impl From<RecordFields> for RawTransactionRecord {
    fn from(fields: RecordFields) -> Self {
        match (fields.succeeded, fields.logs) {
            (Some(true), logs) => Self::new(true, logs.unwrap_or_default()),
            (Some(false), Some(logs)) => Self::new(false, logs),
            (Some(false), None) | (None, _) => Self::empty_failure(),
        }
    }
}

impl RawTransactionRecord {
    pub fn new(succeeded: bool, logs: Vec<String>) -> Self {
        Self { succeeded, logs }
    }

    /// Failed record with no logs; classifies as unparsed.
    pub fn empty_failure() -> Self {
        Self::default()
    }

    /// Build a record from the `meta` object of a `getTransaction` RPC response.
    ///
    /// `err` null or absent means success. `logMessages` null or absent means no
    /// logs. A `meta` that is not an object, or whose `logMessages` is not an array
    /// of strings, becomes [`Self::empty_failure`] so no line is silently dropped.
    pub fn from_rpc_meta(meta: &serde_json::Value) -> Self {
        let Some(obj) = meta.as_object() else {
            return Self::empty_failure();
        };

        let succeeded = obj.get("err").is_none_or(serde_json::Value::is_null);
        let logs = match obj.get("logMessages") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(lines)) => {
                let parsed: Option<Vec<String>> = lines
                    .iter()
                    .map(|line| line.as_str().map(String::from))
                    .collect();
                match parsed {
                    Some(logs) => logs,
                    None => {
                        warn!("logMessages contains a non-string entry");
                        return Self::empty_failure();
                    }
                }
            }
            Some(_) => {
                warn!("logMessages is not an array");
                return Self::empty_failure();
            }
        };

        Self { succeeded, logs }
    }

    /// Parse the JSON text of a `meta` object.
    pub fn from_rpc_meta_json(json: &str) -> Result<Self, Error> {
        let meta: serde_json::Value = serde_json::from_str(json)?;
        if !meta.is_object() {
            return Err(Error::Parse {
                reason: "transaction meta is not a JSON object".into(),
            });
        }
        Ok(Self::from_rpc_meta(&meta))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::RawTransactionRecord;
    use crate::error::Error;

    #[test]
    fn null_err_means_success() {
        let meta = serde_json::json!({
            "err": null,
            "logMessages": ["Program 11111111111111111111111111111111 success"]
        });
        let record = RawTransactionRecord::from_rpc_meta(&meta);
        assert!(record.succeeded);
        assert_eq!(record.logs.len(), 1);
    }

    #[test]
    fn missing_err_means_success() {
        let record = RawTransactionRecord::from_rpc_meta(&serde_json::json!({}));
        assert!(record.succeeded);
        assert!(record.logs.is_empty());
    }

    #[test]
    fn instruction_error_means_failure_and_keeps_log_order() {
        let meta = serde_json::json!({
            "err": { "InstructionError": [0, { "Custom": 6002 }] },
            "logMessages": ["first", "second", "third"]
        });
        let record = RawTransactionRecord::from_rpc_meta(&meta);
        assert!(!record.succeeded);
        assert_eq!(record.logs, vec!["first", "second", "third"]);
    }

    #[test]
    fn null_logs_become_empty() {
        let meta = serde_json::json!({ "err": "AccountNotFound", "logMessages": null });
        let record = RawTransactionRecord::from_rpc_meta(&meta);
        assert!(!record.succeeded);
        assert!(record.logs.is_empty());
    }

    #[test]
    fn non_object_meta_is_an_empty_failure() {
        assert_eq!(
            RawTransactionRecord::from_rpc_meta(&serde_json::Value::Null),
            RawTransactionRecord::empty_failure()
        );
        assert!(matches!(
            RawTransactionRecord::from_rpc_meta_json("[]"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn non_string_log_entry_makes_the_whole_log_malformed() {
        let meta = serde_json::json!({
            "err": "InvalidAccountData",
            "logMessages": ["a", 5, "b"]
        });
        assert_eq!(
            RawTransactionRecord::from_rpc_meta(&meta),
            RawTransactionRecord::empty_failure()
        );

        let meta = serde_json::json!({ "err": null, "logMessages": "a" });
        assert_eq!(
            RawTransactionRecord::from_rpc_meta(&meta),
            RawTransactionRecord::empty_failure()
        );
    }

    #[test]
    fn deserializes_with_missing_and_null_fields() {
        let record: RawTransactionRecord = serde_json::from_str(r#"{"logs": null}"#).unwrap();
        assert_eq!(record, RawTransactionRecord::empty_failure());

        let record: RawTransactionRecord =
            serde_json::from_str(r#"{"succeeded": false, "logs": null}"#).unwrap();
        assert_eq!(record, RawTransactionRecord::empty_failure());

        let record: RawTransactionRecord = serde_json::from_str(r#"{"succeeded": true}"#).unwrap();
        assert!(record.succeeded);
        assert!(record.logs.is_empty());

        let record: RawTransactionRecord =
            serde_json::from_str(r#"{"succeeded": true, "logs": ["a"]}"#).unwrap();
        assert!(record.succeeded);
        assert_eq!(record.logs, vec!["a"]);
    }

    #[test]
    fn missing_flag_discards_logs_even_with_a_marker() {
        let record: RawTransactionRecord = serde_json::from_str(
            r#"{"logs": ["Program ABC failed: custom program error: 0x1772"]}"#,
        )
        .unwrap();
        assert_eq!(record, RawTransactionRecord::empty_failure());
    }
}
