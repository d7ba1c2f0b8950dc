use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::knowledge::Catalog;
use crate::knowledge::loader::load_catalog;
use crate::logs::{self, LogLine};
use crate::outcome::classifier::OutcomeClassifier;
use crate::types::RawTransactionRecord;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match value.serialize(&serializer) {
        Ok(js) => js,
        Err(e) => error_result(&format!("serialization failed: {e}")),
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    obj.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

/// Classifier bound to one loaded error catalog.
#[wasm_bindgen]
pub struct Analyzer {
    catalog: Catalog,
}

#[wasm_bindgen]
impl Analyzer {
    /// Load the catalog from `errors.json` text.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<Analyzer, JsValue> {
        load_catalog(catalog_json)
            .map(|catalog| Analyzer { catalog })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Classify from a success flag and a JSON array of log lines.
    pub fn analyze(&self, succeeded: bool, logs_json: &str) -> JsValue {
        let logs: Vec<String> = match serde_json::from_str(logs_json) {
            Ok(logs) => logs,
            Err(_) => return error_result("Expected a JSON array of log lines"),
        };
        let classifier = OutcomeClassifier::from_catalog(&self.catalog);
        to_js(&classifier.classify_logs(succeeded, &logs))
    }

    /// Classify from the `meta` object of a `getTransaction` response.
    #[wasm_bindgen(js_name = analyzeMeta)]
    pub fn analyze_meta(&self, meta_json: &str) -> JsValue {
        let record = match RawTransactionRecord::from_rpc_meta_json(meta_json) {
            Ok(record) => record,
            Err(e) => return error_result(&e.to_string()),
        };
        let classifier = OutcomeClassifier::from_catalog(&self.catalog);
        to_js(&classifier.classify(&record))
    }

    /// Human-readable summary for the same inputs as `analyzeMeta`.
    #[wasm_bindgen(js_name = summarizeMeta)]
    pub fn summarize_meta(&self, meta_json: &str) -> Option<String> {
        let record = RawTransactionRecord::from_rpc_meta_json(meta_json).ok()?;
        let classifier = OutcomeClassifier::from_catalog(&self.catalog);
        Some(classifier.classify(&record).summary())
    }
}

/// Describe one log line: `{ kind, programId?, code?, depth?, reason? }`.
#[wasm_bindgen(js_name = interpretLine)]
pub fn interpret_line(line: &str) -> JsValue {
    let obj = match logs::classify_line(line) {
        LogLine::Invoke { program_id, depth } => serde_json::json!({
            "kind": "invoke",
            "programId": program_id,
            "depth": depth,
        }),
        LogLine::Success { program_id } => serde_json::json!({
            "kind": "success",
            "programId": program_id,
        }),
        LogLine::CustomError(failure) => serde_json::json!({
            "kind": "custom_error",
            "programId": failure.program_id,
            "code": failure.code,
            "codeHex": format!("{:#x}", failure.code),
        }),
        LogLine::Failed { program_id, reason } => serde_json::json!({
            "kind": "failed",
            "programId": program_id,
            "reason": reason,
        }),
        LogLine::Other => serde_json::json!({"kind": "other"}),
    };
    to_js(&obj)
}

/// Normalize a hex or decimal code to its decimal string, or null.
#[wasm_bindgen(js_name = normalizeErrorCode)]
pub fn normalize_error_code(text: &str) -> Option<String> {
    logs::parse_error_code(text).map(|code| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_error_code;

    #[test]
    fn normalized_codes_are_decimal_strings() {
        assert_eq!(normalize_error_code("0x1772").as_deref(), Some("6002"));
        assert_eq!(normalize_error_code("6002").as_deref(), Some("6002"));
        assert_eq!(normalize_error_code("0xnope"), None);
    }
}
