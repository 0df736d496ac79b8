//! Shared test utilities for the cloudguard workspace.
//!
//! Integration tests compare reports produced by separate process runs; these
//! helpers blank out the fields that legitimately differ between runs.

use serde_json::Value;

const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Keys holding wall-clock values, normalized at any depth.
///
/// `timestamp` is the compliance summary's scan time.
const TIMESTAMP_KEYS: &[&str] = &["started_at", "ended_at", "timestamp"];

/// Normalize non-deterministic JSON fields for report comparison.
///
/// - `tool.version` is replaced only when the *root* object is a report
///   envelope (`schema`, `tool`, `run`, `verdict`, `findings` all present),
///   so finding `data` payloads are never rewritten.
/// - Timestamp keys and `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "verdict", "findings"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_clock_fields(&mut value);
    value
}

fn normalize_clock_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(v) = map.get_mut(*key)
                    && v.is_string()
                {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            if let Some(v) = map.get_mut("duration_ms") {
                *v = Value::Number(0.into());
            }
            for val in map.values_mut() {
                normalize_clock_fields(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_clock_fields(val);
            }
        }
        _ => {}
    }
}
