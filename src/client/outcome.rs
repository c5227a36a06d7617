//! Overall pass/fail reduction for execute responses

use serde_json::Value;

/// Reduce an execute response into a single pass/fail verdict.
///
/// A list of results is AND-reduced over each entry's `passing` flag:
/// an empty list has no verdict, and an entry without a `passing` flag
/// drops the verdict unless a `false` was already seen. A single result
/// yields its own `passing` flag, or no verdict when the flag is absent.
pub fn overall_outcome(data: &Value) -> Option<bool> {
    match data {
        Value::Array(entries) => {
            if entries.is_empty() {
                return None;
            }
            let mut passing = Some(true);
            for entry in entries {
                passing = match passing {
                    Some(true) => entry.get("passing").and_then(Value::as_bool),
                    settled => settled,
                };
            }
            passing
        }
        other => other.get("passing").and_then(Value::as_bool),
    }
}
