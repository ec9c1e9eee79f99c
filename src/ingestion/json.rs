//! JSON ingestion.
//!
//! Supported inputs for [`records_from_json_str`]:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! JSON objects become mapping-like records ([`Value::Map`]) with their field order preserved.

use crate::error::{ReshapeError, ReshapeResult};
use crate::types::Value;

/// Parse a record sequence from JSON or NDJSON text.
pub fn records_from_json_str(input: &str) -> ReshapeResult<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReshapeError::InvalidInput {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => records_from_json_values(items),
            serde_json::Value::Object(_) => records_from_json_values(vec![v]),
            _ => Err(ReshapeError::InvalidInput {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                ReshapeError::InvalidInput {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        records_from_json_values(values)
    }
}

/// Parse any JSON document into a [`Value`].
///
/// Useful for nested inputs to [`crate::processing::gather()`] and
/// [`crate::processing::get_content`].
pub fn value_from_json_str(input: &str) -> ReshapeResult<Value> {
    let v = serde_json::from_str::<serde_json::Value>(input)?;
    Ok(Value::from(v))
}

fn records_from_json_values(values: Vec<serde_json::Value>) -> ReshapeResult<Vec<Value>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx0, v)| {
            if v.is_object() {
                Ok(Value::from(v))
            } else {
                Err(ReshapeError::InvalidInput {
                    message: format!("row {} is not a json object", idx0 + 1),
                })
            }
        })
        .collect()
}
