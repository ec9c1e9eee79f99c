//! Ingestion of structured (object-like) records.
//!
//! Any `T: Serialize` that serializes to a struct or map becomes a [`Value::Object`] tagged with
//! the short name of `T`. Nested structs become mapping-like values.

use serde::Serialize;

use crate::error::{ReshapeError, ReshapeResult};
use crate::types::{Object, Value};

/// Convert one structured value into an object-like record.
pub fn object_from_serialize<T: Serialize>(item: &T) -> ReshapeResult<Value> {
    match Value::from(serde_json::to_value(item)?) {
        Value::Map(fields) => Ok(Value::Object(Object::new(short_type_name::<T>(), fields))),
        other => Err(ReshapeError::InvalidInput {
            message: format!(
                "{} does not serialize to a record (got {other:?})",
                short_type_name::<T>()
            ),
        }),
    }
}

/// Convert a slice of structured values into a record sequence.
pub fn records_from_serialize<T: Serialize>(items: &[T]) -> ReshapeResult<Vec<Value>> {
    items.iter().map(object_from_serialize).collect()
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
