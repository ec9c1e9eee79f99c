//! Nested value extraction by key path.

use std::borrow::Cow;

use crate::error::{ReshapeError, ReshapeResult};
use crate::types::Value;

/// Walk `data` along `path` and return the value found there.
///
/// Maps and objects are walked by field name, lists by decimal index. A `null` value counts as
/// absent. When a key cannot be resolved:
///
/// - `strict == true` returns [`ReshapeError::NotFound`] naming the keys consumed so far
/// - `strict == false` returns an empty map
///
/// An empty `path` returns `data` itself.
///
/// ```rust
/// use record_reshape::processing::get_content;
/// use record_reshape::types::Value;
///
/// let data = Value::from(serde_json::json!({"user": {"name": "Mars", "birthday": "2000-01-01"}}));
///
/// let name = get_content(&data, &["user", "name"], false).unwrap();
/// assert_eq!(*name, Value::from("Mars"));
///
/// let missing = get_content(&data, &["user", "email"], false).unwrap();
/// assert_eq!(*missing, Value::empty_map());
///
/// let err = get_content(&data, &["user", "email"], true).unwrap_err();
/// assert_eq!(err.to_string(), "path not found: user => email");
/// ```
pub fn get_content<'a, S: AsRef<str>>(
    data: &'a Value,
    path: &[S],
    strict: bool,
) -> ReshapeResult<Cow<'a, Value>> {
    let mut current = data;
    for (depth, key) in path.iter().enumerate() {
        match child(current, key.as_ref()) {
            Some(next) => current = next,
            None if strict => {
                return Err(ReshapeError::NotFound {
                    path: join_path(&path[..=depth]),
                });
            }
            None => return Ok(Cow::Owned(Value::empty_map())),
        }
    }
    Ok(Cow::Borrowed(current))
}

/// Borrowing lookup: the value at `path`, or `None` if any key is absent.
pub fn try_get<'a, S: AsRef<str>>(data: &'a Value, path: &[S]) -> Option<&'a Value> {
    path.iter()
        .try_fold(data, |current, key| child(current, key.as_ref()))
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::List(items) => key
            .parse::<usize>()
            .ok()
            .and_then(|idx| items.get(idx))
            .filter(|v| !v.is_null()),
        other => other.field(key),
    }
}

fn join_path<S: AsRef<str>>(keys: &[S]) -> String {
    keys.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" => ")
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{get_content, try_get};
    use crate::error::ReshapeError;
    use crate::types::{Object, Record, Value};

    fn sample() -> Value {
        Value::from(serde_json::json!({
            "user": {"name": "Mars", "tags": ["a", "b"], "nick": null},
            "count": 3
        }))
    }

    #[test]
    fn empty_path_is_identity_and_borrows() {
        let data = sample();
        let out = get_content::<&str>(&data, &[], true).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(*out, data);
    }

    #[test]
    fn walks_maps_and_list_indices() {
        let data = sample();
        assert_eq!(
            *get_content(&data, &["user", "tags", "1"], true).unwrap(),
            Value::from("b")
        );
        assert_eq!(try_get(&data, &["count"]), Some(&Value::Int64(3)));
        assert_eq!(try_get(&data, &["user", "tags", "x"]), None);
    }

    #[test]
    fn walks_object_fields() {
        let mut fields = Record::new();
        fields.insert("inner".to_string(), Value::record([("k", "v")]));
        let data = Value::Object(Object::new("Holder", fields));
        assert_eq!(try_get(&data, &["inner", "k"]), Some(&Value::from("v")));
    }

    #[test]
    fn strict_error_names_consumed_path() {
        let data = sample();
        let err = get_content(&data, &["user", "email", "domain"], true).unwrap_err();
        match err {
            ReshapeError::NotFound { path } => assert_eq!(path, "user => email"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lenient_miss_returns_empty_map() {
        let data = sample();
        let out = get_content(&data, &["nope", "deeper"], false).unwrap();
        assert_eq!(*out, Value::empty_map());
    }

    #[test]
    fn null_values_count_as_missing() {
        let data = sample();
        assert!(get_content(&data, &["user", "nick"], true).is_err());
        assert_eq!(try_get(&data, &["user", "nick"]), None);
    }

    #[test]
    fn scalars_have_no_children() {
        let data = sample();
        let err = get_content(&data, &["count", "x"], true).unwrap_err();
        assert_eq!(err.to_string(), "path not found: count => x");
    }
}
