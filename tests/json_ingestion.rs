use std::fs;

use record_reshape::ingestion::json::{records_from_json_str, value_from_json_str};
use record_reshape::types::Value;

#[test]
fn ingest_json_array_from_fixture() {
    let text = fs::read_to_string("tests/fixtures/employees.json").unwrap();
    let rows = records_from_json_str(&text).unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].field("user"), Some(&Value::from("a")));
    assert_eq!(rows[3].field("dept"), None);
    assert_eq!(rows[4].field("site"), None);
    assert_eq!(rows[5].field("val"), Some(&Value::Int64(6)));
}

#[test]
fn ingest_ndjson_skips_blank_lines() {
    let text = fs::read_to_string("tests/fixtures/employees.ndjson").unwrap();
    let rows = records_from_json_str(&text).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].field("user"), Some(&Value::from("c")));
}

#[test]
fn ingest_json_preserves_field_order() {
    let rows = records_from_json_str(r#"[{"zeta": 1, "alpha": 2, "mid": 3}]"#).unwrap();
    let keys: Vec<&str> = rows[0].fields().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn ingest_json_errors_on_scalar_document() {
    let err = records_from_json_str("42").unwrap_err();
    assert!(err.to_string().contains("invalid input"));
}

#[test]
fn value_from_json_keeps_nesting() {
    let v = value_from_json_str(r#"{"a": {"b": [1, {"c": null}]}}"#).unwrap();
    let inner = v.field("a").and_then(|a| a.field("b")).unwrap();
    match inner {
        Value::List(items) => {
            assert_eq!(items[0], Value::Int64(1));
            assert_eq!(items[1].field("c"), None);
        }
        other => panic!("expected list, got {other:?}"),
    }
}
