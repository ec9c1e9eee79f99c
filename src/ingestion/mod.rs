//! Record ingestion: turning caller data into [`crate::types::Value`] records.
//!
//! - [`json`]: JSON arrays, single objects and NDJSON become mapping-like records
//! - [`objects`]: `serde::Serialize` structs become object-like records

pub mod json;
pub mod objects;

pub use json::{records_from_json_str, value_from_json_str};
pub use objects::{object_from_serialize, records_from_serialize};
