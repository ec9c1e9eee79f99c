//! `record-reshape` is a small library for reshaping schema-less record sequences in memory.
//!
//! Records are [`types::Value`]s: either mapping-like ([`types::Value::Map`]) or object-like
//! ([`types::Value::Object`]). Records in one sequence do not need to share a schema; a record
//! that lacks a key is a normal condition, not an error.
//!
//! ## What you can do
//!
//! - **Index** a sequence by a [`types::KeyPath`] of one or more keys: a nested mapping of the same
//!   depth, with the (last) matching record at each leaf ([`processing::index_by`]).
//! - **Group** a sequence the same way, with every matching record at each leaf, in input order
//!   ([`processing::group_by`]).
//! - **Index only**: keep the key structure and drop the data ([`processing::index_only`]).
//! - **Gather** distinct values of several columns into one set or into labelled sets
//!   ([`processing::gather()`]).
//! - **Extract** a nested value by a path of keys, leniently or strictly
//!   ([`processing::get_content`]).
//!
//! ## Quick example: index by two keys
//!
//! ```rust
//! use record_reshape::ingestion::records_from_json_str;
//! use record_reshape::processing::{index_by, ReshapeOptions};
//! use record_reshape::types::{KeyPath, Value};
//!
//! # fn main() -> Result<(), record_reshape::ReshapeError> {
//! let rows = records_from_json_str(
//!     r#"[
//!         {"user": "a", "dept": "x", "val": 1},
//!         {"user": "b", "dept": "x", "val": 2},
//!         {"user": "c", "dept": "y", "val": 3}
//!     ]"#,
//! )?;
//!
//! let path = KeyPath::new(["dept", "user"])?;
//! let by_dept_user = index_by(&rows, &path, &ReshapeOptions::default());
//! assert_eq!(by_dept_user.depth(), 2);
//!
//! let b = by_dept_user.get_path(&["x", "b"]).and_then(|n| n.as_record()).unwrap();
//! assert_eq!(b.field("val"), Some(&Value::Int64(2)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Structured records
//!
//! Anything implementing `serde::Serialize` can be ingested as object-like records. Set
//! [`processing::ReshapeOptions::convert_objects`] to store them as plain maps in the result.
//!
//! ```rust
//! use record_reshape::ingestion::records_from_serialize;
//! use record_reshape::processing::{group_by, ReshapeOptions};
//! use record_reshape::types::{KeyPath, Value};
//!
//! #[derive(serde::Serialize)]
//! struct Ticket {
//!     id: u32,
//!     queue: String,
//! }
//!
//! # fn main() -> Result<(), record_reshape::ReshapeError> {
//! let rows = records_from_serialize(&[
//!     Ticket { id: 1, queue: "ops".into() },
//!     Ticket { id: 2, queue: "dev".into() },
//!     Ticket { id: 3, queue: "ops".into() },
//! ])?;
//!
//! let opts = ReshapeOptions { convert_objects: true, ..Default::default() };
//! let by_queue = group_by(&rows, &KeyPath::from("queue"), &opts);
//!
//! let ops = by_queue.get("ops").and_then(|n| n.as_group()).unwrap();
//! assert_eq!(ops.len(), 2);
//! assert!(matches!(ops[0], Value::Map(_)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the record data model and [`types::KeyPath`]
//! - [`processing`]: reshape, gather and extract, plus observer hooks for skipped records
//! - [`ingestion`]: JSON/NDJSON and `serde` struct ingestion
//! - [`error`]: error types used across the crate
//!
//! ### Tolerant vs strict
//!
//! Reshaping and gathering never fail on incomplete records: those are skipped (see
//! [`processing::ReshapeObserver`] for visibility). Only [`processing::get_content`] can be made
//! strict, returning [`ReshapeError::NotFound`] with the path that failed.

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{ReshapeError, ReshapeResult};
