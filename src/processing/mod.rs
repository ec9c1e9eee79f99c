//! In-memory record transformations.
//!
//! Everything here operates on [`crate::types::Value`] records, either built directly or produced
//! by [`crate::ingestion`]. Every function is pure: inputs are borrowed, results are new values.
//!
//! Currently implemented:
//!
//! - [`reshape()`] ([`index_by()`], [`group_by()`], [`index_only()`]): multi-level keyed reshaping
//! - [`gather()`]: distinct values across several columns, flat or bucketed
//! - [`get_content()`]: nested value extraction with optional strict failure
//!
//! ## Example: group, then gather, then extract
//!
//! ```rust
//! use record_reshape::processing::{gather, get_content, group_by, ColumnSpec, ReshapeOptions};
//! use record_reshape::types::{KeyPath, Value};
//!
//! let row = |user: &str, dept: &str, val: i64| {
//!     Value::record([
//!         ("user", Value::from(user)),
//!         ("dept", Value::from(dept)),
//!         ("val", Value::from(val)),
//!     ])
//! };
//! let rows = vec![row("a", "x", 1), row("b", "x", 2), row("c", "y", 3)];
//!
//! let grouped = group_by(&rows, &KeyPath::from("dept"), &ReshapeOptions::default());
//! assert_eq!(grouped.get("x").and_then(|n| n.as_group()).map(|g| g.len()), Some(2));
//!
//! let depts = gather(&Value::List(rows.clone()), &ColumnSpec::columns(["dept"]), 1);
//! assert_eq!(depts.values().keys().collect::<Vec<_>>(), vec!["x", "y"]);
//!
//! let as_value = grouped.into_value();
//! let first_y = get_content(&as_value, &["y", "0", "user"], true).unwrap();
//! assert_eq!(*first_y, Value::from("c"));
//! ```

pub mod extract;
pub mod gather;
pub mod observability;
pub mod reshape;

pub use extract::{get_content, try_get};
pub use gather::{gather, gather_rows, ColumnEntry, ColumnSpec, DistinctValues, Gathered};
pub use observability::{
    CompositeObserver, DropReason, ReshapeContext, ReshapeObserver, ReshapeStats, StdErrObserver,
};
pub use reshape::{
    group_by, index_by, index_only, reshape, Branch, ReshapeMode, ReshapeOptions, Reshaped,
};
