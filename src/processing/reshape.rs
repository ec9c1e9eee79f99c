//! Multi-level keyed reshaping of record sequences.
//!
//! A [`KeyPath`] of `n` key names turns a flat sequence of records into a nested mapping of
//! depth `n`. Level `i` is keyed by the value each record holds for key `i`. What ends up at the
//! leaves depends on [`ReshapeMode`].
//!
//! Records that do not resolve the whole key path are skipped and never partially inserted.
//! Attach a [`ReshapeObserver`] via [`ReshapeOptions::observer`] to see them.
//!
//! ```rust
//! use record_reshape::processing::{index_by, ReshapeOptions};
//! use record_reshape::types::{KeyPath, Value};
//!
//! let rows = vec![
//!     Value::record([("user", "a"), ("dept", "x")]),
//!     Value::record([("user", "b"), ("dept", "x")]),
//!     Value::record([("user", "c")]),
//! ];
//! let path = KeyPath::new(["dept", "user"]).unwrap();
//! let out = index_by(&rows, &path, &ReshapeOptions::default());
//!
//! assert_eq!(out.depth(), 2);
//! assert_eq!(out.get_path(&["x", "b"]).and_then(|n| n.as_record()), Some(&rows[1]));
//! assert!(out.get_path(&["x", "c"]).is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::{KeyPath, Value};

use super::observability::{DropReason, ReshapeContext, ReshapeObserver, ReshapeStats};

/// One level of a reshaped result: bucket key to child node, in first-seen order.
pub type Branch = IndexMap<String, Reshaped>;

/// What a reshape run writes at the leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReshapeMode {
    /// The record itself; a later record with the same key path replaces an earlier one.
    Index,
    /// All records with the same key path, in input order.
    Group,
    /// An empty marker; only the key structure is kept.
    IndexOnly,
}

/// A node of a reshaped result.
#[derive(Debug, Clone, PartialEq)]
pub enum Reshaped {
    /// Intermediate (or root) level.
    Branch(Branch),
    /// Leaf written in [`ReshapeMode::Index`].
    Record(Value),
    /// Leaf written in [`ReshapeMode::Group`].
    Group(Vec<Value>),
    /// Leaf written in [`ReshapeMode::IndexOnly`].
    Marker,
}

impl Reshaped {
    /// Child node for `key` if this is a branch.
    pub fn get(&self, key: &str) -> Option<&Reshaped> {
        self.as_branch()?.get(key)
    }

    /// Follow `path` through nested branches.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Reshaped> {
        path.iter().try_fold(self, |node, key| node.get(key.as_ref()))
    }

    /// Number of branch levels from this node down to its deepest leaf.
    ///
    /// Leaves have depth 0; an empty branch has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Reshaped::Branch(children) => {
                1 + children.values().map(Reshaped::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Number of children of a branch, or of records in a group. Zero for other leaves.
    pub fn len(&self) -> usize {
        match self {
            Reshaped::Branch(children) => children.len(),
            Reshaped::Group(items) => items.len(),
            Reshaped::Record(_) | Reshaped::Marker => 0,
        }
    }

    /// Returns `true` if [`Self::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket keys of a branch, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_branch()
            .into_iter()
            .flat_map(|children| children.keys().map(String::as_str))
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Reshaped::Branch(children) => Some(children),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Value> {
        match self {
            Reshaped::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Value]> {
        match self {
            Reshaped::Group(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Reshaped::Marker)
    }

    /// All records stored under this node, depth-first in key order.
    pub fn leaf_records(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        collect_leaf_records(self, &mut out);
        out
    }

    /// Convert into a plain nested [`Value`].
    ///
    /// Branches become maps, groups become lists and markers become empty strings.
    pub fn into_value(self) -> Value {
        match self {
            Reshaped::Branch(children) => Value::Map(
                children
                    .into_iter()
                    .map(|(k, v)| (k, v.into_value()))
                    .collect(),
            ),
            Reshaped::Record(record) => record,
            Reshaped::Group(items) => Value::List(items),
            Reshaped::Marker => Value::Utf8(String::new()),
        }
    }
}

fn collect_leaf_records<'a>(node: &'a Reshaped, out: &mut Vec<&'a Value>) {
    match node {
        Reshaped::Branch(children) => {
            for child in children.values() {
                collect_leaf_records(child, out);
            }
        }
        Reshaped::Record(record) => out.push(record),
        Reshaped::Group(items) => out.extend(items.iter()),
        Reshaped::Marker => {}
    }
}

/// Options controlling a reshape run.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct ReshapeOptions {
    /// Convert object-like records to mapping-like records when storing them.
    pub convert_objects: bool,
    /// Optional observer for skipped records and run stats.
    pub observer: Option<Arc<dyn ReshapeObserver>>,
    /// Dropped-record count at which `on_alert` is invoked. `None` disables alerting; a run
    /// without drops never alerts.
    pub alert_after_drops: Option<usize>,
}

impl fmt::Debug for ReshapeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReshapeOptions")
            .field("convert_objects", &self.convert_objects)
            .field("observer_set", &self.observer.is_some())
            .field("alert_after_drops", &self.alert_after_drops)
            .finish()
    }
}

/// Reshape `records` into a nested mapping of depth `key_path.depth()`.
///
/// For each record, every key of `key_path` is looked up in order. If any key is absent, `null`,
/// or holds a composite value, the record is skipped and the result is left untouched.
/// Otherwise the record is written at the leaf according to `mode`.
///
/// The returned node is always a [`Reshaped::Branch`]. The input is not modified.
pub fn reshape(
    records: &[Value],
    key_path: &KeyPath,
    mode: ReshapeMode,
    options: &ReshapeOptions,
) -> Reshaped {
    let ctx = ReshapeContext {
        mode,
        key_path: key_path.clone(),
    };
    let mut stats = ReshapeStats {
        input: records.len(),
        ..Default::default()
    };
    let mut root = Branch::new();

    for (record_index, record) in records.iter().enumerate() {
        let keys = match resolve_keys(record, key_path) {
            Ok(keys) => keys,
            Err(reason) => {
                stats.dropped += 1;
                if let Some(obs) = options.observer.as_ref() {
                    obs.on_dropped(&ctx, record_index, &reason);
                }
                continue;
            }
        };
        let Some((leaf_key, parents)) = keys.split_last() else {
            continue;
        };

        let mut level = &mut root;
        for key in parents {
            level = child_branch(level, key);
        }

        match mode {
            ReshapeMode::Index => {
                level.insert(
                    leaf_key.clone(),
                    Reshaped::Record(leaf_payload(record, options.convert_objects)),
                );
            }
            ReshapeMode::Group => {
                let payload = leaf_payload(record, options.convert_objects);
                let node = level
                    .entry(leaf_key.clone())
                    .or_insert_with(|| Reshaped::Group(Vec::new()));
                match node {
                    Reshaped::Group(items) => items.push(payload),
                    other => *other = Reshaped::Group(vec![payload]),
                }
            }
            ReshapeMode::IndexOnly => {
                level.insert(leaf_key.clone(), Reshaped::Marker);
            }
        }
        stats.accepted += 1;
    }

    if let Some(obs) = options.observer.as_ref() {
        obs.on_finished(&ctx, stats);
        if options
            .alert_after_drops
            .is_some_and(|threshold| stats.dropped > 0 && stats.dropped >= threshold)
        {
            obs.on_alert(&ctx, stats);
        }
    }

    Reshaped::Branch(root)
}

/// Index records by `key_path`; the last record per key path wins.
pub fn index_by(records: &[Value], key_path: &KeyPath, options: &ReshapeOptions) -> Reshaped {
    reshape(records, key_path, ReshapeMode::Index, options)
}

/// Group records by `key_path`, preserving input order within each group.
pub fn group_by(records: &[Value], key_path: &KeyPath, options: &ReshapeOptions) -> Reshaped {
    reshape(records, key_path, ReshapeMode::Group, options)
}

/// Build only the key structure of `key_path`, without record data.
pub fn index_only(records: &[Value], key_path: &KeyPath, options: &ReshapeOptions) -> Reshaped {
    reshape(records, key_path, ReshapeMode::IndexOnly, options)
}

fn resolve_keys(record: &Value, key_path: &KeyPath) -> Result<Vec<String>, DropReason> {
    key_path
        .keys()
        .iter()
        .map(|key| {
            let value = record
                .field(key)
                .ok_or_else(|| DropReason::MissingKey { key: key.clone() })?;
            value
                .as_key()
                .ok_or_else(|| DropReason::UnkeyableValue { key: key.clone() })
        })
        .collect()
}

// Intermediate levels are always branches because every accepted record resolves the same
// number of keys.
fn child_branch<'a>(level: &'a mut Branch, key: &str) -> &'a mut Branch {
    let node = level
        .entry(key.to_string())
        .or_insert_with(|| Reshaped::Branch(Branch::new()));
    if !matches!(node, Reshaped::Branch(_)) {
        *node = Reshaped::Branch(Branch::new());
    }
    match node {
        Reshaped::Branch(children) => children,
        _ => unreachable!("node was just replaced by a branch"),
    }
}

fn leaf_payload(record: &Value, convert_objects: bool) -> Value {
    if convert_objects {
        record.clone().into_mapping()
    } else {
        record.clone()
    }
}
