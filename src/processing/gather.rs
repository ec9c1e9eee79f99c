//! Distinct-value gathering across several columns in a single pass.
//!
//! [`gather`] generalizes "distinct values of one column" to:
//!
//! - several columns merged into one set ([`ColumnEntry::Column`])
//! - several independent, labelled sets ([`ColumnEntry::Bucket`])
//!
//! Sets are expressed as mappings from the value's key form to the value itself, so the first
//! occurrence fixes the position and later duplicates collapse onto it.

use indexmap::IndexMap;

use crate::types::{Record, Value};

/// A set of distinct values keyed by [`Value::as_key`].
pub type DistinctValues = IndexMap<String, Value>;

/// One entry of a [`ColumnSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEntry {
    /// Values of this column go into the flat set.
    Column(String),
    /// Values of all `columns` go into the set named `label`.
    Bucket { label: String, columns: Vec<String> },
}

/// Which columns to gather, and where to put their values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSpec {
    entries: Vec<ColumnEntry>,
}

impl ColumnSpec {
    /// An empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec where every column feeds the flat set.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: columns
                .into_iter()
                .map(|c| ColumnEntry::Column(c.into()))
                .collect(),
        }
    }

    /// Add a column feeding the flat set.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.entries.push(ColumnEntry::Column(name.into()));
        self
    }

    /// Add a labelled set fed by `columns`.
    pub fn bucket<I, S>(mut self, label: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(ColumnEntry::Bucket {
            label: label.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn entries(&self) -> &[ColumnEntry] {
        &self.entries
    }
}

/// Result of [`gather`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gathered {
    values: DistinctValues,
    buckets: IndexMap<String, DistinctValues>,
}

impl Gathered {
    /// The flat set fed by [`ColumnEntry::Column`] entries.
    pub fn values(&self) -> &DistinctValues {
        &self.values
    }

    /// A labelled set. Buckets are created on the first value found for them.
    pub fn bucket(&self, label: &str) -> Option<&DistinctValues> {
        self.buckets.get(label)
    }

    /// Labels of all non-empty buckets, in creation order.
    pub fn bucket_labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Returns `true` if the flat set contains a value with key form `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Size of the flat set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing at all was gathered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.buckets.is_empty()
    }

    /// Merge everything into a single mapping: flat values first, then one nested mapping per
    /// bucket label. A bucket label equal to a flat key replaces that entry.
    pub fn into_value(self) -> Value {
        let mut out: Record = self.values;
        for (label, set) in self.buckets {
            out.insert(label, Value::Map(set));
        }
        Value::Map(out)
    }
}

/// Gather distinct column values from `data`.
///
/// `object_depth` is the nesting level at which records live: `1` means `data` is a collection
/// of records, `2` a collection of collections of records, and so on (`0` is treated like `1`).
/// Collections may be lists, maps or objects; records may be maps or objects. Anything else is
/// skipped, as are missing and `null` columns.
pub fn gather(data: &Value, spec: &ColumnSpec, object_depth: usize) -> Gathered {
    let mut out = Gathered::default();
    gather_into(data, spec, object_depth, &mut out);
    out
}

/// Gather distinct column values from a slice of records.
pub fn gather_rows(rows: &[Value], spec: &ColumnSpec) -> Gathered {
    let mut out = Gathered::default();
    for row in rows {
        collect_row(row, spec, &mut out);
    }
    out
}

fn gather_into(data: &Value, spec: &ColumnSpec, object_depth: usize, out: &mut Gathered) {
    if object_depth > 1 {
        for child in elements(data) {
            gather_into(child, spec, object_depth - 1, out);
        }
    } else {
        for row in elements(data) {
            collect_row(row, spec, out);
        }
    }
}

fn elements(data: &Value) -> impl Iterator<Item = &Value> {
    let items = match data {
        Value::List(items) => Some(items),
        _ => None,
    };
    items
        .into_iter()
        .flatten()
        .chain(data.fields().into_iter().flat_map(|fields| fields.values()))
}

fn collect_row(row: &Value, spec: &ColumnSpec, out: &mut Gathered) {
    let Some(fields) = row.fields() else {
        return;
    };

    for entry in spec.entries() {
        match entry {
            ColumnEntry::Column(column) => {
                if let Some((key, value)) = distinct_entry(fields, column) {
                    out.values.insert(key, value.clone());
                }
            }
            ColumnEntry::Bucket { label, columns } => {
                for column in columns {
                    if let Some((key, value)) = distinct_entry(fields, column) {
                        out.buckets
                            .entry(label.clone())
                            .or_default()
                            .insert(key, value.clone());
                    }
                }
            }
        }
    }
}

fn distinct_entry<'a>(fields: &'a Record, column: &str) -> Option<(String, &'a Value)> {
    let value = fields.get(column).filter(|v| !v.is_null())?;
    Some((value.as_key()?, value))
}
