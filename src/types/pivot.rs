//! Pivot types: schema-free records, calendar buckets, grouped output

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Bucket key produced when a record's date field fails to parse.
/// Always excluded from grouping, regardless of the selected bucket.
pub const NAN_SENTINEL: &str = "NaN-NaN";

/// Schema-free input row: field name to raw JSON value.
///
/// Input data is externally sourced and heterogeneous, so no schema is
/// imposed beyond the one date-like field named by the caller.
pub type Record = HashMap<String, serde_json::Value>;

/// Calendar bucket used to partition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BucketField {
    Month,
    Year,
    Week,
}

impl BucketField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketField::Month => "month",
            BucketField::Year => "year",
            BucketField::Week => "week",
        }
    }
}

impl fmt::Display for BucketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record extended with its derived calendar bucket keys.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedRecord {
    pub record: Record,
    /// `"{year}-{month}"` with a one-based month (no zero-padding), or the
    /// NaN sentinel when the date failed to parse.
    pub month: String,
    /// Calendar year; `None` when the date failed to parse.
    pub year: Option<i32>,
    /// Week-of-year; `None` when the date failed to parse.
    pub week: Option<u32>,
    /// Epoch milliseconds; 0 when the date failed to parse.
    pub numeric_date: i64,
}

impl DecoratedRecord {
    /// Candidate group key for the selected bucket, or `None` when the key
    /// is numerically invalid and must contribute to no group.
    ///
    /// Month keys are compound strings, so the numeric-validity screen that
    /// drops unparseable year/week buckets never applies to them; the NaN
    /// sentinel is the only month value rejected. This asymmetry between
    /// modes is intentional and must be preserved.
    pub fn bucket_key(&self, field: BucketField) -> Option<String> {
        match field {
            BucketField::Month if self.month == NAN_SENTINEL => None,
            BucketField::Month => Some(self.month.clone()),
            BucketField::Year => self.year.map(|y| y.to_string()),
            BucketField::Week => self.week.map(|w| w.to_string()),
        }
    }
}

/// Groups of decorated records in first-seen key order.
///
/// Backed by a Vec of pairs rather than a map so iteration follows the order
/// in which keys first occur in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRecords {
    groups: Vec<(String, Vec<DecoratedRecord>)>,
}

impl GroupedRecords {
    /// Append a record to its group, creating the group on first encounter.
    pub fn push(&mut self, key: String, record: DecoratedRecord) {
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(record),
            None => self.groups.push((key, vec![record])),
        }
    }

    /// Members of the group for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&[DecoratedRecord]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, members)| members.as_slice())
    }

    /// Iterate groups in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DecoratedRecord])> {
        self.groups
            .iter()
            .map(|(k, members)| (k.as_str(), members.as_slice()))
    }

    /// Group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Narrow to the single group whose key matches exactly.
    pub fn retain_key(self, key: &str) -> Self {
        Self {
            groups: self.groups.into_iter().filter(|(k, _)| k == key).collect(),
        }
    }
}

/// One output row/data point: a group key paired with the sum of its
/// members' numeric timestamps. Used as-is for both chart series and
/// table rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub label: String,
    pub value: i64,
}
