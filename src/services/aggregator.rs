//! Aggregator service: the decorate → group → filter → reduce pipeline

use crate::services::decomposer;
use crate::types::{AggregateRow, BucketField, DecoratedRecord, GroupedRecords, Record};

/// Aggregator for pivoting records into calendar buckets
///
/// Every method is a pure function of its inputs; the caller owns the
/// current bucket selection and filter string and passes them in on each
/// invocation.
pub struct Aggregator;

impl Aggregator {
    /// Decorate every record with its derived calendar bucket keys.
    pub fn decorate(records: Vec<Record>, date_field: &str) -> Vec<DecoratedRecord> {
        records
            .into_iter()
            .map(|record| decomposer::decorate(record, date_field))
            .collect()
    }

    /// Partition decorated records by the selected bucket in a single pass.
    ///
    /// Records whose candidate key models an unparseable date contribute to
    /// no group; surviving groups keep first-seen key order and are
    /// non-empty by construction.
    pub fn group(records: Vec<DecoratedRecord>, bucket: BucketField) -> GroupedRecords {
        let mut grouped = GroupedRecords::default();
        for record in records {
            let Some(key) = record.bucket_key(bucket) else {
                continue;
            };
            grouped.push(key, record);
        }
        grouped
    }

    /// Narrow the grouped mapping to a single exact-match key.
    ///
    /// An absent or empty filter passes the mapping through unchanged; no
    /// other key is ever excluded at this stage.
    pub fn filter(grouped: GroupedRecords, filter: Option<&str>) -> GroupedRecords {
        match filter {
            Some(key) if !key.is_empty() => grouped.retain_key(key),
            _ => grouped,
        }
    }

    /// Collapse each group into one row: its key plus the sum of member
    /// timestamps, in the mapping's iteration order. The same rows feed
    /// both chart series and table consumers.
    pub fn reduce(grouped: &GroupedRecords) -> Vec<AggregateRow> {
        grouped
            .iter()
            .map(|(key, members)| AggregateRow {
                label: key.to_string(),
                value: members.iter().map(|m| m.numeric_date).sum(),
            })
            .collect()
    }

    /// The filtered grouped mapping, for consumers that need per-record
    /// detail rather than just sums.
    pub fn grouped(
        records: Vec<Record>,
        date_field: &str,
        bucket: BucketField,
        filter: Option<&str>,
    ) -> GroupedRecords {
        let decorated = Self::decorate(records, date_field);
        Self::filter(Self::group(decorated, bucket), filter)
    }

    /// Full pipeline: decorate → group → filter → reduce.
    pub fn pivot(
        records: Vec<Record>,
        date_field: &str,
        bucket: BucketField,
        filter: Option<&str>,
    ) -> Vec<AggregateRow> {
        Self::reduce(&Self::grouped(records, date_field, bucket, filter))
    }
}
