use std::cmp::Ordering;

use crate::model::RawRecord;

/// Sorts records into display order: `created_at` ascending, then `sequence`.
///
/// Concurrent writers can share a millisecond timestamp, so the sequence
/// number is the tie-break.
pub fn order(mut records: Vec<RawRecord>) -> Vec<RawRecord> {
    records.sort_by(compare_records);
    records
}

pub fn compare_records(left: &RawRecord, right: &RawRecord) -> Ordering {
    left.created_at
        .cmp(&right.created_at)
        .then_with(|| left.sequence.cmp(&right.sequence))
}
