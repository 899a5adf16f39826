//! Buffer invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::record::Record;

/// Records a node spans, checked against what precedes it.
pub(crate) fn ensure_size(record: Record, available: usize) -> usize {
    let size = record.span();
    if size == 0 || size > available {
        panic!(
            "TreeBuffer: record {record:?} claims {size} records but only {available} precede it"
        );
    }
    size
}

/// Document position as a record field. Records address at most 4 GiB.
pub(crate) fn ensure_pos(p: usize) -> u32 {
    match u32::try_from(p) {
        Ok(p) => p,
        Err(_) => panic!("TreeBuffer: position {p} does not fit a record"),
    }
}
