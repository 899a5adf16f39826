use crate::record::{REUSED, Record, TreeBuffer, pos};

#[test]
fn push_grows_by_doubling() {
    let mut buffer = TreeBuffer::new();
    assert_eq!(buffer.capacity(), 0);

    for i in 0..65 {
        buffer.push(Record::new(4, i, i + 1, 1));
    }

    assert_eq!(buffer.len(), 65);
    assert_eq!(buffer.capacity(), 128);
    assert_eq!(buffer.record(64), Record::new(4, 64, 65, 1));
}

#[test]
fn truncate_keeps_allocation() {
    let mut buffer = TreeBuffer::with_capacity(8);
    buffer.push(Record::new(4, 0, 1, 1));
    buffer.push(Record::new(5, 1, 2, 1));

    buffer.truncate(1);

    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.capacity(), 8);
    assert_eq!(buffer.last(), Some(Record::new(4, 0, 1, 1)));

    buffer.truncate(10);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn equality_ignores_spare_capacity() {
    let records = [Record::new(4, 0, 3, 1), Record::new(1, 0, 3, 2)];
    let mut roomy = TreeBuffer::with_capacity(32);
    for r in records {
        roomy.push(r);
    }

    assert_eq!(roomy, TreeBuffer::from_records(records));
    assert_eq!(roomy.as_slice(), &[4, 0, 3, 1, 1, 0, 3, 2]);
}

#[test]
fn reuse_record_spans_one_slot() {
    let record = Record::reuse(2, 10, 20);

    assert!(record.is_reuse());
    assert_eq!(record.size, REUSED);
    assert_eq!(record.ty, 2);
    assert_eq!(record.span(), 1);
    assert_eq!(Record::new(4, 0, 1, 3).span(), 3);
}

#[test]
fn records_iterate_both_ways() {
    let buffer = TreeBuffer::from_records([Record::new(4, 0, 1, 1), Record::new(5, 1, 2, 1)]);

    let tys: Vec<u32> = buffer.records().rev().map(|r| r.ty).collect();
    assert_eq!(tys, [5, 4]);
}

#[test]
fn positions_fit_records() {
    assert_eq!(pos(7), 7);
    assert_eq!(pos(u32::MAX as usize), u32::MAX);
}

#[test]
#[cfg(target_pointer_width = "64")]
#[should_panic(expected = "does not fit a record")]
fn position_past_4gib_panics() {
    pos(u32::MAX as usize + 1);
}
