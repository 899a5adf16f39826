//! Flat record storage.
//!
//! Each record is four `u32`s: `(type, from, to, size)`. Records are written
//! in postfix order (children before their parent) and `size` counts the
//! records of the subtree, the record itself included. A record whose `size`
//! is [`REUSED`] stands for a whole precompiled subtree; its `type` field
//! indexes the reused-subtree list.

use crate::invariants::ensure_pos;

/// Words per record.
pub const RECORD_LEN: usize = 4;

/// `size` marker for reuse records.
pub const REUSED: u32 = u32::MAX;

const INITIAL_RECORDS: usize = 64;

/// One decoded record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub ty: u32,
    pub from: u32,
    pub to: u32,
    pub size: u32,
}

impl Record {
    pub fn new(ty: u32, from: u32, to: u32, size: u32) -> Self {
        Self { ty, from, to, size }
    }

    /// Reference to `reused[index]` covering `from..to`.
    pub fn reuse(index: u32, from: u32, to: u32) -> Self {
        Self::new(index, from, to, REUSED)
    }

    #[inline]
    pub fn is_reuse(&self) -> bool {
        self.size == REUSED
    }

    /// Records covered by this one, itself included.
    #[inline]
    pub fn span(&self) -> usize {
        if self.is_reuse() { 1 } else { self.size as usize }
    }
}

/// Document position to record field.
///
/// # Panics
///
/// If `p` does not fit in a `u32`.
#[inline]
pub fn pos(p: usize) -> u32 {
    ensure_pos(p)
}

/// Growable record buffer.
///
/// Storage is allocated in whole records and doubled when full; `truncate`
/// keeps the allocation for the next parse.
#[derive(Clone, Default)]
pub struct TreeBuffer {
    words: Vec<u32>,
    len: usize,
}

impl TreeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(records: usize) -> Self {
        Self {
            words: vec![0; records * RECORD_LEN],
            len: 0,
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut buffer = Self::new();
        for record in records {
            buffer.push(record);
        }
        buffer
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated records.
    pub fn capacity(&self) -> usize {
        self.words.len() / RECORD_LEN
    }

    pub fn push(&mut self, record: Record) {
        if self.len == self.capacity() {
            self.grow();
        }
        let at = self.len * RECORD_LEN;
        self.words[at..at + RECORD_LEN].copy_from_slice(&[
            record.ty,
            record.from,
            record.to,
            record.size,
        ]);
        self.len += 1;
    }

    fn grow(&mut self) {
        let records = (self.capacity() * 2).max(INITIAL_RECORDS);
        self.words.resize(records * RECORD_LEN, 0);
    }

    /// Drop records past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn record(&self, index: usize) -> Record {
        let at = index * RECORD_LEN;
        let w = &self.words[at..at + RECORD_LEN];
        Record::new(w[0], w[1], w[2], w[3])
    }

    pub fn last(&self) -> Option<Record> {
        self.len.checked_sub(1).map(|i| self.record(i))
    }

    /// The used words, four per record.
    pub fn as_slice(&self) -> &[u32] {
        &self.words[..self.len * RECORD_LEN]
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = Record> + '_ {
        (0..self.len).map(|i| self.record(i))
    }
}

impl PartialEq for TreeBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TreeBuffer {}

impl std::fmt::Debug for TreeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.records()).finish()
    }
}
