use crate::record::{Record, TreeBuffer};

/// Reads a record buffer from the last record to the first.
///
/// Postfix layout means the first record returned is the outermost node of
/// the last top-level subtree.
#[derive(Clone, Debug)]
pub struct BufferCursor<'b> {
    buffer: &'b TreeBuffer,
    /// Records not yet read.
    pos: usize,
}

impl<'b> BufferCursor<'b> {
    pub fn new(buffer: &'b TreeBuffer) -> Self {
        Self {
            buffer,
            pos: buffer.len(),
        }
    }

    /// Index one past the next record to be read.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The next record without consuming it.
    pub fn peek(&self) -> Option<Record> {
        self.pos.checked_sub(1).map(|i| self.buffer.record(i))
    }

    /// Skip the subtree of the next record.
    pub fn skip_subtree(&mut self) {
        if let Some(record) = self.peek() {
            self.pos -= record.span().min(self.pos);
        }
    }
}

impl Iterator for BufferCursor<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let record = self.peek()?;
        self.pos -= 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pos, Some(self.pos))
    }
}

impl ExactSizeIterator for BufferCursor<'_> {}
