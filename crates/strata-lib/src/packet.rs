//! Ordered chunk sequence with the scope stack open at its end.

use strata_core::NodeTypeId;
use strata_engine::Token;

use crate::chunk::Chunk;

/// Default token capacity of one chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

#[derive(Clone, Debug)]
pub struct Packet {
    chunks: Vec<Chunk>,
    /// Scopes open after the last chunk.
    stack: Vec<NodeTypeId>,
    chunk_size: usize,
    /// No token added since the last top-level match ended.
    at_boundary: bool,
}

impl Default for Packet {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Packet {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunks: Vec::new(),
            stack: Vec::new(),
            chunk_size: chunk_size.max(1),
            at_boundary: true,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub(crate) fn chunk_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        self.chunks.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn stack(&self) -> &[NodeTypeId] {
        &self.stack
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Start of the first chunk.
    pub fn from(&self) -> usize {
        self.chunks.first().map_or(0, Chunk::from)
    }

    /// End of the last chunk.
    pub fn end(&self) -> usize {
        self.chunks.last().map_or(0, Chunk::to)
    }

    /// Whether the sequence ends on a pure chunk.
    pub fn is_sealed(&self) -> bool {
        self.chunks.last().is_some_and(Chunk::is_pure)
    }

    /// Append a token, opening a new chunk when it opens a node, the last
    /// chunk closed one or is full. A pure chunk marks every point where the
    /// scope stack is empty between chunks.
    pub fn add(&mut self, token: &Token) {
        let new_chunk = match self.chunks.last() {
            None => true,
            Some(last) => {
                last.is_pure()
                    || !token.opens.is_empty()
                    || !last.closes().is_empty()
                    || last.len() >= self.chunk_size
            }
        };
        if new_chunk {
            if self.stack.is_empty() && !self.is_sealed() {
                let mut pure = Chunk::pure(token.from);
                pure.boundary = self.at_boundary;
                self.chunks.push(pure);
            }
            self.chunks.push(Chunk::new(token.from, self.stack.clone()));
        }

        if let Some(chunk) = self.chunks.last_mut() {
            chunk.push(token);
        }
        self.at_boundary = false;
        self.stack.extend_from_slice(&token.opens);
        let closed = token.closes.len().min(self.stack.len());
        self.stack.truncate(self.stack.len() - closed);

        if closed > 0 && self.stack.is_empty() {
            self.chunks.push(Chunk::pure(token.to));
        }
    }

    /// Mark the end of a top-level match.
    pub fn end_match(&mut self) {
        self.at_boundary = true;
        if let Some(last) = self.chunks.last_mut()
            && last.is_pure()
        {
            last.boundary = true;
        }
    }

    /// Whether parsing can restart at chunk `index` from an empty state.
    ///
    /// The chunk must be a pure match boundary, and its position must not
    /// depend on the token after it: it is first, or follows a chunk that
    /// closed a node or filled up.
    pub fn is_restart(&self, index: usize) -> bool {
        let Some(chunk) = self.chunks.get(index) else {
            return false;
        };
        if !chunk.is_pure() || !chunk.is_boundary() {
            return false;
        }
        match index.checked_sub(1).map(|i| &self.chunks[i]) {
            None => true,
            Some(prev) => !prev.closes().is_empty() || prev.len() >= self.chunk_size,
        }
    }

    /// Last restart chunk starting at or before `pos`.
    pub fn find_pure_before(&self, pos: usize) -> Option<usize> {
        let end = self.chunks.partition_point(|c| c.from <= pos);
        (0..end).rev().find(|&i| self.is_restart(i))
    }

    /// First pure match boundary starting at or after `pos`.
    pub fn find_pure_after(&self, pos: usize) -> Option<usize> {
        let start = self.chunks.partition_point(|c| c.from < pos);
        (start..self.chunks.len()).find(|&i| {
            let chunk = &self.chunks[i];
            chunk.is_pure() && chunk.is_boundary()
        })
    }

    /// Split off chunks `at..`. `self` keeps the scope stack open before them.
    pub fn split(&mut self, at: usize) -> Packet {
        let at = at.min(self.chunks.len());
        let chunks = self.chunks.split_off(at);
        let stack = match chunks.first() {
            Some(first) => std::mem::replace(&mut self.stack, first.scopes().to_vec()),
            None => self.stack.clone(),
        };
        Packet {
            chunks,
            stack,
            chunk_size: self.chunk_size,
            at_boundary: self.at_boundary,
        }
    }

    /// Slide chunks `from_index..` by `delta`.
    pub fn offset(&mut self, from_index: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for chunk in self.chunks.iter_mut().skip(from_index) {
            chunk.slide(delta);
        }
    }

    /// Append `other`, dropping its leading pure chunk when `self` already
    /// ends on one.
    pub fn append(&mut self, other: Packet) {
        let mut chunks = other.chunks.into_iter().peekable();
        if self.is_sealed() && chunks.peek().is_some_and(Chunk::is_pure) {
            chunks.next();
        }
        self.chunks.extend(chunks);
        self.stack = other.stack;
        self.at_boundary = other.at_boundary;
    }

    /// Take every chunk, leaving the packet empty.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Chunk> {
        self.chunks.drain(..)
    }
}
