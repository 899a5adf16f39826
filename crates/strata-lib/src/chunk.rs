//! Chunks: the unit of cached tokenization.

use std::sync::Arc;

use strata_buffer::{Subtree, TreeBuffer, pos};
use strata_core::NodeTypeId;
use strata_engine::Token;

use crate::compiler::{Open, Snapshot, emit_token};
use crate::invariants::ensure_chunk_order;

/// Words per stored token: `(id, from, to)`, positions relative to the chunk.
const TOKEN_LEN: usize = 3;

/// Cached answer to "can this chunk be a standalone subtree".
#[derive(Clone, Debug, Default)]
pub enum ChunkTree {
    #[default]
    NotComputed,
    /// Tokens changed after the verdict was computed.
    Invalid,
    /// `None` when the chunk is not convertible.
    Cached(Option<Arc<Subtree>>),
}

/// A run of tokens between two scope-relevant boundaries.
///
/// Only the first token may open nodes and only the last may close them, so
/// `opens` and `closes` describe the chunk's edges.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub(crate) from: usize,
    pub(crate) to: usize,
    tokens: Vec<u32>,
    /// Scope stack inherited from the chunk before.
    scopes: Vec<NodeTypeId>,
    opens: Vec<NodeTypeId>,
    closes: Vec<NodeTypeId>,
    pub(crate) tree: ChunkTree,
    /// Pure chunk sitting between two top-level matches.
    pub(crate) boundary: bool,
    /// Compiler state just before this chunk was compiled.
    pub(crate) snapshot: Option<Snapshot>,
}

impl Chunk {
    pub(crate) fn new(from: usize, scopes: Vec<NodeTypeId>) -> Self {
        Self {
            from,
            to: from,
            tokens: Vec::new(),
            scopes,
            opens: Vec::new(),
            closes: Vec::new(),
            tree: ChunkTree::NotComputed,
            boundary: false,
            snapshot: None,
        }
    }

    /// Empty, scope-free chunk.
    pub(crate) fn pure(at: usize) -> Self {
        Self::new(at, Vec::new())
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len() / TOKEN_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn scopes(&self) -> &[NodeTypeId] {
        &self.scopes
    }

    pub fn opens(&self) -> &[NodeTypeId] {
        &self.opens
    }

    pub fn closes(&self) -> &[NodeTypeId] {
        &self.closes
    }

    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot
    }

    /// Tokens as `(id, from, to)`, relative to [`Chunk::from`].
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = (NodeTypeId, usize, usize)> + '_ {
        self.tokens
            .chunks_exact(TOKEN_LEN)
            .map(|t| (t[0] as NodeTypeId, t[1] as usize, t[2] as usize))
    }

    /// No tokens, no inherited scope, nothing opened or closed, zero length.
    pub fn is_pure(&self) -> bool {
        self.tokens.is_empty()
            && self.scopes.is_empty()
            && self.opens.is_empty()
            && self.closes.is_empty()
            && self.from == self.to
    }

    /// More than one token and every node it opens is closed inside it.
    pub fn is_convertible(&self) -> bool {
        self.len() > 1 && self.opens.iter().rev().eq(self.closes.iter())
    }

    pub(crate) fn push(&mut self, token: &Token) {
        ensure_chunk_order(self.from, self.is_empty(), token);
        if self.is_empty() {
            self.opens.clone_from(&token.opens);
        }
        self.closes.clone_from(&token.closes);
        self.tokens.extend([
            u32::from(token.id),
            pos(token.from.saturating_sub(self.from)),
            pos(token.to.saturating_sub(self.from)),
        ]);
        self.to = self.to.max(token.to);
        if !matches!(self.tree, ChunkTree::NotComputed) {
            self.tree = ChunkTree::Invalid;
        }
    }

    /// Shift the chunk by `delta`. Token positions are relative and stay put.
    pub(crate) fn slide(&mut self, delta: isize) {
        self.from = self.from.saturating_add_signed(delta);
        self.to = self.to.saturating_add_signed(delta);
    }

    /// Same tokens and edges, wherever the chunk sits.
    pub fn same_content(&self, other: &Chunk) -> bool {
        self.to - self.from == other.to - other.from
            && self.tokens == other.tokens
            && self.opens == other.opens
            && self.closes == other.closes
    }

    /// The cached subtree, if one was computed and the chunk is convertible.
    pub fn cached_subtree(&self) -> Option<Arc<Subtree>> {
        match &self.tree {
            ChunkTree::Cached(tree) => tree.clone(),
            _ => None,
        }
    }

    pub(crate) fn is_computed(&self) -> bool {
        matches!(self.tree, ChunkTree::Cached(_))
    }

    /// The chunk as a standalone subtree, computed on demand.
    pub fn subtree(&mut self) -> Option<Arc<Subtree>> {
        if let ChunkTree::Cached(tree) = &self.tree {
            return tree.clone();
        }
        let tree = self.is_convertible().then(|| Arc::new(self.build_subtree()));
        self.tree = ChunkTree::Cached(tree.clone());
        tree
    }

    fn build_subtree(&self) -> Subtree {
        let mut buffer = TreeBuffer::with_capacity(self.len());
        let mut stack: Vec<Open> = Vec::new();
        self.emit(&mut buffer, &mut stack, 0);
        Subtree {
            buffer,
            length: pos(self.to - self.from),
        }
    }

    /// Emit every token as records, positions shifted by `shift`.
    pub(crate) fn emit(&self, buffer: &mut TreeBuffer, stack: &mut Vec<Open>, shift: usize) {
        let last = self.len().saturating_sub(1);
        for (i, (id, from, to)) in self.tokens().enumerate() {
            let opens: &[NodeTypeId] = if i == 0 { &self.opens } else { &[] };
            let closes: &[NodeTypeId] = if i == last { &self.closes } else { &[] };
            emit_token(buffer, stack, (id, from + shift, to + shift), opens, closes);
        }
    }
}
