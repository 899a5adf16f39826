//! Chunk sequence to flat record buffer.
//!
//! Chunks are compiled in order. A convertible chunk becomes one reuse
//! record pointing at its cached subtree; any other chunk emits one record
//! per named token plus one per node it closes.

use std::sync::Arc;

use strata_buffer::{CompiledTree, Record, Subtree, TreeBuffer, pos};
use strata_core::{NodeId, NodeTypeId};

use crate::invariants::ensure_rewind_target;
use crate::packet::Packet;

/// A node opened but not yet closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Open {
    id: NodeTypeId,
    from: u32,
    /// Buffer length when the node opened.
    start: usize,
}

/// Compiler counters, saved per chunk so a later parse can roll back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub records: usize,
    pub reused: usize,
    pub max_chunk: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    buffer: TreeBuffer,
    reused: Vec<Arc<Subtree>>,
    stack: Vec<Open>,
    /// Next chunk to compile.
    index: usize,
    /// Most tokens seen in one chunk.
    max_chunk: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    /// Records emitted so far.
    pub fn buffer(&self) -> &TreeBuffer {
        &self.buffer
    }

    pub fn reused(&self) -> &[Arc<Subtree>] {
        &self.reused
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.buffer.len(),
            reused: self.reused.len(),
            max_chunk: self.max_chunk,
        }
    }

    /// Compile the next chunk of `packet`. Returns `false` when none is left.
    pub fn step(&mut self, packet: &mut Packet) -> bool {
        let snapshot = self.snapshot();
        let Some(chunk) = packet.chunk_mut(self.index) else {
            return false;
        };
        chunk.snapshot = Some(snapshot);
        self.index += 1;
        self.max_chunk = self.max_chunk.max(chunk.len());

        if let Some(tree) = chunk.subtree() {
            let index = pos(self.reused.len());
            self.buffer
                .push(Record::reuse(index, pos(chunk.from), pos(chunk.to)));
            self.reused.push(tree);
        } else {
            chunk.emit(&mut self.buffer, &mut self.stack, chunk.from);
        }
        true
    }

    /// Roll back to just before chunk `index` of `packet` was compiled.
    ///
    /// The chunk must be pure and already compiled.
    pub fn rewind(&mut self, packet: &Packet, index: usize) {
        let snapshot = ensure_rewind_target(packet, index);
        self.buffer.truncate(snapshot.records);
        self.reused.truncate(snapshot.reused);
        self.max_chunk = snapshot.max_chunk;
        self.stack.clear();
        self.index = index;
    }

    /// The tree for `0..length`.
    ///
    /// Nodes still open get an `incomplete` marker and a close at `length`;
    /// everything is wrapped in one `top` record. The compiler is left as is.
    pub fn finish(&self, length: usize) -> CompiledTree {
        let end = pos(length);
        let mut buffer = self.buffer.clone();
        for open in self.stack.iter().rev() {
            buffer.push(Record::new(u32::from(NodeId::Incomplete.id()), end, end, 1));
            let size = buffer.len() - open.start + 1;
            buffer.push(Record::new(u32::from(open.id), open.from, end, pos(size)));
        }
        let size = buffer.len() + 1;
        buffer.push(Record::new(u32::from(NodeId::Top.id()), 0, end, pos(size)));

        CompiledTree {
            buffer,
            reused: self.reused.clone(),
            length,
        }
    }
}

/// Emit one token: open its nodes, write its record, close its nodes.
pub(crate) fn emit_token(
    buffer: &mut TreeBuffer,
    stack: &mut Vec<Open>,
    (id, from, to): (NodeTypeId, usize, usize),
    opens: &[NodeTypeId],
    closes: &[NodeTypeId],
) {
    for &open in opens {
        stack.push(Open {
            id: open,
            from: pos(from),
            start: buffer.len(),
        });
    }
    if id != NodeId::None.id() {
        buffer.push(Record::new(u32::from(id), pos(from), pos(to), 1));
    }
    for _ in closes {
        let Some(open) = stack.pop() else {
            break;
        };
        let size = buffer.len() - open.start + 1;
        buffer.push(Record::new(u32::from(open.id), open.from, pos(to), pos(size)));
    }
}
