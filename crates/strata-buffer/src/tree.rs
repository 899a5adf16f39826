//! Compiled output handed to the host.

use std::sync::Arc;

use strata_core::NodeTypeId;

use crate::cursor::BufferCursor;
use crate::invariants::ensure_size;
use crate::record::TreeBuffer;

/// A precompiled run of records, positions relative to its start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtree {
    pub buffer: TreeBuffer,
    pub length: u32,
}

/// Flat record buffer plus the subtrees its reuse records point at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTree {
    pub buffer: TreeBuffer,
    pub reused: Vec<Arc<Subtree>>,
    /// Length of the document span the tree covers.
    pub length: usize,
}

/// Decoded node, for inspection and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub ty: NodeTypeId,
    pub from: usize,
    pub to: usize,
    pub children: Vec<TreeNode>,
    /// Set on the roots of an expanded reuse record.
    pub reused: Option<usize>,
}

impl CompiledTree {
    /// Back-to-front cursor over the main buffer.
    pub fn cursor(&self) -> BufferCursor<'_> {
        BufferCursor::new(&self.buffer)
    }

    /// Decode the top-level nodes, expanding reuse records.
    pub fn children(&self) -> Vec<TreeNode> {
        decode(&self.buffer, &self.reused, 0, self.buffer.len(), 0, None)
    }

    /// The single root node, if the buffer holds exactly one.
    pub fn root(&self) -> Option<TreeNode> {
        let mut roots = self.children();
        if roots.len() == 1 { roots.pop() } else { None }
    }

    /// Total records once reuse records are expanded.
    pub fn expanded_len(&self) -> usize {
        self.buffer
            .records()
            .map(|r| {
                if r.is_reuse() {
                    self.reused[r.ty as usize].buffer.len()
                } else {
                    1
                }
            })
            .sum()
    }
}

fn decode(
    buffer: &TreeBuffer,
    reused: &[Arc<Subtree>],
    start: usize,
    end: usize,
    shift: usize,
    reuse_index: Option<usize>,
) -> Vec<TreeNode> {
    let mut out = Vec::new();
    let mut i = end;
    while i > start {
        let record = buffer.record(i - 1);
        if record.is_reuse() {
            let index = record.ty as usize;
            let sub = &reused[index];
            let shift = shift + record.from as usize;
            let nodes = decode(&sub.buffer, &[], 0, sub.buffer.len(), shift, Some(index));
            out.extend(nodes.into_iter().rev());
            i -= 1;
            continue;
        }
        let first = i - ensure_size(record, i - start);
        let children = decode(buffer, reused, first, i - 1, shift, None);
        out.push(TreeNode {
            ty: record.ty as NodeTypeId,
            from: record.from as usize + shift,
            to: record.to as usize + shift,
            children,
            reused: reuse_index,
        });
        i = first;
    }
    out.reverse();
    out
}
