//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{GrammarNode, NodeTable, NodeTypeId};

impl NodeTable {
    pub(crate) fn ensure_node(&self, id: NodeTypeId) -> &GrammarNode {
        self.node(id).unwrap_or_else(|| {
            panic!(
                "NodeTable: node type id {id} not found \
                 (ids must come from the table that declared them)"
            )
        })
    }
}
