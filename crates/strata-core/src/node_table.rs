//! Node name interning.
//!
//! Converts node names into dense [`NodeTypeId`]s. The builtins occupy the
//! reserved low slots, so the first declared name always receives
//! [`NodeId::Safe`].

use std::collections::HashMap;

use crate::node::{GrammarNode, NodeId, NodeTypeId, Props, PropValue};

/// Returned when a grammar declares more node types than fit in a `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTableFull;

impl std::fmt::Display for NodeTableFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node table is full ({} types)", NodeTypeId::MAX)
    }
}

impl std::error::Error for NodeTableFull {}

/// Interns node names. Declaring a name twice returns the existing id.
#[derive(Debug, Clone)]
pub struct NodeTable {
    map: HashMap<String, NodeTypeId>,
    nodes: Vec<GrammarNode>,
}

impl NodeTable {
    /// Create a table with the builtins registered. `top` names the root node.
    pub fn new(top: &str) -> Self {
        let mut table = Self {
            map: HashMap::new(),
            nodes: Vec::with_capacity(16),
        };
        for builtin in NodeId::BUILTINS {
            let name = match builtin {
                NodeId::None => "",
                NodeId::Top => top,
                NodeId::Unrecognized => "unrecognized",
                NodeId::Incomplete => "incomplete",
                NodeId::Safe => unreachable!("Safe is not a node"),
            };
            let mut props = Props::new();
            if matches!(builtin, NodeId::Unrecognized | NodeId::Incomplete) {
                props.insert("error".to_owned(), PropValue::Bool(true));
            }
            table.nodes.push(GrammarNode::new(builtin.id(), name, props));
            if builtin != NodeId::None {
                table.map.insert(name.to_owned(), builtin.id());
            }
        }
        table
    }

    /// Declare a node, returning its id.
    ///
    /// Props of a redeclared node are merged: keys already present win.
    pub fn declare(&mut self, name: &str, props: Props) -> Result<NodeTypeId, NodeTableFull> {
        if let Some(&id) = self.map.get(name) {
            let node = &mut self.nodes[id as usize];
            for (key, value) in props {
                node.props.entry(key).or_insert(value);
            }
            return Ok(id);
        }

        let id = NodeTypeId::try_from(self.nodes.len()).map_err(|_| NodeTableFull)?;
        if id == NodeTypeId::MAX {
            return Err(NodeTableFull);
        }
        self.nodes.push(GrammarNode::new(id, name, props));
        self.map.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Look up a declared name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeTypeId> {
        self.map.get(name).copied()
    }

    #[inline]
    pub fn node(&self, id: NodeTypeId) -> Option<&GrammarNode> {
        self.nodes.get(id as usize)
    }

    /// Resolve an id to its name.
    ///
    /// # Panics
    /// Panics if the id was not issued by this table.
    #[inline]
    pub fn resolve(&self, id: NodeTypeId) -> &str {
        &self.ensure_node(id).name
    }

    /// Number of node types, builtins included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the builtins are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= NodeId::Safe.id() as usize
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GrammarNode> {
        self.nodes.iter()
    }

    /// Node names indexed by id, for dumps.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn into_nodes(self) -> Vec<GrammarNode> {
        self.nodes
    }
}
