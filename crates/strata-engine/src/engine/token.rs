use strata_core::{NodeId, NodeTypeId};

/// One leaf of the token stream.
///
/// `opens` lists the nodes starting at this token, outermost first. `closes`
/// lists the nodes ending with it, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    pub id: NodeTypeId,
    pub from: usize,
    pub to: usize,
    pub opens: Vec<NodeTypeId>,
    pub closes: Vec<NodeTypeId>,
}

impl Token {
    pub fn new(id: NodeTypeId, from: usize, to: usize) -> Self {
        Self {
            id,
            from,
            to,
            opens: Vec::new(),
            closes: Vec::new(),
        }
    }

    /// Zero-length positional token.
    pub fn pad(at: usize) -> Self {
        Self::new(NodeId::None.id(), at, at)
    }

    /// Whether this token produces a record of its own.
    pub fn is_node(&self) -> bool {
        self.id != NodeId::None.id()
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}
