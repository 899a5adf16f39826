//! Compiled rule graph.
//!
//! Rules live in an arena owned by [`Grammar`](crate::Grammar) and refer to
//! each other by [`RuleId`]. Switch candidates given by name stay unresolved
//! until the switch is first tried, so a rule may contain itself.

use std::sync::OnceLock;

use strata_core::{NodeId, NodeTypeId};

use crate::pattern::{PatternId, Template};

/// Index into the rule arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum Rule {
    Match(MatchRule),
    Scoped(ScopedRule),
    Switch(SwitchRule),
}

impl Rule {
    /// Node this rule produces (`NodeId::None` for anonymous rules).
    pub fn node(&self) -> NodeTypeId {
        match self {
            Rule::Match(r) => r.node,
            Rule::Scoped(r) => r.node,
            Rule::Switch(r) => r.node,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Rule::Match(_) => "match",
            Rule::Scoped(_) => "scoped",
            Rule::Switch(_) => "switch",
        }
    }
}

/// The regex a match rule runs.
#[derive(Debug)]
pub enum Pattern {
    Fixed(PatternId),
    /// Resolved against the innermost scope's begin captures.
    Template(Template),
}

#[derive(Debug)]
pub struct MatchRule {
    pub node: NodeTypeId,
    pub pattern: Pattern,
    /// Sorted by group index.
    pub captures: Vec<Capture>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    pub group: u32,
    pub target: CaptureTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureTarget {
    /// The captured span is a leaf of this node type.
    Node(NodeTypeId),
    /// The captured text is matched again with this switch rule.
    Switch(RuleId),
}

#[derive(Debug)]
pub struct ScopedRule {
    pub node: NodeTypeId,
    pub begin: MatchRule,
    pub end: MatchRule,
    /// Switch rule over the content patterns.
    pub content: RuleId,
    /// Wraps the content between begin and end. `NodeId::None` when absent.
    pub content_node: NodeTypeId,
    pub apply_end_last: bool,
}

impl ScopedRule {
    pub fn has_content_node(&self) -> bool {
        self.content_node != NodeId::None.id()
    }
}

/// Switch candidate before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidate {
    Named(String),
    Rule(RuleId),
}

#[derive(Debug)]
pub struct SwitchRule {
    pub node: NodeTypeId,
    pub emit: bool,
    pub candidates: Vec<Candidate>,
    pub(crate) resolved: OnceLock<Box<[RuleId]>>,
}

impl SwitchRule {
    pub fn new(node: NodeTypeId, emit: bool, candidates: Vec<Candidate>) -> Self {
        Self {
            node,
            emit,
            candidates,
            resolved: OnceLock::new(),
        }
    }

    /// Whether a match is wrapped in this switch's own node.
    pub fn emits(&self) -> bool {
        self.emit && self.node != NodeId::None.id()
    }
}
