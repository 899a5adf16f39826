//! Grammar definition types.
//!
//! A definition is pure data: rule names are not resolved here. The grammar
//! compiler turns it into a numbered rule graph.

use serde::{Deserialize, Serialize};

use crate::Props;

/// Declarative grammar: a root pattern list plus a repository of named rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarDef {
    /// Grammar name. Also names the `Top` node.
    pub name: String,
    /// Root patterns, tried in order at every top-level position.
    pub patterns: Vec<RuleRef>,
    /// Named rules, preserving declaration order.
    pub repository: Vec<(String, RuleDef)>,
}

impl GrammarDef {
    /// Look up a repository entry by name.
    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.repository
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }
}

/// Reference to a rule: by repository name, or written inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleRef {
    Name(String),
    Inline(Box<RuleDef>),
}

/// One rule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Node produced by this rule. `None` produces position-only output.
    pub node: Option<String>,
    /// Opaque host metadata, stored on the node.
    pub props: Props,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleKind {
    Match(MatchDef),
    Scoped(ScopedDef),
    Switch(SwitchDef),
}

/// Capture-group index to capture handling, in declaration order.
pub type Captures = Vec<(u32, CaptureDef)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDef {
    pub pattern: String,
    pub flags: Option<String>,
    pub captures: Captures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedDef {
    pub begin: String,
    /// May contain `\1`..`\9` back-references into the begin captures.
    pub end: String,
    pub flags: Option<String>,
    pub begin_captures: Captures,
    pub end_captures: Captures,
    /// Content rules allowed between begin and end.
    pub patterns: Vec<RuleRef>,
    /// Node wrapping the content between begin and end.
    pub content_node: Option<String>,
    /// Prefer content over end at every step.
    pub apply_end_last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDef {
    pub patterns: Vec<RuleRef>,
    /// Wrap the winning alternative in this rule's own node.
    pub emit: bool,
}

/// What to do with a capture group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaptureDef {
    /// The captured span becomes a leaf node.
    Node { node: String, props: Props },
    /// The captured text is matched again with a rule.
    Rule(RuleRef),
}
