//! Strata grammar compiler.
//!
//! Turns a declarative [`GrammarDef`] into a numbered rule graph:
//! - `builder` - two-pass definition to rule arena compilation
//! - `rule` - match, scoped and switch rules
//! - `pattern` - deduplicated regex table and back-reference templates
//!
//! A [`Grammar`] is immutable once built and can be shared by any number of
//! concurrent parses.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod builder;
mod error;
mod invariants;
pub mod pattern;
pub mod rule;

#[cfg(test)]
mod builder_tests;

use std::collections::HashMap;

use strata_core::{GrammarDef, NodeTable, NodeTypeId};

pub use error::GrammarError;
pub use pattern::{Flags, PatternId, PatternTable, Template};
pub use rule::{
    Candidate, Capture, CaptureTarget, MatchRule, Pattern, Rule, RuleId, ScopedRule, SwitchRule,
};

/// Compiled grammar: node table, pattern table and rule arena.
#[derive(Debug)]
pub struct Grammar {
    name: String,
    nodes: NodeTable,
    patterns: PatternTable,
    rules: Vec<Rule>,
    names: HashMap<String, RuleId>,
    root: RuleId,
}

impl Grammar {
    /// Compile a definition.
    pub fn new(def: &GrammarDef) -> Result<Self, GrammarError> {
        let grammar = builder::GrammarBuilder::new(def).build()?;
        tracing::debug!(
            grammar = %grammar.name,
            rules = grammar.rules.len(),
            nodes = grammar.nodes.len(),
            patterns = grammar.patterns.len(),
            "grammar compiled"
        );
        Ok(grammar)
    }

    /// Parse and compile a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Self::new(&GrammarDef::from_json(json)?)
    }

    /// Decode and compile a binary definition.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        Self::new(&GrammarDef::from_binary(bytes)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    /// Number of distinct node types, builtins included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_name(&self, id: NodeTypeId) -> &str {
        self.nodes.resolve(id)
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Non-emitting switch over the root patterns.
    pub fn root(&self) -> RuleId {
        self.root
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Repository entry by name.
    pub fn lookup(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    /// Candidates of a switch, resolving names on first use.
    pub fn candidates<'g>(&'g self, switch: &'g SwitchRule) -> &'g [RuleId] {
        switch.resolved.get_or_init(|| {
            switch
                .candidates
                .iter()
                .map(|c| match c {
                    Candidate::Named(name) => self.ensure_name(name),
                    Candidate::Rule(id) => *id,
                })
                .collect()
        })
    }
}
