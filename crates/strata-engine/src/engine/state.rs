//! Per-parse matching state.

use std::collections::HashMap;

use regex_automata::meta::Regex;
use strata_core::NodeTypeId;
use strata_grammar::{Flags, RuleId};

/// End patterns with back-references compiled during a parse, keyed by
/// resolved source.
pub type BackrefCache = HashMap<(String, Flags), Regex>;

/// An open scoped rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub node: NodeTypeId,
    /// Begin capture texts; index 0 is the whole begin match.
    pub captures: Vec<String>,
}

/// State for one parse.
///
/// `text` is everything the engine may look at. Matching stops at `end`, but
/// patterns may still inspect text past it (anchors, word boundaries).
#[derive(Debug)]
pub struct GrammarState<'t> {
    pub(crate) text: &'t str,
    pub(crate) end: usize,
    pub(crate) offset: usize,
    pub(crate) scopes: Vec<Scope>,
    /// `(rule, position)` pairs currently being matched.
    pub(crate) guard: Vec<(RuleId, usize)>,
    /// End patterns with back-references, keyed by resolved source.
    pub(crate) backrefs: BackrefCache,
}

impl<'t> GrammarState<'t> {
    /// `offset` is the absolute position of `text[0]`.
    pub fn new(text: &'t str, offset: usize) -> Self {
        Self {
            text,
            end: text.len(),
            offset,
            scopes: Vec::new(),
            guard: Vec::new(),
            backrefs: HashMap::new(),
        }
    }

    /// Stop matching at `end` (relative), keeping the rest as lookahead.
    pub fn bounded(mut self, end: usize) -> Self {
        self.end = end.min(self.text.len());
        self
    }

    /// Carry over back-reference patterns compiled by an earlier state.
    pub fn with_backrefs(mut self, backrefs: BackrefCache) -> Self {
        self.backrefs = backrefs;
        self
    }

    pub fn into_backrefs(self) -> BackrefCache {
        self.backrefs
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Number of cached back-reference patterns.
    pub fn cached_patterns(&self) -> usize {
        self.backrefs.len()
    }

    /// Byte length of the character at `pos`, never past `end`.
    pub(crate) fn char_len(&self, pos: usize) -> usize {
        let len = self.text[pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        len.min(self.end.saturating_sub(pos)).max(1)
    }
}
