//! Rule matching.
//!
//! Every rule application is anchored at a position. A failed application
//! returns `None`; callers fall back to the next candidate, and the top level
//! falls back to one `unrecognized` character, so matching always progresses.

use regex_automata::meta::Regex;
use regex_automata::util::captures::Captures;
use regex_automata::{Anchored, Input};
use strata_core::NodeId;
use strata_grammar::{
    CaptureTarget, Grammar, MatchRule, Pattern, Rule, RuleId, ScopedRule, SwitchRule,
};
use tracing::{trace, warn};

use super::limits::EngineLimits;
use super::matched::{Matched, Wrapping};
use super::state::{GrammarState, Scope};

/// Matches a grammar against text. Cheap to create; holds no parse state.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'g> {
    grammar: &'g Grammar,
    limits: EngineLimits,
}

impl<'g> Engine<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_limits(grammar, EngineLimits::default())
    }

    pub fn with_limits(grammar: &'g Grammar, limits: EngineLimits) -> Self {
        Self { grammar, limits }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn limits(&self) -> EngineLimits {
        self.limits
    }

    /// Try the root patterns at `pos` (relative to the state's text).
    ///
    /// The result is in absolute coordinates.
    pub fn match_at(&self, state: &mut GrammarState<'_>, pos: usize) -> Option<Matched> {
        let mut m = self.match_rule(state, self.grammar.root(), pos)?;
        m.offset(state.offset);
        Some(m)
    }

    /// Like [`Engine::match_at`], but never fails and never returns an empty span.
    ///
    /// When nothing matches, or only a zero-length match does, the next
    /// character becomes an `unrecognized` leaf.
    pub fn next_match(&self, state: &mut GrammarState<'_>, pos: usize) -> Matched {
        match self.match_at(state, pos) {
            Some(m) if m.len > 0 => m,
            _ => Matched::leaf(
                NodeId::Unrecognized.id(),
                pos + state.offset,
                state.char_len(pos),
            ),
        }
    }

    fn match_rule(&self, state: &mut GrammarState<'_>, id: RuleId, pos: usize) -> Option<Matched> {
        if state.guard.contains(&(id, pos)) {
            trace!(rule = %id, pos, "left recursion cut");
            return None;
        }
        if state.guard.len() >= self.limits.recursion_limit as usize {
            warn!(
                rule = %id,
                pos,
                limit = self.limits.recursion_limit,
                "recursion limit reached, rule aborted"
            );
            return None;
        }

        state.guard.push((id, pos));
        let result = match self.grammar.rule(id) {
            Rule::Match(rule) => self.match_match(state, rule, pos),
            Rule::Scoped(rule) => self.match_scoped(state, rule, pos),
            Rule::Switch(rule) => self.match_switch(state, rule, pos),
        };
        state.guard.pop();
        result
    }

    fn match_match(&self, state: &mut GrammarState<'_>, rule: &MatchRule, pos: usize) -> Option<Matched> {
        let caps = self.search(state, &rule.pattern, pos)?;
        let span = caps.get_match()?.span();
        let children = self.capture_children(state, rule, &caps);
        Some(Matched::new(rule.node, span.start, span.len(), children))
    }

    fn match_switch(
        &self,
        state: &mut GrammarState<'_>,
        rule: &SwitchRule,
        pos: usize,
    ) -> Option<Matched> {
        for &candidate in self.grammar.candidates(rule) {
            if let Some(m) = self.match_rule(state, candidate, pos) {
                if !rule.emits() {
                    return Some(m);
                }
                let wrapping = if m.is_incomplete() {
                    Wrapping::Begin
                } else {
                    Wrapping::Full
                };
                return Some(m.wrap(rule.node, wrapping));
            }
        }
        None
    }

    fn match_scoped(
        &self,
        state: &mut GrammarState<'_>,
        rule: &ScopedRule,
        pos: usize,
    ) -> Option<Matched> {
        let caps = self.search(state, &rule.begin.pattern, pos)?;
        let span = caps.get_match()?.span();
        let begin = Matched::new(
            NodeId::None.id(),
            span.start,
            span.len(),
            self.capture_children(state, &rule.begin, &caps),
        );
        let captures = (0..caps.group_len())
            .map(|group| {
                caps.get_group(group)
                    .map_or_else(String::new, |s| state.text[s.range()].to_owned())
            })
            .collect();

        state.scopes.push(Scope {
            node: rule.node,
            captures,
        });
        let result = self.scope_body(state, rule, begin);
        state.scopes.pop();
        result
    }

    /// Loop between begin and end. The scope is already pushed.
    fn scope_body(&self, state: &mut GrammarState<'_>, rule: &ScopedRule, begin: Matched) -> Option<Matched> {
        let from = begin.from;
        let mut pos = begin.end();
        let mut pieces = Vec::new();
        let mut end = None;
        let mut empty_streak = 0u32;

        while pos < state.end {
            if !rule.apply_end_last
                && let Some(m) = self.match_match(state, &rule.end, pos)
            {
                end = Some(m);
                break;
            }

            if let Some(m) = self.match_rule(state, rule.content, pos) {
                if m.len == 0 {
                    empty_streak += 1;
                    if empty_streak > self.limits.empty_match_limit {
                        warn!(
                            node = self.grammar.node_name(rule.node),
                            pos,
                            limit = self.limits.empty_match_limit,
                            "too many empty matches in scope, rule aborted"
                        );
                        return None;
                    }
                } else {
                    empty_streak = 0;
                }
                pos = m.end();
                pieces.push(m);
                continue;
            }

            if rule.apply_end_last
                && let Some(m) = self.match_match(state, &rule.end, pos)
            {
                end = Some(m);
                break;
            }

            let len = state.char_len(pos);
            pieces.push(Matched::leaf(NodeId::Unrecognized.id(), pos, len));
            pos += len;
        }

        // Zero-width ends (`$`, `\z`) can still match at the end of input,
        // but not while a nested scope is open.
        if end.is_none() && !pieces.last().is_some_and(Matched::is_incomplete) {
            end = self.match_match(state, &rule.end, pos);
        }

        let closed = end.is_some();
        let mut children = Vec::with_capacity(3);
        children.push(begin);
        if rule.has_content_node() && !pieces.is_empty() {
            let from = pieces[0].from;
            let to = pieces[pieces.len() - 1].end();
            let mut content = Matched::new(rule.content_node, from, to - from, pieces);
            if !closed {
                content.wrapping = Wrapping::Begin;
            }
            children.push(content);
        } else {
            children.extend(pieces);
        }
        children.extend(end);

        let to = children.last().map_or(pos, Matched::end);
        let mut m = Matched::new(rule.node, from, to - from, children);
        if !closed {
            m.wrapping = Wrapping::Begin;
        }
        Some(m)
    }

    /// Match a capture's text with its switch rule, bounded to the capture.
    fn match_capture(
        &self,
        state: &mut GrammarState<'_>,
        id: RuleId,
        from: usize,
        to: usize,
    ) -> Vec<Matched> {
        let switch = self.ensure_switch(id);

        if from == to {
            return if switch.emits() {
                vec![Matched::leaf(switch.node, from, 0)]
            } else {
                Vec::new()
            };
        }

        let outer_end = state.end;
        state.end = to;
        let mut out = Vec::new();
        let mut pos = from;
        while pos < to {
            match self.match_rule(state, id, pos) {
                Some(mut m) if m.len > 0 => {
                    pos = m.end();
                    m.close_incomplete();
                    out.push(m);
                }
                _ => {
                    let len = state.char_len(pos);
                    out.push(Matched::leaf(NodeId::Unrecognized.id(), pos, len));
                    pos += len;
                }
            }
        }
        state.end = outer_end;
        out
    }

    fn capture_children(
        &self,
        state: &mut GrammarState<'_>,
        rule: &MatchRule,
        caps: &Captures,
    ) -> Vec<Matched> {
        let mut children = Vec::new();
        for capture in &rule.captures {
            let Some(span) = caps.get_group(capture.group as usize) else {
                continue;
            };
            match capture.target {
                CaptureTarget::Node(node) => {
                    Matched::insert_child(&mut children, Matched::leaf(node, span.start, span.len()));
                }
                CaptureTarget::Switch(id) => {
                    for m in self.match_capture(state, id, span.start, span.end) {
                        Matched::insert_child(&mut children, m);
                    }
                }
            }
        }
        children
    }

    /// Anchored search at `pos`, bounded by the state's end.
    fn search(&self, state: &mut GrammarState<'_>, pattern: &Pattern, pos: usize) -> Option<Captures> {
        let regex = match pattern {
            Pattern::Fixed(id) => self.grammar.patterns().regex(*id),
            Pattern::Template(template) => {
                let source = match state.scopes.last() {
                    Some(scope) => template.resolve(&scope.captures),
                    None => template.resolve::<&str>(&[]),
                };
                let key = (source, template.flags());
                if !state.backrefs.contains_key(&key) {
                    match strata_grammar::pattern::compile(&key.0, key.1) {
                        Ok(regex) => {
                            state.backrefs.insert(key.clone(), regex);
                        }
                        Err(e) => {
                            warn!(pattern = %key.0, error = %e, "back-reference pattern failed to compile");
                            return None;
                        }
                    }
                }
                &state.backrefs[&key]
            }
        };
        find(regex, state.text, pos, state.end)
    }
}

fn find(regex: &Regex, text: &str, pos: usize, end: usize) -> Option<Captures> {
    if pos > end {
        return None;
    }
    let input = Input::new(text).range(pos..end).anchored(Anchored::Yes);
    let mut caps = regex.create_captures();
    regex.search_captures(&input, &mut caps);
    caps.is_match().then_some(caps)
}
