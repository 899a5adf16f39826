//! Definition to rule graph.
//!
//! Two passes over the repository: the first reserves a rule slot and a node
//! for every entry so references can be checked up front, the second
//! compiles the entries into their slots. Inline rules are appended as they
//! are met.

use std::collections::HashMap;

use strata_core::grammar::{CaptureDef, Captures, RuleDef, RuleKind, RuleRef};
use strata_core::{GrammarDef, NodeId, NodeTable, NodeTypeId, Props};

use crate::pattern::{self, Flags, PatternTable, Template};
use crate::rule::{
    Candidate, Capture, CaptureTarget, MatchRule, Pattern, Rule, RuleId, ScopedRule, SwitchRule,
};
use crate::{Grammar, GrammarError};

pub(crate) struct GrammarBuilder<'d> {
    def: &'d GrammarDef,
    nodes: NodeTable,
    patterns: PatternTable,
    rules: Vec<Option<Rule>>,
    names: HashMap<String, RuleId>,
}

impl<'d> GrammarBuilder<'d> {
    pub(crate) fn new(def: &'d GrammarDef) -> Self {
        Self {
            def,
            nodes: NodeTable::new(&def.name),
            patterns: PatternTable::new(),
            rules: Vec::new(),
            names: HashMap::new(),
        }
    }

    pub(crate) fn build(mut self) -> Result<Grammar, GrammarError> {
        let def = self.def;

        for (name, rule) in &def.repository {
            if self.names.contains_key(name) {
                continue;
            }
            if let Some(node) = &rule.node {
                self.nodes.declare(node, rule.props.clone())?;
            }
            let id = self.reserve();
            self.names.insert(name.clone(), id);
        }

        for (name, rule) in &def.repository {
            let id = self.names[name];
            if self.rules[id.index()].is_some() {
                continue;
            }
            let compiled = self.compile_rule(name, rule)?;
            self.rules[id.index()] = Some(compiled);
        }

        let candidates = self.candidates("patterns", &def.patterns)?;
        let root = self.push(Rule::Switch(SwitchRule::new(
            NodeId::None.id(),
            false,
            candidates,
        )));

        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(i, rule)| Grammar::ensure_compiled(i, rule))
            .collect();

        Ok(Grammar {
            name: def.name.clone(),
            nodes: self.nodes,
            patterns: self.patterns,
            rules,
            names: self.names,
            root,
        })
    }

    fn reserve(&mut self) -> RuleId {
        let id = RuleId(self.rules.len() as u32);
        self.rules.push(None);
        id
    }

    fn push(&mut self, rule: Rule) -> RuleId {
        let id = self.reserve();
        self.rules[id.index()] = Some(rule);
        id
    }

    fn declare(&mut self, node: Option<&str>, props: &Props) -> Result<NodeTypeId, GrammarError> {
        match node {
            Some(name) => Ok(self.nodes.declare(name, props.clone())?),
            None => Ok(NodeId::None.id()),
        }
    }

    fn compile_rule(&mut self, path: &str, def: &RuleDef) -> Result<Rule, GrammarError> {
        let node = self.declare(def.node.as_deref(), &def.props)?;

        match &def.kind {
            RuleKind::Match(m) => {
                let flags = Flags::parse(path, m.flags.as_deref())?;
                let id = self.patterns.intern(path, &m.pattern, flags)?;
                let groups = self.patterns.regex(id).captures_len();
                let captures = self.captures(path, &m.pattern, &m.captures, groups)?;
                Ok(Rule::Match(MatchRule {
                    node,
                    pattern: Pattern::Fixed(id),
                    captures,
                }))
            }
            RuleKind::Scoped(s) => {
                let flags = Flags::parse(path, s.flags.as_deref())?;

                let begin_id = self.patterns.intern(path, &s.begin, flags)?;
                let groups = self.patterns.regex(begin_id).captures_len();
                let begin = MatchRule {
                    node: NodeId::None.id(),
                    pattern: Pattern::Fixed(begin_id),
                    captures: self.captures(path, &s.begin, &s.begin_captures, groups)?,
                };

                let (end_pattern, groups) = match Template::parse(&s.end, flags) {
                    Some(template) => {
                        // Back-references resolve to "" here; only the shape is checked.
                        let probe = template.resolve::<&str>(&[]);
                        let regex = pattern::compile(&probe, flags).map_err(|e| {
                            GrammarError::Regex {
                                rule: path.to_owned(),
                                pattern: s.end.clone(),
                                message: e.to_string(),
                            }
                        })?;
                        (Pattern::Template(template), regex.captures_len())
                    }
                    None => {
                        let id = self.patterns.intern(path, &s.end, flags)?;
                        (Pattern::Fixed(id), self.patterns.regex(id).captures_len())
                    }
                };
                let end = MatchRule {
                    node: NodeId::None.id(),
                    pattern: end_pattern,
                    captures: self.captures(path, &s.end, &s.end_captures, groups)?,
                };

                let candidates = self.candidates(path, &s.patterns)?;
                let content = self.push(Rule::Switch(SwitchRule::new(
                    NodeId::None.id(),
                    false,
                    candidates,
                )));
                let content_node = self.declare(s.content_node.as_deref(), &Props::new())?;

                Ok(Rule::Scoped(ScopedRule {
                    node,
                    begin,
                    end,
                    content,
                    content_node,
                    apply_end_last: s.apply_end_last,
                }))
            }
            RuleKind::Switch(s) => {
                let candidates = self.candidates(path, &s.patterns)?;
                Ok(Rule::Switch(SwitchRule::new(node, s.emit, candidates)))
            }
        }
    }

    fn check_name(&self, path: &str, name: &str) -> Result<(), GrammarError> {
        if self.names.contains_key(name) {
            return Ok(());
        }
        Err(GrammarError::UnresolvedReference {
            rule: path.to_owned(),
            name: name.to_owned(),
        })
    }

    fn candidates(&mut self, path: &str, refs: &[RuleRef]) -> Result<Vec<Candidate>, GrammarError> {
        let mut out = Vec::with_capacity(refs.len());
        for (i, r) in refs.iter().enumerate() {
            match r {
                RuleRef::Name(name) => {
                    self.check_name(path, name)?;
                    out.push(Candidate::Named(name.clone()));
                }
                RuleRef::Inline(def) => {
                    let rule = self.compile_rule(&format!("{path}.patterns[{i}]"), def)?;
                    out.push(Candidate::Rule(self.push(rule)));
                }
            }
        }
        Ok(out)
    }

    fn captures(
        &mut self,
        path: &str,
        pattern: &str,
        defs: &Captures,
        groups: usize,
    ) -> Result<Vec<Capture>, GrammarError> {
        let mut out = Vec::with_capacity(defs.len());
        for (group, def) in defs {
            if *group as usize >= groups {
                return Err(GrammarError::InvalidCapture {
                    rule: path.to_owned(),
                    group: *group,
                    pattern: pattern.to_owned(),
                });
            }
            let target = match def {
                CaptureDef::Node { node, props } => {
                    CaptureTarget::Node(self.nodes.declare(node, props.clone())?)
                }
                CaptureDef::Rule(RuleRef::Name(name)) => {
                    self.check_name(path, name)?;
                    let grammar = self.def;
                    match grammar.rule(name).map(|r| &r.kind) {
                        Some(RuleKind::Switch(_)) => CaptureTarget::Switch(self.names[name]),
                        _ => self.capture_switch(Candidate::Named(name.clone())),
                    }
                }
                CaptureDef::Rule(RuleRef::Inline(def)) => {
                    let rule = self.compile_rule(&format!("{path}.captures[{group}]"), def)?;
                    let is_switch = matches!(rule, Rule::Switch(_));
                    let id = self.push(rule);
                    if is_switch {
                        CaptureTarget::Switch(id)
                    } else {
                        self.capture_switch(Candidate::Rule(id))
                    }
                }
            };
            out.push(Capture {
                group: *group,
                target,
            });
        }
        out.sort_by_key(|c| c.group);
        Ok(out)
    }

    /// Captures are always matched through a switch.
    fn capture_switch(&mut self, candidate: Candidate) -> CaptureTarget {
        let id = self.push(Rule::Switch(SwitchRule::new(
            NodeId::None.id(),
            false,
            vec![candidate],
        )));
        CaptureTarget::Switch(id)
    }
}
