//! Pattern table.
//!
//! Patterns are compiled once per grammar and deduplicated by source and
//! flags. End patterns that refer back to begin captures are kept as
//! [`Template`]s and compiled at match time.

use std::collections::HashMap;

use regex_automata::meta::Regex;
use regex_automata::util::syntax;

use crate::GrammarError;

/// Index into a [`PatternTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternId(u32);

impl PatternId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Regex flags accepted in the `flags` key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub verbose: bool,
}

impl Flags {
    /// Parse a flag string such as `"im"`.
    pub fn parse(rule: &str, flags: Option<&str>) -> Result<Self, GrammarError> {
        let mut out = Self::default();
        for flag in flags.unwrap_or_default().chars() {
            match flag {
                'i' => out.case_insensitive = true,
                'm' => out.multi_line = true,
                's' => out.dot_all = true,
                'x' => out.verbose = true,
                _ => {
                    return Err(GrammarError::InvalidFlag {
                        rule: rule.to_owned(),
                        flag,
                    });
                }
            }
        }
        Ok(out)
    }

    fn syntax(self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_all)
            .ignore_whitespace(self.verbose)
    }
}

/// Compile one pattern with the given flags.
pub fn compile(pattern: &str, flags: Flags) -> Result<Regex, regex_automata::meta::BuildError> {
    Regex::builder().syntax(flags.syntax()).build(pattern)
}

/// Deduplicating store of compiled patterns.
#[derive(Debug, Default)]
pub struct PatternTable {
    lookup: HashMap<(String, Flags), PatternId>,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    source: String,
    regex: Regex,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a pattern, compiling it on first sight.
    pub fn intern(&mut self, rule: &str, source: &str, flags: Flags) -> Result<PatternId, GrammarError> {
        let key = (source.to_owned(), flags);
        if let Some(&id) = self.lookup.get(&key) {
            return Ok(id);
        }

        let regex = compile(source, flags).map_err(|e| GrammarError::Regex {
            rule: rule.to_owned(),
            pattern: source.to_owned(),
            message: e.to_string(),
        })?;

        let id = PatternId(self.entries.len() as u32);
        self.entries.push(Entry {
            source: source.to_owned(),
            regex,
        });
        self.lookup.insert(key, id);
        Ok(id)
    }

    #[inline]
    pub fn regex(&self, id: PatternId) -> &Regex {
        &self.entries[id.index()].regex
    }

    #[inline]
    pub fn source(&self, id: PatternId) -> &str {
        &self.entries[id.index()].source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Literal(String),
    Group(usize),
}

/// End pattern with `\1`..`\9` back-references into the begin captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    flags: Flags,
    parts: Vec<Part>,
}

impl Template {
    /// Split `source` at back-references. Returns `None` if it has none.
    pub fn parse(source: &str, flags: Flags) -> Option<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some(d @ '1'..='9') => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Group(d as usize - '0' as usize));
                }
                Some(other) => {
                    literal.push('\\');
                    literal.push(other);
                }
                None => literal.push('\\'),
            }
        }

        if !parts.iter().any(|p| matches!(p, Part::Group(_))) {
            return None;
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Some(Self {
            source: source.to_owned(),
            flags,
            parts,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Substitute captured text (escaped) for each back-reference.
    ///
    /// `captures[0]` is the whole begin match; missing groups resolve to "".
    pub fn resolve<S: AsRef<str>>(&self, captures: &[S]) -> String {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Group(group) => {
                    if let Some(text) = captures.get(*group) {
                        out.push_str(&regex_syntax::escape(text.as_ref()));
                    }
                }
            }
        }
        out
    }
}
