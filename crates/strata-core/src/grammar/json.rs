//! JSON deserialization for grammar definition files.
//!
//! The JSON shape is loose: a rule's kind is decided by which keys it has,
//! and any key the engine does not know is kept as an opaque prop.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{
    CaptureDef, Captures, GrammarDef, MatchDef, RuleDef, RuleKind, RuleRef, ScopedDef, SwitchDef,
};
use crate::{PropValue, Props};

/// Error while reading a grammar definition.
#[derive(Debug)]
pub enum DefinitionError {
    Json(serde_json::Error),
    Binary(postcard::Error),
    InvalidRule { rule: String, reason: String },
}

impl DefinitionError {
    fn invalid(rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.to_owned(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary codec error: {e}"),
            Self::InvalidRule { rule, reason } => write!(f, "invalid rule `{rule}`: {reason}"),
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
            Self::InvalidRule { .. } => None,
        }
    }
}

impl GrammarDef {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(DefinitionError::Json)?;
        raw.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: String,
    #[serde(default)]
    patterns: Vec<RawRef>,
    #[serde(default)]
    repository: IndexMap<String, RawRule>,
}

impl TryFrom<RawGrammar> for GrammarDef {
    type Error = DefinitionError;

    fn try_from(raw: RawGrammar) -> Result<Self, Self::Error> {
        let patterns = raw
            .patterns
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.convert(&format!("patterns[{i}]")))
            .collect::<Result<_, _>>()?;

        // IndexMap keeps declaration order, which fixes node numbering.
        let mut repository = Vec::with_capacity(raw.repository.len());
        for (name, rule) in raw.repository {
            let converted = rule.convert(&name, Some(&name))?;
            repository.push((name, converted));
        }

        Ok(Self {
            name: raw.name,
            patterns,
            repository,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRef {
    Name(String),
    Inline(Box<RawRule>),
}

impl RawRef {
    fn convert(self, path: &str) -> Result<RuleRef, DefinitionError> {
        match self {
            RawRef::Name(name) => Ok(RuleRef::Name(name)),
            RawRef::Inline(rule) => Ok(RuleRef::Inline(Box::new(rule.convert(path, None)?))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    #[serde(rename = "type")]
    node: Option<String>,
    #[serde(rename = "match")]
    pattern: Option<String>,
    begin: Option<String>,
    end: Option<String>,
    flags: Option<String>,
    captures: Option<IndexMap<String, RawRef>>,
    begin_captures: Option<IndexMap<String, RawRef>>,
    end_captures: Option<IndexMap<String, RawRef>>,
    patterns: Option<Vec<RawRef>>,
    content_type: Option<String>,
    #[serde(default)]
    apply_end_pattern_last: bool,
    #[serde(default)]
    emit: bool,
    #[serde(flatten)]
    props: IndexMap<String, serde_json::Value>,
}

impl RawRule {
    fn has_body(&self) -> bool {
        self.pattern.is_some() || self.begin.is_some() || self.end.is_some() || self.patterns.is_some()
    }

    /// `default_node` is the repository key; inline rules have none.
    fn convert(self, path: &str, default_node: Option<&str>) -> Result<RuleDef, DefinitionError> {
        let node = self.node.clone().or_else(|| default_node.map(str::to_owned));
        let props = convert_props(self.props);

        let kind = match (self.begin, self.end, self.pattern) {
            (Some(begin), Some(end), None) => {
                let (begin_captures, end_captures) = match self.captures {
                    // `captures` on a scoped rule applies to both ends unless overridden.
                    Some(shared) => {
                        let shared = convert_captures(path, shared)?;
                        let begin = match self.begin_captures {
                            Some(c) => convert_captures(path, c)?,
                            None => shared.clone(),
                        };
                        let end = match self.end_captures {
                            Some(c) => convert_captures(path, c)?,
                            None => shared,
                        };
                        (begin, end)
                    }
                    None => (
                        convert_captures(path, self.begin_captures.unwrap_or_default())?,
                        convert_captures(path, self.end_captures.unwrap_or_default())?,
                    ),
                };
                RuleKind::Scoped(ScopedDef {
                    begin,
                    end,
                    flags: self.flags,
                    begin_captures,
                    end_captures,
                    patterns: convert_refs(path, self.patterns.unwrap_or_default())?,
                    content_node: self.content_type,
                    apply_end_last: self.apply_end_pattern_last,
                })
            }
            (None, None, Some(pattern)) => {
                if self.patterns.is_some() {
                    return Err(DefinitionError::invalid(
                        path,
                        "a match rule cannot have `patterns`",
                    ));
                }
                RuleKind::Match(MatchDef {
                    pattern,
                    flags: self.flags,
                    captures: convert_captures(path, self.captures.unwrap_or_default())?,
                })
            }
            (None, None, None) => match self.patterns {
                Some(patterns) => RuleKind::Switch(SwitchDef {
                    patterns: convert_refs(path, patterns)?,
                    emit: self.emit,
                }),
                None => {
                    return Err(DefinitionError::invalid(
                        path,
                        "expected `match`, `begin`/`end` or `patterns`",
                    ));
                }
            },
            (Some(_), None, _) => return Err(DefinitionError::invalid(path, "`begin` without `end`")),
            (None, Some(_), _) => return Err(DefinitionError::invalid(path, "`end` without `begin`")),
            (Some(_), Some(_), Some(_)) => {
                return Err(DefinitionError::invalid(
                    path,
                    "`match` cannot be combined with `begin`/`end`",
                ));
            }
        };

        Ok(RuleDef { node, props, kind })
    }
}

fn convert_refs(path: &str, refs: Vec<RawRef>) -> Result<Vec<RuleRef>, DefinitionError> {
    refs.into_iter()
        .enumerate()
        .map(|(i, r)| r.convert(&format!("{path}.patterns[{i}]")))
        .collect()
}

fn convert_captures(
    path: &str,
    raw: IndexMap<String, RawRef>,
) -> Result<Captures, DefinitionError> {
    let mut captures = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let group: u32 = key.parse().map_err(|_| {
            DefinitionError::invalid(path, format!("capture key `{key}` is not a group index"))
        })?;
        let capture_path = format!("{path}.captures[{group}]");
        let capture = match value {
            RawRef::Name(name) => CaptureDef::Rule(RuleRef::Name(name)),
            RawRef::Inline(rule) if !rule.has_body() => match rule.node {
                Some(node) => CaptureDef::Node {
                    node,
                    props: convert_props(rule.props),
                },
                None => {
                    return Err(DefinitionError::invalid(
                        &capture_path,
                        "capture needs a `type` or a rule body",
                    ));
                }
            },
            RawRef::Inline(rule) => {
                CaptureDef::Rule(RuleRef::Inline(Box::new(rule.convert(&capture_path, None)?)))
            }
        };
        captures.push((group, capture));
    }
    Ok(captures)
}

fn convert_props(raw: IndexMap<String, serde_json::Value>) -> Props {
    raw.into_iter()
        .map(|(k, v)| (k, PropValue::from(v)))
        .collect()
}
