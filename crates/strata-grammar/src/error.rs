use strata_core::{DefinitionError, NodeTableFull};

/// Errors raised while compiling a grammar definition.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("rule `{rule}`: unknown regex flag `{flag}`")]
    InvalidFlag { rule: String, flag: char },

    #[error("rule `{rule}`: invalid pattern `{pattern}`: {message}")]
    Regex {
        rule: String,
        pattern: String,
        message: String,
    },

    #[error("rule `{rule}`: reference to undefined rule `{name}`")]
    UnresolvedReference { rule: String, name: String },

    #[error("rule `{rule}`: capture group {group} does not exist in `{pattern}`")]
    InvalidCapture {
        rule: String,
        group: u32,
        pattern: String,
    },

    #[error(transparent)]
    TooManyNodes(#[from] NodeTableFull),
}
