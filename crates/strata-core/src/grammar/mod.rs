//! Declarative grammar definitions.
//!
//! Definitions are read from JSON and can be cached in a compact binary form.

mod binary;
mod json;
mod types;


pub use json::DefinitionError;
pub use types::{
    CaptureDef, Captures, GrammarDef, MatchDef, RuleDef, RuleKind, RuleRef, ScopedDef, SwitchDef,
};
