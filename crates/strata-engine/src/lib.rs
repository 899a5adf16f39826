//! Matching engine for strata grammars.
//!
//! This crate applies a compiled [`Grammar`](strata_grammar::Grammar) to a
//! document, one top-level match at a time, and flattens the results into
//! tokens carrying the node boundaries they open and close.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    BackrefCache, Engine, EngineLimits, GrammarState, Matched, Scope, Token, Wrapping,
};
