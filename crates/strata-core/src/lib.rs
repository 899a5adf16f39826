#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for strata grammars.
//!
//! - **Node ids**: reserved builtin slots plus dense grammar-declared ids
//! - **Node table**: name interning for grammar nodes
//! - **Grammar definitions**: the declarative rule repository, read from
//!   JSON or a compact binary form

pub mod colors;
pub mod grammar;
mod invariants;
mod node;
mod node_table;

#[cfg(test)]
mod node_table_tests;

pub use colors::Colors;
pub use grammar::{DefinitionError, GrammarDef};
pub use node::{GrammarNode, NodeId, NodeTypeId, PropValue, Props};
pub use node_table::{NodeTable, NodeTableFull};
