//! Compiled tree format for strata.
//!
//! This crate contains:
//! - The flat record buffer (`type, from, to, size` per record, postfix order)
//! - Reused subtrees and the compiled tree handed to the host
//! - A back-to-front cursor, a decoder and a human-readable dump

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cursor;
pub mod dump;
mod invariants;
pub mod record;
pub mod tree;

#[cfg(test)]
mod record_tests;
#[cfg(test)]
mod tree_tests;

pub use cursor::BufferCursor;
pub use dump::dump;
pub use record::{RECORD_LEN, REUSED, Record, TreeBuffer, pos};
pub use tree::{CompiledTree, Subtree, TreeNode};
