//! Strata: incremental, grammar-driven tokenizer and syntax tree compiler.
//!
//! # Example
//!
//! ```
//! use strata_grammar::Grammar;
//! use strata_lib::{Edit, Parser, parse};
//!
//! let grammar = Grammar::from_json(r#"{
//!     "name": "doc",
//!     "patterns": ["tag"],
//!     "repository": {
//!         "tag": { "begin": "<", "end": ">", "patterns": ["name"] },
//!         "name": { "match": "\\w+" }
//!     }
//! }"#).expect("valid grammar");
//!
//! let first = parse(&grammar, "<a><b>");
//! let second = Parser::incremental(&grammar, "<a<b>", &first.cache, Edit::new(2, 3, -1)).run();
//! assert_eq!(second.tree.length, 5);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod chunk;
pub mod compiler;
pub mod config;
mod invariants;
pub mod packet;
pub mod parser;
pub mod source;

#[cfg(test)]
mod packet_tests;

pub use chunk::{Chunk, ChunkTree};
pub use compiler::{Compiler, Snapshot};
pub use config::ParseConfig;
pub use packet::{DEFAULT_CHUNK_SIZE, Packet};
pub use parser::{Edit, ParseCache, ParseOutput, Parser, parse};
pub use source::TextSource;

pub use strata_buffer::{CompiledTree, Subtree, TreeNode};
pub use strata_engine::EngineLimits;
pub use strata_grammar::{Grammar, GrammarError};
