//! Matching engine.
//!
//! Applies a compiled grammar to text, producing [`Matched`] trees that are
//! flattened into a [`Token`] stream for the chunk buffer.

mod invariants;
mod limits;
mod matched;
mod matcher;
mod state;
mod token;

#[cfg(test)]
mod matched_tests;

pub use limits::EngineLimits;
pub use matched::{Matched, Wrapping};
pub use matcher::Engine;
pub use state::{BackrefCache, GrammarState, Scope};
pub use token::Token;
