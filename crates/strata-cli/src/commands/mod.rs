pub mod check;
pub mod chunks;
pub mod loader;
pub mod pack;
pub mod parse;

#[cfg(test)]
mod chunks_tests;
