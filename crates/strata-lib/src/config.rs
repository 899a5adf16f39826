use strata_engine::EngineLimits;

use crate::packet::DEFAULT_CHUNK_SIZE;

/// Parse settings. Incremental parses reuse the settings of the parse they
/// start from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    pub(crate) limits: EngineLimits,
    /// Tokens per chunk before a new one is started (default: 32).
    pub(crate) chunk_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            limits: EngineLimits::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the chunk size. Zero is treated as one.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    pub fn get_limits(&self) -> EngineLimits {
        self.limits
    }

    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }
}
