/// Safety valves for degenerate grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineLimits {
    /// Consecutive zero-length content matches tolerated inside one scope (default: 32).
    pub(crate) empty_match_limit: u32,
    /// Maximum nesting of rule applications (default: 256).
    pub(crate) recursion_limit: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            empty_match_limit: 32,
            recursion_limit: 256,
        }
    }
}

impl EngineLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-match streak limit.
    pub fn empty_match_limit(mut self, limit: u32) -> Self {
        self.empty_match_limit = limit;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_empty_match_limit(&self) -> u32 {
        self.empty_match_limit
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}
