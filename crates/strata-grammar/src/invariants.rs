//! Grammar invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Grammar, Rule, RuleId};

impl Grammar {
    /// Names are checked while building, so lookups here cannot miss.
    pub(crate) fn ensure_name(&self, name: &str) -> RuleId {
        self.lookup(name).unwrap_or_else(|| {
            panic!("Grammar: rule `{name}` was validated at build time but is missing")
        })
    }

    pub(crate) fn ensure_compiled(index: usize, rule: Option<Rule>) -> Rule {
        rule.unwrap_or_else(|| panic!("Grammar: rule slot {index} was reserved but never compiled"))
    }
}
