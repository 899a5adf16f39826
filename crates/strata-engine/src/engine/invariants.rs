//! Engine invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use strata_grammar::{Rule, RuleId, SwitchRule};

use super::matcher::Engine;

impl<'g> Engine<'g> {
    /// Capture targets are always switches; the grammar builder guarantees it.
    pub(super) fn ensure_switch(&self, id: RuleId) -> &'g SwitchRule {
        match self.grammar().rule(id) {
            Rule::Switch(switch) => switch,
            other => panic!(
                "Engine: capture target {id} is a {} rule, expected a switch",
                other.kind_name()
            ),
        }
    }
}
