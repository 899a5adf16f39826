use std::fmt::Write;
use std::path::PathBuf;

use strata_core::{Colors, NodeId};
use strata_grammar::Grammar;

use super::loader::{fail, load_grammar};

pub struct CheckArgs {
    pub grammar_path: PathBuf,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let grammar = load_grammar(&args.grammar_path).unwrap_or_else(|msg| fail(&msg));
    print!("{}", render_nodes(&grammar, Colors::new(args.color)));
}

/// One line per node type, then a summary.
pub fn render_nodes(grammar: &Grammar, colors: Colors) -> String {
    let mut out = String::new();
    for node in grammar.nodes().iter().filter(|n| n.id != NodeId::None.id()) {
        let color = if node.is_error() { colors.red } else { colors.blue };
        write!(
            out,
            "{}{:>4}{} {}{}{}",
            colors.dim, node.id, colors.reset, color, node.name, colors.reset
        )
        .unwrap();
        if NodeId::is_builtin(node.id) {
            write!(out, " {}(builtin){}", colors.dim, colors.reset).unwrap();
        }
        out.push('\n');
    }
    writeln!(
        out,
        "{}: {} nodes, {} rules, {} patterns",
        grammar.name(),
        grammar.node_count(),
        grammar.rule_count(),
        grammar.patterns().len()
    )
    .unwrap();
    out
}
