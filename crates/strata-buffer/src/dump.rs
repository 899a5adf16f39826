//! Human-readable tree dump.
//!
//! ```text
//! doc 0..6
//!   tag 0..3
//!     name 1..2 "a"
//!   tag 3..6 reused#0
//!     name 4..5 "b"
//! ```

use std::fmt::Write as _;

use strata_core::{Colors, NodeTable};

use crate::tree::{CompiledTree, TreeNode};

const EXCERPT_CHARS: usize = 24;

/// Render `tree` one node per line, children indented under their parent.
///
/// With `source`, leaves show the text they cover.
pub fn dump(tree: &CompiledTree, nodes: &NodeTable, source: Option<&str>, colors: Colors) -> String {
    let mut out = String::new();
    for node in tree.children() {
        dump_node(&mut out, &node, 0, nodes, source, colors);
    }
    out
}

fn dump_node(
    out: &mut String,
    node: &TreeNode,
    depth: usize,
    nodes: &NodeTable,
    source: Option<&str>,
    c: Colors,
) {
    let (name, is_error) = match nodes.node(node.ty) {
        Some(n) => (n.name.clone(), n.is_error()),
        None => (format!("#{}", node.ty), false),
    };
    let color = if is_error { c.red } else { c.blue };

    write!(
        out,
        "{:indent$}{color}{name}{reset} {dim}{}..{}{reset}",
        "",
        node.from,
        node.to,
        indent = depth * 2,
        reset = c.reset,
        dim = c.dim,
    )
    .unwrap();
    if let Some(index) = node.reused {
        write!(out, " {}reused#{index}{}", c.dim, c.reset).unwrap();
    }
    if node.children.is_empty()
        && let Some(text) = source.and_then(|s| s.get(node.from..node.to))
        && !text.is_empty()
    {
        write!(out, " {}\"{}\"{}", c.green, excerpt(text), c.reset).unwrap();
    }
    out.push('\n');

    for child in &node.children {
        dump_node(out, child, depth + 1, nodes, source, c);
    }
}

fn excerpt(text: &str) -> String {
    let mut out: String = text
        .chars()
        .take(EXCERPT_CHARS)
        .flat_map(char::escape_debug)
        .collect();
    if text.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
