use std::fmt::Write;
use std::path::PathBuf;

use strata_core::NodeTypeId;
use strata_grammar::Grammar;
use strata_lib::{Packet, ParseConfig, Parser};

use super::loader::{fail, load_grammar, load_source};

pub struct ChunksArgs {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub chunk_size: Option<usize>,
}

pub fn run(args: ChunksArgs) {
    let grammar = load_grammar(&args.grammar_path).unwrap_or_else(|msg| fail(&msg));
    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())
        .unwrap_or_else(|msg| fail(&msg));

    let mut config = ParseConfig::new();
    if let Some(size) = args.chunk_size {
        config = config.chunk_size(size);
    }
    let out = Parser::with_config(&grammar, source.as_str(), config).run();
    print!("{}", layout(out.cache.packet(), &grammar));
}

/// One line per chunk: its span, token count and scope edges.
pub fn layout(packet: &Packet, grammar: &Grammar) -> String {
    let names = |ids: &[NodeTypeId]| {
        ids.iter()
            .map(|&id| grammar.node_name(id))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = String::new();
    for (i, chunk) in packet.chunks().iter().enumerate() {
        write!(out, "{}: ", i).unwrap();
        if chunk.is_pure() {
            write!(out, "pure@{}", chunk.from()).unwrap();
            if packet.is_restart(i) {
                out.push_str(" restart");
            }
            out.push('\n');
            continue;
        }

        write!(out, "{}..{} x{}", chunk.from(), chunk.to(), chunk.len()).unwrap();
        if !chunk.scopes().is_empty() {
            write!(out, " in [{}]", names(chunk.scopes())).unwrap();
        }
        if !chunk.opens().is_empty() {
            write!(out, " +[{}]", names(chunk.opens())).unwrap();
        }
        if !chunk.closes().is_empty() {
            write!(out, " -[{}]", names(chunk.closes())).unwrap();
        }
        out.push('\n');
    }
    out
}
