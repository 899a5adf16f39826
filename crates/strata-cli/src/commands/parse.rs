use std::path::PathBuf;

use strata_buffer::dump;
use strata_core::Colors;
use strata_lib::{Edit, ParseConfig, Parser};
use tracing::info;

use super::loader::{fail, load_grammar, load_source};
use crate::cli::EditSpec;

pub struct ParseArgs {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub edit: Option<EditSpec>,
    pub stop_at: Option<usize>,
    pub chunk_size: Option<usize>,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let grammar = load_grammar(&args.grammar_path).unwrap_or_else(|msg| fail(&msg));
    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())
        .unwrap_or_else(|msg| fail(&msg));

    let mut config = ParseConfig::new();
    if let Some(size) = args.chunk_size {
        config = config.chunk_size(size);
    }

    let (text, previous) = match &args.edit {
        None => (source, None),
        Some(spec) => {
            let edited = apply_edit(&source, spec).unwrap_or_else(|msg| fail(&msg));
            let first = Parser::with_config(&grammar, source.as_str(), config).run();
            info!(
                chunks = first.cache.packet().len(),
                reused = first.tree.reused.len(),
                "initial parse"
            );
            let edit = Edit::replace(spec.from, spec.to, spec.text.len());
            (edited, Some((first.cache, edit)))
        }
    };

    let mut parser = match &previous {
        None => Parser::with_config(&grammar, text.as_str(), config),
        Some((cache, edit)) => Parser::incremental(&grammar, text.as_str(), cache, *edit),
    };
    if let Some(pos) = args.stop_at {
        parser = parser.stop_at(pos);
    }
    let out = parser.run();
    info!(
        chunks = out.cache.packet().len(),
        reused = out.tree.reused.len(),
        length = out.tree.length,
        "parse finished"
    );

    print!(
        "{}",
        dump(&out.tree, grammar.nodes(), Some(&text), Colors::new(args.color))
    );
}

/// The document after replacing `spec.from..spec.to` with `spec.text`.
pub fn apply_edit(source: &str, spec: &EditSpec) -> Result<String, String> {
    if spec.to > source.len() {
        return Err(format!(
            "edit end {} is past the end of the source ({} bytes)",
            spec.to,
            source.len()
        ));
    }
    if !source.is_char_boundary(spec.from) || !source.is_char_boundary(spec.to) {
        return Err(format!(
            "edit {}..{} does not fall on character boundaries",
            spec.from, spec.to
        ));
    }
    let mut edited = String::with_capacity(source.len() + spec.text.len());
    edited.push_str(&source[..spec.from]);
    edited.push_str(&spec.text);
    edited.push_str(&source[spec.to..]);
    Ok(edited)
}
