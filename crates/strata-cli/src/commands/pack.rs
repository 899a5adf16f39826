use std::fs;
use std::path::PathBuf;

use strata_grammar::Grammar;

use super::loader::{fail, load_definition};

pub struct PackArgs {
    pub grammar_path: PathBuf,
    pub output: PathBuf,
}

pub fn run(args: PackArgs) {
    let def = load_definition(&args.grammar_path).unwrap_or_else(|msg| fail(&msg));

    // Refuse to pack a grammar that would not load.
    if let Err(e) = Grammar::new(&def) {
        fail(&format!("{}: {}", args.grammar_path.display(), e));
    }

    let bytes = def.to_binary().unwrap_or_else(|e| fail(&e.to_string()));
    if let Err(e) = fs::write(&args.output, &bytes) {
        fail(&format!("failed to write '{}': {}", args.output.display(), e));
    }
    tracing::info!(output = %args.output.display(), bytes = bytes.len(), "grammar packed");
}
