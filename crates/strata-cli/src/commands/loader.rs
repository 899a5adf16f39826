use std::fs;
use std::io::{self, Read};
use std::path::Path;

use strata_core::GrammarDef;
use strata_grammar::Grammar;

/// Read a definition: `.json` files as JSON, anything else as packed binary.
pub fn load_definition(path: &Path) -> Result<GrammarDef, String> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        GrammarDef::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e))
    } else {
        let bytes =
            fs::read(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        GrammarDef::from_binary(&bytes).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

pub fn load_grammar(path: &Path) -> Result<Grammar, String> {
    let def = load_definition(path)?;
    Grammar::new(&def).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    match path {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {}", e))?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e)),
        None => Err("source is required: use positional argument or -s/--source".to_string()),
    }
}

/// Print the error and exit.
pub fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
