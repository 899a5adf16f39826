//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar definition file (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Grammar definition (.json, or a packed binary)")
}

/// Source file to tokenize (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Source file to parse (use \"-\" for stdin)")
}

/// Inline source text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Inline source text")
}

/// Output file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Write the packed grammar to file")
}

/// Re-parse after an edit (--edit FROM:TO:TEXT).
pub fn edit_arg() -> Arg {
    Arg::new("edit")
        .long("edit")
        .value_name("FROM:TO:TEXT")
        .value_parser(parse_edit)
        .help("Replace FROM..TO with TEXT and re-parse incrementally")
}

/// Stop position (--stop-at).
pub fn stop_at_arg() -> Arg {
    Arg::new("stop_at")
        .long("stop-at")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Stop at the first match boundary at or after byte N")
}

/// Tokens per chunk (--chunk-size).
pub fn chunk_size_arg() -> Arg {
    Arg::new("chunk_size")
        .long("chunk-size")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Tokens per chunk (default: 32)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for reuse decisions, -vv for everything)")
}

/// One replacement: `from..to` becomes `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSpec {
    pub from: usize,
    pub to: usize,
    pub text: String,
}

/// Parse `FROM:TO:TEXT`. The text may itself contain colons.
pub fn parse_edit(s: &str) -> Result<EditSpec, String> {
    let mut parts = s.splitn(3, ':');
    let (Some(from), Some(to), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected FROM:TO:TEXT, got '{}'", s));
    };
    let from: usize = from
        .parse()
        .map_err(|_| format!("invalid edit start '{}'", from))?;
    let to: usize = to.parse().map_err(|_| format!("invalid edit end '{}'", to))?;
    if to < from {
        return Err(format!("edit end {} is before start {}", to, from));
    }
    Ok(EditSpec {
        from,
        to,
        text: text.to_string(),
    })
}
