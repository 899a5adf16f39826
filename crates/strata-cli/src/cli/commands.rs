//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("strata")
        .about("Incremental grammar-driven tokenizer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(pack_command())
        .subcommand(parse_command())
        .subcommand(chunks_command())
}

/// Compile a grammar and list its node types.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Compile a grammar and list its node types")
        .after_help(
            r#"EXAMPLES:
  strata check xml.json
  strata check xml.bin"#,
        )
        .arg(grammar_path_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Write the binary form of a JSON grammar.
pub fn pack_command() -> Command {
    Command::new("pack")
        .about("Write a grammar in binary form")
        .after_help(
            r#"EXAMPLES:
  strata pack xml.json -o xml.bin"#,
        )
        .arg(grammar_path_arg())
        .arg(output_file_arg())
        .arg(verbose_arg())
}

/// Parse a source and print the tree.
pub fn parse_command() -> Command {
    Command::new("parse")
        .about("Parse a source file and print the tree")
        .override_usage(
            "\
  strata parse <GRAMMAR> <SOURCE>
  strata parse <GRAMMAR> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  strata parse xml.json doc.xml
  strata parse xml.json -s '<a><b></b></a>'
  strata parse xml.json doc.xml --edit 4:7:'<c>' -v   # incremental re-parse
  strata parse xml.json doc.xml --stop-at 1000"#,
        )
        .arg(grammar_path_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(edit_arg())
        .arg(stop_at_arg())
        .arg(chunk_size_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print the chunk layout of a parse.
pub fn chunks_command() -> Command {
    Command::new("chunks")
        .about("Print the chunk layout of a parse")
        .override_usage(
            "\
  strata chunks <GRAMMAR> <SOURCE>
  strata chunks <GRAMMAR> -s <TEXT>",
        )
        .arg(grammar_path_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(chunk_size_arg())
        .arg(verbose_arg())
}
