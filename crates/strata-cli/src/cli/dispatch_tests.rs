//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::args::parse_edit;
use super::*;
use crate::cli::commands::{check_command, chunks_command, pack_command, parse_command};

#[test]
fn check_extracts_grammar_and_color() {
    let m = check_command()
        .try_get_matches_from(["check", "xml.json", "--color", "never", "-vv"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.grammar_path, PathBuf::from("xml.json"));
    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(params.verbose, 2);
}

#[test]
fn check_requires_grammar() {
    let result = check_command().try_get_matches_from(["check"]);

    assert!(result.is_err());
}

#[test]
fn pack_requires_output() {
    let missing = pack_command().try_get_matches_from(["pack", "xml.json"]);
    assert!(missing.is_err());

    let m = pack_command()
        .try_get_matches_from(["pack", "xml.json", "-o", "xml.bin"])
        .unwrap();
    let params = PackParams::from_matches(&m);
    assert_eq!(params.output, PathBuf::from("xml.bin"));
    assert_eq!(params.verbose, 0);
}

#[test]
fn parse_extracts_edit_and_stop() {
    let m = parse_command()
        .try_get_matches_from([
            "parse",
            "xml.json",
            "doc.xml",
            "--edit",
            "4:7:<c>",
            "--stop-at",
            "100",
            "--chunk-size",
            "8",
        ])
        .unwrap();
    let params = ParseParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("doc.xml")));
    assert_eq!(params.source_text, None);
    assert_eq!(
        params.edit,
        Some(EditSpec {
            from: 4,
            to: 7,
            text: "<c>".to_string()
        })
    );
    assert_eq!(params.stop_at, Some(100));
    assert_eq!(params.chunk_size, Some(8));
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn parse_rejects_source_path_and_text_together() {
    let result =
        parse_command().try_get_matches_from(["parse", "xml.json", "doc.xml", "-s", "<a>"]);

    assert!(result.is_err());
}

#[test]
fn parse_rejects_malformed_edit() {
    let result =
        parse_command().try_get_matches_from(["parse", "xml.json", "-s", "<a>", "--edit", "4"]);

    assert!(result.is_err());
}

#[test]
fn chunks_accepts_inline_source() {
    let m = chunks_command()
        .try_get_matches_from(["chunks", "xml.json", "-s", "<a><b>"])
        .unwrap();
    let params = ChunksParams::from_matches(&m);

    assert_eq!(params.source_text.as_deref(), Some("<a><b>"));
    assert_eq!(params.chunk_size, None);
}

#[test]
fn edit_text_may_contain_colons() {
    let edit = parse_edit("0:0:a:b").unwrap();

    assert_eq!(edit.text, "a:b");
}

#[test]
fn edit_allows_empty_text() {
    let edit = parse_edit("3:5:").unwrap();

    assert_eq!((edit.from, edit.to, edit.text.as_str()), (3, 5, ""));
}

#[test]
fn edit_errors() {
    assert_eq!(
        parse_edit("x:1:a").unwrap_err(),
        "invalid edit start 'x'"
    );
    assert_eq!(
        parse_edit("5:2:a").unwrap_err(),
        "edit end 2 is before start 5"
    );
    assert_eq!(
        parse_edit("1:2").unwrap_err(),
        "expected FROM:TO:TEXT, got '1:2'"
    );
}

#[test]
fn cli_lists_all_commands() {
    let cli = build_cli();
    let names: Vec<_> = cli.get_subcommands().map(|c| c.get_name()).collect();

    assert_eq!(names, ["check", "pack", "parse", "chunks"]);
}
