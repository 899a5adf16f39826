//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use super::args::EditSpec;
use crate::commands::check::CheckArgs;
use crate::commands::chunks::ChunksArgs;
use crate::commands::pack::PackArgs;
use crate::commands::parse::ParseArgs;

pub struct CheckParams {
    pub grammar_path: PathBuf,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct PackParams {
    pub grammar_path: PathBuf,
    pub output: PathBuf,
    pub verbose: u8,
}

impl PackParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<PackParams> for PackArgs {
    fn from(p: PackParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            output: p.output,
        }
    }
}

pub struct ParseParams {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub edit: Option<EditSpec>,
    pub stop_at: Option<usize>,
    pub chunk_size: Option<usize>,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            edit: m.get_one::<EditSpec>("edit").cloned(),
            stop_at: m.get_one::<usize>("stop_at").copied(),
            chunk_size: m.get_one::<usize>("chunk_size").copied(),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            source_path: p.source_path,
            source_text: p.source_text,
            edit: p.edit,
            stop_at: p.stop_at,
            chunk_size: p.chunk_size,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ChunksParams {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub chunk_size: Option<usize>,
    pub verbose: u8,
}

impl ChunksParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            chunk_size: m.get_one::<usize>("chunk_size").copied(),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ChunksParams> for ChunksArgs {
    fn from(p: ChunksParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            source_path: p.source_path,
            source_text: p.source_text,
            chunk_size: p.chunk_size,
        }
    }
}

/// Required by every command; clap rejects a missing grammar.
fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
