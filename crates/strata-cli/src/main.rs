mod cli;
mod commands;

use cli::{ChunksParams, CheckParams, PackParams, ParseParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            init_tracing(params.verbose);
            commands::check::run(params.into());
        }
        Some(("pack", m)) => {
            let params = PackParams::from_matches(m);
            init_tracing(params.verbose);
            commands::pack::run(params.into());
        }
        Some(("parse", m)) => {
            let params = ParseParams::from_matches(m);
            init_tracing(params.verbose);
            commands::parse::run(params.into());
        }
        Some(("chunks", m)) => {
            let params = ChunksParams::from_matches(m);
            init_tracing(params.verbose);
            commands::chunks::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr; `-v` shows reuse decisions, `-vv` everything.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
