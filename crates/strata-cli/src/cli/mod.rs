mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

pub use args::EditSpec;
pub use commands::build_cli;
pub use dispatch::{ChunksParams, CheckParams, PackParams, ParseParams};

/// Color output mode for CLI commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Dumps go to stdout; piping them turns colors off.
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}
