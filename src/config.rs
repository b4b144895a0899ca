use std::path::PathBuf;

/// How much the converter logs to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Resolve from the `--quiet` / `--verbose` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Log filter directive used when `RUST_LOG` is unset.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub verbosity: Verbosity,
}

impl Settings {
    pub fn new(input: PathBuf, verbose: bool, quiet: bool) -> Self {
        Self {
            input,
            verbosity: Verbosity::from_flags(verbose, quiet),
        }
    }
}
