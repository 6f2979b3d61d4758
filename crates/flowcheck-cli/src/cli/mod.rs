//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A file argument that may also be the stdin sentinel `"-"`.
///
/// The sentinel is resolved once, at argument-parsing time, so the rest of
/// the binary matches on [`PathOrStdin`] instead of comparing strings.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format shared by every subcommand.
///
/// `Human` renders a readable verdict summary; `Json` emits the validation
/// report as a single JSON object on stdout.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// All top-level subcommands exposed by the `flowcheck` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Check whether a pipeline graph is a directed acyclic graph.
    Check {
        /// Path to a pipeline JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Run the built-in known-cycle fixture through the full engine.
    Selftest,

    /// Print the flowcheck-core library version.
    Version,
}

/// Root CLI struct for the `flowcheck` binary.
///
/// The flags below are marked `global = true`, so clap accepts them after
/// any subcommand as well as before it.
#[derive(Parser)]
#[command(
    name = "flowcheck",
    version,
    about = "Pipeline DAG validation CLI",
    long_about = "Validates visual pipeline graphs (nodes and directed edges)\n\
                  for acyclicity with two cross-checked algorithms, reporting\n\
                  cycle evidence and diagnostic counts."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress the diagnostic count lines (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List every excluded edge in addition to the counts
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input size in bytes, for files and stdin alike.
    ///
    /// The `FLOWCHECK_MAX_FILE_SIZE` environment variable sets the same
    /// limit; the flag wins when both are present. Default: 268435456
    /// (256 MB).
    #[arg(
        long,
        global = true,
        env = "FLOWCHECK_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
