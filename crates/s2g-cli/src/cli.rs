//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Convert Claude Code session logs to Gource custom log format.
///
/// Prints `timestamp|user|type|file` lines, ready for
/// `gource --log-format custom -`.
#[derive(Debug, Parser)]
#[command(name = "session2gource", version, about, long_about = None)]
pub struct Cli {
    /// Session log files (JSONL), or directories containing them.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// User name for Gource (default: the session ID).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Strip this prefix from file paths (e.g. /home/user/project).
    #[arg(short, long, conflicts_with = "auto_strip")]
    pub strip_prefix: Option<String>,

    /// Strip each session's project root, detected from its `cwd` field.
    #[arg(short, long)]
    pub auto_strip: bool,

    /// Write the log to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Whether the command line picks a strip mode, overriding the config.
    pub const fn sets_strip_mode(&self) -> bool {
        self.strip_prefix.is_some() || self.auto_strip
    }
}
