//! Commands for Warden CLI
//!

use std::path::PathBuf;

use clap::{self, Parser};

use warden_core::{logging::LevelFilter, Mode};

/// Warden: keep Ranger policies in line with a configuration file
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
pub(crate) struct WardenArgs {
    /// Path to the policy configuration file
    #[clap(short, long, value_name = "FILE")]
    pub(crate) config: PathBuf,
    /// Create the configured policies (the default mode)
    #[clap(short, long, value_parser, default_value = "false", conflicts_with = "del")]
    pub(crate) add: bool,
    /// Delete remote policies that are not in the configuration
    #[clap(short, long, visible_alias = "delete", value_parser, default_value = "false")]
    pub(crate) del: bool,
    /// Show the changes that would be made without making them
    #[clap(short = 'n', long, value_parser, default_value = "false")]
    pub(crate) dry_run: bool,
    /// Console log level (overrides RUST_LOG)
    #[clap(short = 'v', long)]
    pub(crate) log_level: Option<LevelFilter>,
    /// Directory to write the per-run audit log to
    #[clap(long, value_name = "DIR", default_value = ".")]
    pub(crate) log_dir: PathBuf,
    /// Don't write an audit log file
    #[clap(long, value_parser, default_value = "false")]
    pub(crate) no_log_file: bool,
}

impl WardenArgs {
    /// Deleting has to be asked for; adding is what happens otherwise.
    pub(crate) fn mode(&self) -> Mode {
        if self.del {
            Mode::Delete
        } else {
            Mode::Add
        }
    }
}
