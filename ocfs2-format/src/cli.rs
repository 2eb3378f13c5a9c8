//! CLI argument parsing for ocfs2-format

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ocfs2-format")]
#[command(version, about = "Format an unmounted partition with OCFS2")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file (defaults to the config value, then the state directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the Format dialog
    Format {
        /// Device to preselect in the dialog (e.g. /dev/sdb1)
        #[arg(long)]
        device: Option<PathBuf>,

        /// Log the mkfs.ocfs2 command to the log file instead of running it
        #[arg(long)]
        dry_run: bool,
    },
    /// List unmounted partitions that can be formatted
    List,
}
