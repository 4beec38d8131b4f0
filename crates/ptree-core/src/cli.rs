//! Command-line surface.

use crate::facility::DEFAULT_SYSCALL_NR;
use clap::Parser;
use ptree_common::OutputFormat;

/// Print the process tree reported by the kernel ptree facility.
#[derive(Parser, Debug, Clone)]
#[command(name = "ptree", version, about)]
pub struct Cli {
    /// Maximum number of entries to request (decimal digits)
    #[arg(value_name = "CAPACITY")]
    pub capacity: String,

    /// System call number of the ptree facility
    #[arg(
        long,
        env = "PTREE_SYSCALL_NR",
        default_value_t = DEFAULT_SYSCALL_NR,
        allow_negative_numbers = true
    )]
    pub syscall_nr: i64,

    /// Output format
    #[arg(long, value_enum, env = "PTREE_FORMAT", default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}
