use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "safeher")]
#[command(about = "Extract risk signals from safety-assistant replies")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file; defaults are used when it does not exist
    #[arg(long, global = true, default_value = "safeher.toml")]
    pub config: PathBuf,

    /// Log filter when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a reply and print the result as JSON
    Assess {
        /// Reply file; stdin when omitted
        input: Option<PathBuf>,

        /// Seed for synthesized factors (overrides engine.seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Append the reading to the history file
        #[arg(long)]
        record: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print a reply with every risk tag removed
    Strip {
        /// Reply file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Show stored risk readings, their average and the trend
    History,

    /// Print the assistant system prompt
    Prompt,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
