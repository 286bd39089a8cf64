use crate::constants::{LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};

/// A journaling tool that reads the mood of your entries
#[derive(Parser, Debug)]
#[clap(name = "mood-journal", about = "A journaling tool that reads the mood of your entries")]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, global = true, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Analyze a new entry and save it to the journal
    Write {
        /// Entry text (at most 500 characters)
        #[clap(required = true)]
        text: Vec<String>,
    },

    /// Analyze text without saving it
    Analyze {
        /// Text to analyze
        #[clap(required = true)]
        text: Vec<String>,
    },

    /// List saved entries, newest first
    List {
        /// Show at most this many entries
        #[clap(short = 'n', long)]
        limit: Option<usize>,

        /// Print entries as JSON
        #[clap(long)]
        json: bool,
    },

    /// Delete every saved entry
    Clear {
        /// Confirm deletion
        #[clap(short = 'y', long)]
        yes: bool,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}
