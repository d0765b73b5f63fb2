//! Command line argument parsing for the wordsplit CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::WordDelimiterConfig;

/// wordsplit - split compound tokens into subwords
#[derive(Parser, Debug, Clone)]
#[command(name = "wordsplit")]
#[command(about = "Split compound tokens into subwords and re-join runs of them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct WordsplitArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WordsplitArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text on whitespace and run the word delimiter filter
    Split(SplitArgs),

    /// Validate a character type rule file
    #[command(name = "check-types")]
    CheckTypes(CheckTypesArgs),
}

/// Arguments for the split command
#[derive(Args, Debug, Clone, Default)]
pub struct SplitArgs {
    /// Text to analyze (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// JSON configuration file; flags given on the command line override it
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// File of protected words, one per line
    #[arg(short, long, value_name = "WORDS_FILE")]
    pub protected: Option<PathBuf>,

    /// File of character type rules (`char => TYPE`), one per line
    #[arg(short, long, value_name = "TYPES_FILE")]
    pub types: Option<PathBuf>,

    /// Don't emit word parts ("PowerShot" -> "Power" "Shot")
    #[arg(long)]
    pub no_word_parts: bool,

    /// Don't emit number parts ("500-42" -> "500" "42")
    #[arg(long)]
    pub no_number_parts: bool,

    /// Join runs of word parts ("wi-fi" -> "wifi")
    #[arg(long)]
    pub catenate_words: bool,

    /// Join runs of number parts ("500-42" -> "50042")
    #[arg(long)]
    pub catenate_numbers: bool,

    /// Join all parts ("wi-fi-4000" -> "wifi4000")
    #[arg(long)]
    pub catenate_all: bool,

    /// Also emit the original token
    #[arg(long)]
    pub preserve_original: bool,

    /// Don't split on lower-to-upper case transitions
    #[arg(long)]
    pub no_split_on_case_change: bool,

    /// Don't split on letter-digit transitions
    #[arg(long)]
    pub no_split_on_numerics: bool,

    /// Keep trailing 's
    #[arg(long)]
    pub no_stem_possessive: bool,
}

impl SplitArgs {
    /// Apply the flags given on the command line on top of `base`.
    pub fn apply_to(&self, base: WordDelimiterConfig) -> WordDelimiterConfig {
        let mut config = base;
        if self.no_word_parts {
            config.generate_word_parts = false;
        }
        if self.no_number_parts {
            config.generate_number_parts = false;
        }
        if self.catenate_words {
            config.catenate_words = true;
        }
        if self.catenate_numbers {
            config.catenate_numbers = true;
        }
        if self.catenate_all {
            config.catenate_all = true;
        }
        if self.preserve_original {
            config.preserve_original = true;
        }
        if self.no_split_on_case_change {
            config.split_on_case_change = false;
        }
        if self.no_split_on_numerics {
            config.split_on_numerics = false;
        }
        if self.no_stem_possessive {
            config.stem_english_possessive = false;
        }
        config
    }
}

/// Arguments for the check-types command
#[derive(Args, Debug, Clone)]
pub struct CheckTypesArgs {
    /// Rule file to validate
    #[arg(value_name = "TYPES_FILE")]
    pub types_file: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
