//! Command line argument parsing for the emend CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// emend - spelling correction for digitized historical essays
#[derive(Parser, Debug, Clone)]
#[command(name = "emend")]
#[command(about = "Spelling correction for digitized historical essays")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EmendArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EmendArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output formats supported by the CLI.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct a dataset with the edit-distance corrector
    Correct(CorrectArgs),

    /// Learn cluster correction rules from a dataset
    #[command(name = "learn-rules")]
    LearnRules(LearnRulesArgs),

    /// Evaluate correctors against gold-annotated corrections
    Evaluate(EvaluateArgs),
}

/// Arguments for correcting a dataset
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Path to the dataset (annotated digitization file, or plain text
    /// with one essay per line when --plain-text is set)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Path to the dictionary word list (one word per line)
    #[arg(short, long, value_name = "WORDS_FILE")]
    pub dictionary: PathBuf,

    /// Path to the edit-frequency file (lines of <edit><TAB><count>)
    #[arg(short, long, value_name = "COUNTS_FILE")]
    pub edit_counts: PathBuf,

    /// Path to the word-frequency file (lines of <word><TAB><count>)
    #[arg(short, long, value_name = "COUNTS_FILE")]
    pub word_counts: PathBuf,

    /// Maximum number of edits per correction
    #[arg(long, default_value = "1")]
    pub max_edits: usize,

    /// Prior probability that a word contains a spelling error
    #[arg(long, default_value = "0.01")]
    pub prob_spelling_error: f64,

    /// Words above this contextual probability are never corrected
    #[arg(long, default_value = "0.0001")]
    pub common_word_threshold: f64,

    /// Treat the dataset as plain text, one essay per line
    #[arg(long)]
    pub plain_text: bool,
}

/// Arguments for learning cluster rules
#[derive(Parser, Debug, Clone)]
pub struct LearnRulesArgs {
    /// Path to the dataset (annotated digitization file, or plain text
    /// with one essay per line when --plain-text is set)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Path to the dictionary word list (one word per line)
    #[arg(short, long, value_name = "WORDS_FILE")]
    pub dictionary: PathBuf,

    /// Maximum distance for a word to count as a cluster neighbor
    #[arg(long, default_value = "1")]
    pub max_distance: usize,

    /// Keep rules that only change capitalization
    #[arg(long)]
    pub correct_capitalization: bool,

    /// File to save the learned rule table to (JSON)
    #[arg(short, long, value_name = "RULES_FILE")]
    pub output: Option<PathBuf>,

    /// Treat the dataset as plain text, one essay per line
    #[arg(long)]
    pub plain_text: bool,
}

/// Arguments for evaluating correctors
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the annotated digitization file with gold corrections
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Path to the dictionary word list (one word per line)
    #[arg(short, long, value_name = "WORDS_FILE")]
    pub dictionary: PathBuf,

    /// Path to the edit-frequency file (lines of <edit><TAB><count>)
    #[arg(short, long, value_name = "COUNTS_FILE")]
    pub edit_counts: PathBuf,

    /// Path to the word-frequency file (lines of <word><TAB><count>)
    #[arg(short, long, value_name = "COUNTS_FILE")]
    pub word_counts: PathBuf,

    /// Maximum number of edits per correction
    #[arg(long, default_value = "1")]
    pub max_edits: usize,

    /// Prior probability that a word contains a spelling error
    #[arg(long, default_value = "0.01")]
    pub prob_spelling_error: f64,

    /// Maximum distance for a word to count as a cluster neighbor
    #[arg(long, default_value = "1")]
    pub max_distance: usize,
}
