//! Command-line interface definition using clap.
//!
//! This module defines [`Args`] and the helpers that turn it into a
//! [`ParserConfig`], an output path and a log level.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::config::ParserConfig;
use crate::error::Result;

/// Extract good-morning greetings from a text-message export and group
/// them by day for a calendar display.
#[derive(Parser, Debug, Clone)]
#[command(name = "greetpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    greetpack raw-messages.txt
    greetpack raw-messages.txt processed-messages.json --numbered
    greetpack chat.txt --owner-label Me --owner-tag ana --counterpart-tag leo
    greetpack chat.txt --config greetpack.json -vv")]
pub struct Args {
    /// Path to the text-message export
    pub input: PathBuf,

    /// Path to output file [default: <INPUT>_processed.json next to the input]
    pub output: Option<PathBuf>,

    /// JSON file with parser settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Line that marks the owner's own messages
    #[arg(long, value_name = "LABEL")]
    pub owner_label: Option<String>,

    /// Tag written for the owner's messages
    #[arg(long, value_name = "TAG")]
    pub owner_tag: Option<String>,

    /// Tag written for the other participant's messages
    #[arg(long, value_name = "TAG")]
    pub counterpart_tag: Option<String>,

    /// Add a messagesWithNumbers section numbering each day
    #[arg(short, long)]
    pub numbered: bool,

    /// Print nothing but errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Output path given on the command line, or the default next to the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    /// File name of the input, recorded in the document metadata.
    pub fn source_file(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }

    /// Parser settings: the config file if given, then command-line overrides.
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                serde_json::from_str(&json)?
            }
            None => ParserConfig::default(),
        };

        if let Some(label) = &self.owner_label {
            config.senders.owner_label.clone_from(label);
        }
        if let Some(tag) = &self.owner_tag {
            config.senders.owner_tag.clone_from(tag);
        }
        if let Some(tag) = &self.counterpart_tag {
            config.senders.counterpart_tag.clone_from(tag);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// `dir/name.txt` becomes `dir/name_processed.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "messages".to_string());

    input.with_file_name(format!("{stem}_processed.json"))
}
