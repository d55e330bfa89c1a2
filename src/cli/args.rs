//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::FileConfig;
use crate::masking::AlgorithmType;

/// jsonmask - Mask sensitive values in JSON documents.
#[derive(Debug, Parser)]
#[command(name = "jsonmask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML or JSON masking config
    #[arg(short, long, global = true, env = "JSONMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mask a JSON document (default if no command specified)
    Mask(MaskArgs),

    /// Validate a masking config file
    CheckConfig(CheckConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `mask` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MaskArgs {
    /// JSON file to mask (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write the masked document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keys whose values are masked (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub mask_keys: Vec<String>,

    /// Keys whose values are kept; everything else is masked (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub allow_keys: Vec<String>,

    /// JSON paths whose values are masked (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub mask_paths: Vec<String>,

    /// JSON paths whose values are kept (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub allow_paths: Vec<String>,

    /// Match keys ignoring ASCII case
    #[arg(long)]
    pub case_insensitive: bool,

    /// Treat objects and arrays under a target key as a whole
    #[arg(long)]
    pub nested: bool,

    /// Replace string values with this token
    #[arg(long)]
    pub mask_strings_with: Option<String>,

    /// Replace each character of string values with this token
    #[arg(long)]
    pub mask_string_characters_with: Option<String>,

    /// Replace numbers with this digit repeated
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub mask_numbers_with: Option<u8>,

    /// Fixed length for character and digit masking
    #[arg(long)]
    pub obfuscation_length: Option<usize>,

    /// Force a scan algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmType>,
}

impl MaskArgs {
    /// Layer command-line settings over a file configuration.
    ///
    /// Target lists are extended, flags are OR-ed, and single values given on
    /// the command line replace those from the file.
    pub fn merge_into(&self, mut file: FileConfig) -> FileConfig {
        file.mask_keys.extend(self.mask_keys.iter().cloned());
        file.allow_keys.extend(self.allow_keys.iter().cloned());
        file.mask_json_paths.extend(self.mask_paths.iter().cloned());
        file.allow_json_paths.extend(self.allow_paths.iter().cloned());
        file.case_insensitive |= self.case_insensitive;
        file.mask_nested_values |= self.nested;

        if let Some(token) = &self.mask_strings_with {
            file.mask_strings_with = Some(token.clone());
            file.mask_string_characters_with = None;
        }
        if let Some(token) = &self.mask_string_characters_with {
            file.mask_string_characters_with = Some(token.clone());
            file.mask_strings_with = None;
        }
        if let Some(digit) = self.mask_numbers_with {
            file.mask_numbers_with = Some(digit);
            file.mask_numbers_with_string = None;
        }
        if self.obfuscation_length.is_some() {
            file.obfuscation_length = self.obfuscation_length;
        }
        if self.algorithm.is_some() {
            file.algorithm = self.algorithm;
        }
        file
    }
}

/// Arguments for the `check-config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckConfigArgs {
    /// Config file to check (defaults to --config)
    pub file: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
