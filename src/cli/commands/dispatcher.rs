//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, MaskArgs};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the command's primary output (stdout in the binary)
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher using the global `--config` path.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Mask(args)) => {
                let cmd = super::mask::MaskCommand::new(self.config_path.clone(), args.clone());
                cmd.execute(out)
            }
            Some(Commands::CheckConfig(args)) => {
                let file = args.file.clone().or_else(|| self.config_path.clone());
                let cmd = super::check_config::CheckConfigCommand::new(file);
                cmd.execute(out)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
            None => {
                // Default to masking stdin with the global config
                let cmd =
                    super::mask::MaskCommand::new(self.config_path.clone(), MaskArgs::default());
                cmd.execute(out)
            }
        }
    }
}
