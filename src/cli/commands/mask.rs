//! Mask command implementation.
//!
//! The `jsonmask mask` command reads one JSON document from a file or stdin,
//! masks it with the layered configuration (config file, then flags), and
//! writes the result to stdout or `--output`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::cli::args::MaskArgs;
use crate::config::{load_config_file, FileConfig};
use crate::error::Result;
use crate::masker::JsonMasker;

use super::dispatcher::{Command, CommandResult};

/// The mask command implementation.
pub struct MaskCommand {
    config_path: Option<PathBuf>,
    args: MaskArgs,
}

impl MaskCommand {
    /// Create a new mask command.
    pub fn new(config_path: Option<PathBuf>, args: MaskArgs) -> Self {
        Self { config_path, args }
    }

    /// Build the masker from the config file (if any) and command-line flags.
    pub fn build_masker(&self) -> Result<JsonMasker> {
        let file = match &self.config_path {
            Some(path) => load_config_file(path)?,
            None => FileConfig::default(),
        };
        let config = self.args.merge_into(file).build()?;
        JsonMasker::new(config)
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.args.input {
            Some(path) => Ok(fs::read(path)?),
            None => {
                let mut buf = Vec::new();
                io::stdin().lock().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl Command for MaskCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let masker = self.build_masker()?;
        let input = self.read_input()?;
        tracing::debug!(
            bytes = input.len(),
            algorithm = %masker.algorithm(),
            "masking document"
        );

        let masked = masker.mask(&input)?;

        match &self.args.output {
            Some(path) => fs::write(path, &masked)?,
            None => {
                out.write_all(&masked)?;
                out.flush()?;
            }
        }
        Ok(CommandResult::success())
    }
}
