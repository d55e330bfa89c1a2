//! Check-config command implementation.
//!
//! The `jsonmask check-config` command loads and validates a masking config
//! file and reports which algorithm it would run with.

use std::io::Write;
use std::path::PathBuf;

use crate::config::load_masking_config;
use crate::error::{MaskerError, Result};
use crate::masker::JsonMasker;

use super::dispatcher::{Command, CommandResult};

/// The check-config command implementation.
pub struct CheckConfigCommand {
    file: Option<PathBuf>,
}

impl CheckConfigCommand {
    /// Create a new check-config command.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }
}

impl Command for CheckConfigCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let Some(path) = &self.file else {
            return Err(MaskerError::config(
                "no config file given; pass a path or --config",
            ));
        };

        let masker = JsonMasker::new(load_masking_config(path)?)?;
        let config = masker.config();
        writeln!(
            out,
            "{}: {} keys, {} JSON paths, {:?} mode, algorithm {}",
            path.display(),
            config.target_keys().len(),
            config.target_paths().len(),
            config.target_key_mode(),
            masker.algorithm()
        )?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reports_valid_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.yml");
        fs::write(&path, "mask_keys: [a, b]\n").unwrap();

        let mut out = Vec::new();
        let result = CheckConfigCommand::new(Some(path)).execute(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(result.success);
        assert!(output.contains("2 keys"));
        assert!(output.contains("Mask mode"));
        assert!(output.contains("algorithm key-set"));
    }

    #[test]
    fn rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.yml");
        fs::write(&path, "mask_keys: [a]\nallow_keys: [b]\n").unwrap();

        let err = CheckConfigCommand::new(Some(path))
            .execute(&mut Vec::new())
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn requires_a_file() {
        let err = CheckConfigCommand::new(None)
            .execute(&mut Vec::new())
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
