//! Masker facade.
//!
//! [`JsonMasker`] turns a validated [`MaskingConfig`] into a reusable masker.
//! The key matcher and algorithm are built once; every [`JsonMasker::mask`]
//! call allocates its own scan state and output, so one instance can be shared
//! freely between threads.

use crate::config::MaskingConfig;
use crate::error::{MaskerError, Result};
use crate::masking::algorithm::Algorithm;
use crate::masking::AlgorithmType;

/// Masks target values in JSON documents.
///
/// # Example
///
/// ```
/// use jsonmask::{JsonMasker, MaskingConfig};
///
/// let config = MaskingConfig::builder().mask_keys(["password"]).build().unwrap();
/// let masker = JsonMasker::new(config).unwrap();
///
/// let masked = masker.mask_str(r#"{"user": "ann", "password": "hunter2"}"#).unwrap();
/// assert_eq!(masked, r#"{"user": "ann", "password": "***"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JsonMasker {
    config: MaskingConfig,
    algorithm: Algorithm,
}

impl JsonMasker {
    /// Build a masker for `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` if the configuration has no targets or its
    /// forced algorithm cannot handle them.
    pub fn new(config: MaskingConfig) -> Result<Self> {
        let algorithm = Algorithm::build(&config)?;
        tracing::debug!(
            algorithm = %algorithm.kind(),
            keys = config.target_keys().len(),
            paths = config.target_paths().len(),
            mode = ?config.target_key_mode(),
            "built json masker"
        );
        Ok(Self { config, algorithm })
    }

    /// Mask one complete JSON document.
    ///
    /// Returns the masked bytes, or the first error raised while masking; no
    /// partial output is produced on failure.
    pub fn mask(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.algorithm.mask(input, &self.config)
    }

    /// Mask a JSON document held in a string.
    pub fn mask_str(&self, input: &str) -> Result<String> {
        let masked = self.mask(input.as_bytes())?;
        String::from_utf8(masked).map_err(|e| {
            MaskerError::Other(anyhow::anyhow!(
                "masked output is not valid UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            ))
        })
    }

    /// The algorithm variant selected for this masker.
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm.kind()
    }

    /// The configuration this masker was built from.
    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }
}
