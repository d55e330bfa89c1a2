//! Validated, immutable masking configuration.
//!
//! [`MaskingConfig`] is only obtainable through [`MaskingConfigBuilder::build`],
//! which rejects contradictory settings up front so that nothing can go wrong
//! with the configuration once masking has started.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::json_path::normalize_json_path;
use crate::error::{MaskerError, Result};
use crate::masking::maskers::{
    BooleanMasker, CharacterMasker, DigitMasker, FixedStringMasker, DEFAULT_BOOLEAN_MASK,
    DEFAULT_STRING_MASK,
};
use crate::masking::{AlgorithmType, ValueMasker, ValueMaskerContext, ValueMaskerError};

/// Digit used by the default number masker.
pub const DEFAULT_NUMBER_DIGIT: u8 = 8;

/// How target keys are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKeyMode {
    /// Values of the target keys are masked.
    #[default]
    Mask,
    /// Every value except those of the target keys is masked.
    Allow,
}

/// Immutable masking configuration.
#[derive(Clone)]
pub struct MaskingConfig {
    target_keys: BTreeSet<String>,
    target_paths: BTreeSet<String>,
    mode: TargetKeyMode,
    case_insensitive: bool,
    mask_nested_values: bool,
    obfuscation_length: Option<usize>,
    algorithm: Option<AlgorithmType>,
    string_masker: Arc<dyn ValueMasker>,
    number_masker: Arc<dyn ValueMasker>,
    boolean_masker: Arc<dyn ValueMasker>,
}

impl MaskingConfig {
    /// Start building a configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonmask::config::{MaskingConfig, TargetKeyMode};
    ///
    /// let config = MaskingConfig::builder()
    ///     .mask_keys(["password", "token"])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.target_key_mode(), TargetKeyMode::Mask);
    /// assert_eq!(config.target_keys().len(), 2);
    /// ```
    pub fn builder() -> MaskingConfigBuilder {
        MaskingConfigBuilder::default()
    }

    /// Target key names.
    pub fn target_keys(&self) -> &BTreeSet<String> {
        &self.target_keys
    }

    /// Normalized target JSON paths.
    pub fn target_paths(&self) -> &BTreeSet<String> {
        &self.target_paths
    }

    /// Whether targets are masked or allowed.
    pub fn target_key_mode(&self) -> TargetKeyMode {
        self.mode
    }

    /// Whether keys are compared with ASCII case folding.
    pub fn case_insensitive_target_keys(&self) -> bool {
        self.case_insensitive
    }

    /// Whether a target key's object or array value is treated as a whole.
    pub fn mask_nested_values(&self) -> bool {
        self.mask_nested_values
    }

    /// Fixed output length for character and digit masking.
    pub fn obfuscation_length(&self) -> Option<usize> {
        self.obfuscation_length
    }

    /// Explicitly requested algorithm, if any.
    pub fn algorithm(&self) -> Option<AlgorithmType> {
        self.algorithm
    }

    /// Masker applied to string values.
    pub fn string_masker(&self) -> &dyn ValueMasker {
        self.string_masker.as_ref()
    }

    /// Masker applied to number values.
    pub fn number_masker(&self) -> &dyn ValueMasker {
        self.number_masker.as_ref()
    }

    /// Masker applied to boolean values.
    pub fn boolean_masker(&self) -> &dyn ValueMasker {
        self.boolean_masker.as_ref()
    }
}

impl fmt::Debug for MaskingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskingConfig")
            .field("target_keys", &self.target_keys)
            .field("target_paths", &self.target_paths)
            .field("mode", &self.mode)
            .field("case_insensitive", &self.case_insensitive)
            .field("mask_nested_values", &self.mask_nested_values)
            .field("obfuscation_length", &self.obfuscation_length)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default)]
enum StringMasking {
    #[default]
    Default,
    Fixed(String),
    Characters(String),
    Custom(Arc<dyn ValueMasker>),
}

#[derive(Clone, Default)]
enum NumberMasking {
    #[default]
    Default,
    Digit(u8),
    Fixed(String),
    Custom(Arc<dyn ValueMasker>),
}

#[derive(Clone, Default)]
enum BooleanMasking {
    #[default]
    Default,
    Literal(bool),
    Fixed(String),
    Custom(Arc<dyn ValueMasker>),
}

/// Builder for [`MaskingConfig`].
#[derive(Clone, Default)]
pub struct MaskingConfigBuilder {
    mask_keys: Vec<String>,
    allow_keys: Vec<String>,
    mask_paths: Vec<String>,
    allow_paths: Vec<String>,
    case_insensitive: bool,
    mask_nested_values: bool,
    obfuscation_length: Option<usize>,
    algorithm: Option<AlgorithmType>,
    strings: StringMasking,
    numbers: NumberMasking,
    booleans: BooleanMasking,
}

impl MaskingConfigBuilder {
    /// Mask the values of these keys.
    pub fn mask_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mask_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Mask every value except those of these keys.
    pub fn allow_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Mask the values at these JSON paths.
    pub fn mask_json_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mask_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Mask every value except those at these JSON paths.
    pub fn allow_json_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Compare keys and paths with ASCII case folding.
    pub fn case_insensitive_target_keys(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Treat a target key's object or array value as a whole: mask it
    /// entirely in mask mode, keep it entirely in allow mode.
    pub fn mask_nested_values(mut self) -> Self {
        self.mask_nested_values = true;
        self
    }

    /// Replace string values with `token` as a JSON string.
    pub fn mask_strings_with(mut self, token: impl Into<String>) -> Self {
        self.strings = StringMasking::Fixed(token.into());
        self
    }

    /// Replace each character of a string value with `token`.
    pub fn mask_string_characters_with(mut self, token: impl Into<String>) -> Self {
        self.strings = StringMasking::Characters(token.into());
        self
    }

    /// Mask string values with a custom function.
    pub fn mask_strings_with_fn<F>(mut self, masker: F) -> Self
    where
        F: Fn(&ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError>
            + Send
            + Sync
            + 'static,
    {
        self.strings = StringMasking::Custom(Arc::new(masker));
        self
    }

    /// Replace numbers with `digit` repeated (digit must be 1-9).
    pub fn mask_numbers_with(mut self, digit: u8) -> Self {
        self.numbers = NumberMasking::Digit(digit);
        self
    }

    /// Replace numbers with `token` as a JSON string.
    pub fn mask_numbers_with_string(mut self, token: impl Into<String>) -> Self {
        self.numbers = NumberMasking::Fixed(token.into());
        self
    }

    /// Mask number values with a custom function.
    pub fn mask_numbers_with_fn<F>(mut self, masker: F) -> Self
    where
        F: Fn(&ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError>
            + Send
            + Sync
            + 'static,
    {
        self.numbers = NumberMasking::Custom(Arc::new(masker));
        self
    }

    /// Replace booleans with the literal `value`.
    pub fn mask_booleans_with(mut self, value: bool) -> Self {
        self.booleans = BooleanMasking::Literal(value);
        self
    }

    /// Replace booleans with `token` as a JSON string.
    pub fn mask_booleans_with_string(mut self, token: impl Into<String>) -> Self {
        self.booleans = BooleanMasking::Fixed(token.into());
        self
    }

    /// Mask boolean values with a custom function.
    pub fn mask_booleans_with_fn<F>(mut self, masker: F) -> Self
    where
        F: Fn(&ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError>
            + Send
            + Sync
            + 'static,
    {
        self.booleans = BooleanMasking::Custom(Arc::new(masker));
        self
    }

    /// Fixed output length for character masking and digit masking.
    pub fn obfuscation_length(mut self, length: usize) -> Self {
        self.obfuscation_length = Some(length);
        self
    }

    /// Force a specific algorithm instead of selecting one automatically.
    pub fn algorithm(mut self, algorithm: AlgorithmType) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Validate the settings and produce an immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` when no targets are given, mask and allow
    /// targets are mixed, a JSON path is malformed, masking strategies
    /// contradict each other, or the forced algorithm cannot express the targets.
    pub fn build(self) -> Result<MaskingConfig> {
        let has_mask = !self.mask_keys.is_empty() || !self.mask_paths.is_empty();
        let has_allow = !self.allow_keys.is_empty() || !self.allow_paths.is_empty();
        let (mode, keys, paths) = match (has_mask, has_allow) {
            (true, true) => {
                return Err(MaskerError::config(
                    "mask targets and allow targets cannot be combined",
                ))
            }
            (false, false) => {
                return Err(MaskerError::config(
                    "at least one target key or JSON path is required",
                ))
            }
            (true, false) => (TargetKeyMode::Mask, self.mask_keys, self.mask_paths),
            (false, true) => (TargetKeyMode::Allow, self.allow_keys, self.allow_paths),
        };

        let target_keys: BTreeSet<String> = keys.into_iter().collect();
        if target_keys.iter().any(String::is_empty) {
            return Err(MaskerError::config("target keys must not be empty strings"));
        }
        let target_paths = paths
            .iter()
            .map(|path| normalize_json_path(path))
            .collect::<Result<BTreeSet<_>>>()?;

        let kind = self
            .algorithm
            .unwrap_or_else(|| AlgorithmType::select(target_keys.len(), target_paths.len()));
        if !kind.supports(target_keys.len(), target_paths.len()) {
            return Err(MaskerError::config(format!(
                "algorithm {} cannot handle {} keys and {} JSON paths",
                kind,
                target_keys.len(),
                target_paths.len()
            )));
        }

        let length = self.obfuscation_length;
        if length.is_some() {
            let custom = [
                ("string", matches!(self.strings, StringMasking::Custom(_))),
                ("number", matches!(self.numbers, NumberMasking::Custom(_))),
                ("boolean", matches!(self.booleans, BooleanMasking::Custom(_))),
            ];
            if let Some((kind, _)) = custom.iter().find(|(_, is_custom)| *is_custom) {
                return Err(MaskerError::config(format!(
                    "obfuscation length cannot be combined with a custom {} masker",
                    kind
                )));
            }
        }

        let string_masker: Arc<dyn ValueMasker> = match self.strings {
            StringMasking::Default => Arc::new(FixedStringMasker::new(DEFAULT_STRING_MASK)?),
            StringMasking::Fixed(token) => Arc::new(FixedStringMasker::new(&token)?),
            StringMasking::Characters(token) => Arc::new(CharacterMasker::new(&token, length)?),
            StringMasking::Custom(masker) => masker,
        };
        let number_masker: Arc<dyn ValueMasker> = match self.numbers {
            NumberMasking::Default => Arc::new(DigitMasker::new(DEFAULT_NUMBER_DIGIT, length)?),
            NumberMasking::Digit(digit) => Arc::new(DigitMasker::new(digit, length)?),
            NumberMasking::Fixed(token) => Arc::new(FixedStringMasker::new(&token)?),
            NumberMasking::Custom(masker) => masker,
        };
        let boolean_masker: Arc<dyn ValueMasker> = match self.booleans {
            BooleanMasking::Default => Arc::new(FixedStringMasker::new(DEFAULT_BOOLEAN_MASK)?),
            BooleanMasking::Literal(value) => Arc::new(BooleanMasker::new(value)),
            BooleanMasking::Fixed(token) => Arc::new(FixedStringMasker::new(&token)?),
            BooleanMasking::Custom(masker) => masker,
        };

        Ok(MaskingConfig {
            target_keys,
            target_paths,
            mode,
            case_insensitive: self.case_insensitive,
            mask_nested_values: self.mask_nested_values,
            obfuscation_length: length,
            algorithm: self.algorithm,
            string_masker,
            number_masker,
            boolean_masker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keys_set_mask_mode() {
        let config = MaskingConfig::builder().mask_keys(["a", "b", "a"]).build().unwrap();

        assert_eq!(config.target_key_mode(), TargetKeyMode::Mask);
        assert_eq!(config.target_keys().len(), 2);
        assert!(config.target_paths().is_empty());
        assert!(!config.case_insensitive_target_keys());
    }

    #[test]
    fn allow_keys_set_allow_mode() {
        let config = MaskingConfig::builder().allow_keys(["id"]).build().unwrap();
        assert_eq!(config.target_key_mode(), TargetKeyMode::Allow);
    }

    #[test]
    fn empty_targets_rejected() {
        let err = MaskingConfig::builder().build().unwrap_err();
        assert!(matches!(err, MaskerError::ConfigValidation { .. }));

        let err = MaskingConfig::builder()
            .mask_keys(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn empty_key_string_rejected() {
        assert!(MaskingConfig::builder().mask_keys([""]).build().is_err());
    }

    #[test]
    fn mixing_mask_and_allow_rejected() {
        let err = MaskingConfig::builder()
            .mask_keys(["a"])
            .allow_json_paths(["$.b"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn digit_obfuscation_with_zero_length_rejected() {
        let err = MaskingConfig::builder()
            .mask_keys(["hello"])
            .mask_numbers_with(1)
            .obfuscation_length(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MaskerError::ConfigValidation { .. }));
    }

    #[test]
    fn default_number_masker_with_zero_length_rejected() {
        assert!(MaskingConfig::builder()
            .mask_keys(["hello"])
            .obfuscation_length(0)
            .build()
            .is_err());
    }

    #[test]
    fn zero_length_allowed_when_numbers_use_strings() {
        assert!(MaskingConfig::builder()
            .mask_keys(["hello"])
            .mask_numbers_with_string("###")
            .obfuscation_length(0)
            .build()
            .is_ok());
    }

    #[test]
    fn custom_number_masker_with_obfuscation_rejected() {
        let err = MaskingConfig::builder()
            .mask_keys(["hello"])
            .mask_numbers_with_fn(|_| Ok(b"0".to_vec()))
            .obfuscation_length(3)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("custom number masker"));
    }

    #[test]
    fn custom_string_masker_with_obfuscation_rejected() {
        let err = MaskingConfig::builder()
            .mask_keys(["a"])
            .mask_strings_with_fn(|_| Ok(b"\"x\"".to_vec()))
            .mask_numbers_with_string("###")
            .obfuscation_length(3)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("custom string masker"));
    }

    #[test]
    fn custom_boolean_masker_with_obfuscation_rejected() {
        let err = MaskingConfig::builder()
            .mask_keys(["a"])
            .mask_booleans_with_fn(|_| Ok(b"false".to_vec()))
            .obfuscation_length(2)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("custom boolean masker"));
    }

    #[test]
    fn custom_maskers_without_obfuscation_accepted() {
        assert!(MaskingConfig::builder()
            .mask_keys(["a"])
            .mask_strings_with_fn(|_| Ok(b"\"x\"".to_vec()))
            .mask_booleans_with_fn(|_| Ok(b"false".to_vec()))
            .build()
            .is_ok());
    }

    #[test]
    fn invalid_digit_rejected() {
        assert!(MaskingConfig::builder()
            .mask_keys(["a"])
            .mask_numbers_with(0)
            .build()
            .is_err());
    }

    #[test]
    fn json_paths_are_normalized() {
        let config = MaskingConfig::builder()
            .mask_json_paths(["$['user'].password"])
            .build()
            .unwrap();
        assert!(config.target_paths().contains("$.user.password"));
    }

    #[test]
    fn invalid_json_path_rejected() {
        assert!(MaskingConfig::builder()
            .mask_json_paths(["user.password"])
            .build()
            .is_err());
    }

    #[test]
    fn forced_algorithm_must_support_targets() {
        assert!(MaskingConfig::builder()
            .mask_keys(["a", "b"])
            .algorithm(AlgorithmType::SingleTarget)
            .build()
            .is_err());
        assert!(MaskingConfig::builder()
            .mask_keys(["a"])
            .mask_json_paths(["$.b"])
            .algorithm(AlgorithmType::KeySet)
            .build()
            .is_err());
        assert!(MaskingConfig::builder()
            .mask_keys(["a"])
            .algorithm(AlgorithmType::RadixTrie)
            .build()
            .is_ok());
    }

    #[test]
    fn debug_output_lists_targets() {
        let config = MaskingConfig::builder().mask_keys(["secret"]).build().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("secret"));
        assert!(debug.contains("Mask"));
    }
}
