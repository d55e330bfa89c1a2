//! Interchangeable key lookup strategies for the scan loop.
//!
//! Every variant drives the same scanner and differs only in how it decides
//! whether an object key is a target, so all variants produce byte-identical
//! output for the same configuration and input:
//!
//! - [`AlgorithmType::SingleTarget`] - direct comparison against one key
//! - [`AlgorithmType::KeySet`] - hash set membership over the key bytes
//! - [`AlgorithmType::RadixTrie`] - byte-by-byte radix trie walk, path aware

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MaskingConfig;
use crate::error::{MaskerError, Result};
use crate::matcher::KeyMatcher;

use super::scanner::Scanner;

/// Largest key set for which the hash set variant is chosen automatically.
pub const KEY_SET_MAX_KEYS: usize = 16;

/// Selectable scan strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmType {
    /// Compare every key against a single target.
    SingleTarget,
    /// Look keys up in a hash set.
    KeySet,
    /// Walk a radix trie; the only variant that understands JSON paths.
    RadixTrie,
}

impl AlgorithmType {
    /// All variants, in selection preference order.
    pub const ALL: [AlgorithmType; 3] = [Self::SingleTarget, Self::KeySet, Self::RadixTrie];

    /// Pick a variant from the static shape of the configured targets.
    pub fn select(key_count: usize, path_count: usize) -> Self {
        if path_count > 0 || key_count > KEY_SET_MAX_KEYS {
            Self::RadixTrie
        } else if key_count == 1 {
            Self::SingleTarget
        } else {
            Self::KeySet
        }
    }

    /// Whether this variant can express the given target shape.
    pub fn supports(self, key_count: usize, path_count: usize) -> bool {
        match self {
            Self::SingleTarget => key_count == 1 && path_count == 0,
            Self::KeySet => path_count == 0,
            Self::RadixTrie => true,
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SingleTarget => "single-target",
            Self::KeySet => "key-set",
            Self::RadixTrie => "radix-trie",
        };
        f.write_str(name)
    }
}

/// Decides whether an object key is a target.
pub trait KeyProbe: Send + Sync {
    /// Whether `buffer[start..end]` (the key without quotes) is a target key.
    fn is_target(&self, buffer: &[u8], start: usize, end: usize) -> bool;

    /// Path matcher, for variants that track JSON paths.
    fn paths(&self) -> Option<&KeyMatcher> {
        None
    }
}

/// Compares each key with one configured target.
#[derive(Debug, Clone)]
pub struct SingleTargetProbe {
    key: Vec<u8>,
    case_insensitive: bool,
}

impl KeyProbe for SingleTargetProbe {
    fn is_target(&self, buffer: &[u8], start: usize, end: usize) -> bool {
        let Some(key) = buffer.get(start..end) else {
            return false;
        };
        if self.case_insensitive {
            key.eq_ignore_ascii_case(&self.key)
        } else {
            key == self.key.as_slice()
        }
    }
}

/// Looks keys up in a hash set.
#[derive(Debug, Clone)]
pub struct KeySetProbe {
    keys: HashSet<Vec<u8>>,
    case_insensitive: bool,
}

impl KeyProbe for KeySetProbe {
    fn is_target(&self, buffer: &[u8], start: usize, end: usize) -> bool {
        let Some(key) = buffer.get(start..end) else {
            return false;
        };
        if self.case_insensitive {
            self.keys.contains(&key.to_ascii_lowercase())
        } else {
            self.keys.contains(key)
        }
    }
}

impl KeyProbe for KeyMatcher {
    fn is_target(&self, buffer: &[u8], start: usize, end: usize) -> bool {
        self.matches(buffer, start, end)
    }

    fn paths(&self) -> Option<&KeyMatcher> {
        self.is_path_aware().then_some(self)
    }
}

/// The selected strategy, built once per masker.
#[derive(Debug, Clone)]
pub(crate) enum Algorithm {
    SingleTarget(SingleTargetProbe),
    KeySet(KeySetProbe),
    RadixTrie(KeyMatcher),
}

impl Algorithm {
    /// Build the configured (or automatically selected) variant.
    pub(crate) fn build(config: &MaskingConfig) -> Result<Self> {
        let key_count = config.target_keys().len();
        let path_count = config.target_paths().len();
        if key_count + path_count == 0 {
            return Err(MaskerError::config("at least one target key or JSON path is required"));
        }
        let kind = config
            .algorithm()
            .unwrap_or_else(|| AlgorithmType::select(key_count, path_count));
        if !kind.supports(key_count, path_count) {
            return Err(MaskerError::config(format!(
                "algorithm {} cannot handle {} keys and {} JSON paths",
                kind, key_count, path_count
            )));
        }

        let case_insensitive = config.case_insensitive_target_keys();
        let fold = |key: &String| {
            if case_insensitive {
                key.as_bytes().to_ascii_lowercase()
            } else {
                key.as_bytes().to_vec()
            }
        };
        let algorithm = match kind {
            AlgorithmType::SingleTarget => {
                let key = config.target_keys().iter().map(fold).next().unwrap_or_default();
                Self::SingleTarget(SingleTargetProbe {
                    key,
                    case_insensitive,
                })
            }
            AlgorithmType::KeySet => Self::KeySet(KeySetProbe {
                keys: config.target_keys().iter().map(fold).collect(),
                case_insensitive,
            }),
            AlgorithmType::RadixTrie => Self::RadixTrie(KeyMatcher::new(
                config.target_keys(),
                config.target_paths(),
                case_insensitive,
            )),
        };
        Ok(algorithm)
    }

    pub(crate) fn kind(&self) -> AlgorithmType {
        match self {
            Self::SingleTarget(_) => AlgorithmType::SingleTarget,
            Self::KeySet(_) => AlgorithmType::KeySet,
            Self::RadixTrie(_) => AlgorithmType::RadixTrie,
        }
    }

    /// Run one complete scan over `input`.
    pub(crate) fn mask(&self, input: &[u8], config: &MaskingConfig) -> Result<Vec<u8>> {
        match self {
            Self::SingleTarget(probe) => Scanner::new(input, config, probe).run(),
            Self::KeySet(probe) => Scanner::new(input, config, probe).run(),
            Self::RadixTrie(matcher) => Scanner::new(input, config, matcher).run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_target_shape() {
        assert_eq!(AlgorithmType::select(1, 0), AlgorithmType::SingleTarget);
        assert_eq!(AlgorithmType::select(2, 0), AlgorithmType::KeySet);
        assert_eq!(AlgorithmType::select(KEY_SET_MAX_KEYS, 0), AlgorithmType::KeySet);
        assert_eq!(AlgorithmType::select(KEY_SET_MAX_KEYS + 1, 0), AlgorithmType::RadixTrie);
        assert_eq!(AlgorithmType::select(1, 1), AlgorithmType::RadixTrie);
        assert_eq!(AlgorithmType::select(0, 3), AlgorithmType::RadixTrie);
    }

    #[test]
    fn support_matrix() {
        assert!(AlgorithmType::SingleTarget.supports(1, 0));
        assert!(!AlgorithmType::SingleTarget.supports(2, 0));
        assert!(!AlgorithmType::KeySet.supports(2, 1));
        assert!(AlgorithmType::RadixTrie.supports(40, 3));
    }

    #[test]
    fn probes_agree_on_membership() {
        let buffer = br#"{"Token":1,"tok":2,"token":3}"#;
        let single = SingleTargetProbe {
            key: b"token".to_vec(),
            case_insensitive: false,
        };
        let set = KeySetProbe {
            keys: [b"token".to_vec()].into_iter().collect(),
            case_insensitive: false,
        };
        let trie = KeyMatcher::new(["token"], Vec::<&str>::new(), false);

        for (start, end, expected) in [(2, 7, false), (12, 15, false), (20, 25, true)] {
            assert_eq!(single.is_target(buffer, start, end), expected);
            assert_eq!(set.is_target(buffer, start, end), expected);
            assert_eq!(trie.is_target(buffer, start, end), expected);
        }
    }

    #[test]
    fn case_insensitive_probes() {
        let buffer = br#"{"ToKeN":1}"#;
        let single = SingleTargetProbe {
            key: b"token".to_vec(),
            case_insensitive: true,
        };
        let set = KeySetProbe {
            keys: [b"token".to_vec()].into_iter().collect(),
            case_insensitive: true,
        };
        assert!(single.is_target(buffer, 2, 7));
        assert!(set.is_target(buffer, 2, 7));
    }

    #[test]
    fn display_matches_cli_names() {
        assert_eq!(AlgorithmType::RadixTrie.to_string(), "radix-trie");
        assert_eq!(AlgorithmType::KeySet.to_string(), "key-set");
        assert_eq!(AlgorithmType::SingleTarget.to_string(), "single-target");
    }
}
