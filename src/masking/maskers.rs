//! Built-in value maskers.
//!
//! - [`FixedStringMasker`] - Replace any value with a fixed JSON string (`"***"`)
//! - [`CharacterMasker`] - Replace each character of a string value with a token
//! - [`DigitMasker`] - Replace a number with a run of one digit
//! - [`BooleanMasker`] - Replace a boolean with a fixed literal

use crate::error::{MaskerError, Result};

use super::value_masker::{ValueMasker, ValueMaskerContext, ValueMaskerError};

/// Default replacement for string values.
pub const DEFAULT_STRING_MASK: &str = "***";
/// Default replacement for boolean values (emitted as a JSON string).
pub const DEFAULT_BOOLEAN_MASK: &str = "&&&";

/// Encode `token` as a quoted JSON string.
pub(crate) fn json_string(token: &str) -> Result<Vec<u8>> {
    serde_json::to_vec(token)
        .map_err(|e| MaskerError::config(format!("mask token cannot be encoded: {}", e)))
}

/// Replaces a value with a fixed, pre-encoded JSON string.
#[derive(Debug, Clone)]
pub struct FixedStringMasker {
    replacement: Vec<u8>,
}

impl FixedStringMasker {
    /// Create a masker emitting `token` as a JSON string.
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            replacement: json_string(token)?,
        })
    }
}

impl ValueMasker for FixedStringMasker {
    fn mask(&self, _context: &ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError> {
        Ok(self.replacement.clone())
    }
}

/// Replaces every character of a string value with a token.
///
/// Escape sequences count as the single character they encode, so
/// `"a\nb"` masks to three tokens. With a fixed length, the token is
/// repeated that many times regardless of the input.
#[derive(Debug, Clone)]
pub struct CharacterMasker {
    /// Token already escaped for use inside a JSON string.
    token: Vec<u8>,
    length: Option<usize>,
}

impl CharacterMasker {
    /// Create a masker repeating `token` once per character, or `length` times.
    pub fn new(token: &str, length: Option<usize>) -> Result<Self> {
        let quoted = json_string(token)?;
        let token = quoted[1..quoted.len() - 1].to_vec();
        Ok(Self { token, length })
    }
}

impl ValueMasker for CharacterMasker {
    fn mask(&self, context: &ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError> {
        let count = self
            .length
            .unwrap_or_else(|| count_characters(context.string_contents()));
        let mut out = Vec::with_capacity(self.token.len() * count + 2);
        out.push(b'"');
        for _ in 0..count {
            out.extend_from_slice(&self.token);
        }
        out.push(b'"');
        Ok(out)
    }
}

/// Count the characters a raw JSON string body decodes to.
fn count_characters(raw: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'\\' {
            let is_unicode = raw.get(i + 1) == Some(&b'u');
            let pair_follows = raw[(i + 6).min(raw.len())..].starts_with(b"\\u");
            if is_unicode && is_high_surrogate(&raw[i..]) && pair_follows {
                // a surrogate pair encodes one character
                i += 12;
            } else if is_unicode {
                i += 6;
            } else {
                i += 2;
            }
        } else {
            // skip UTF-8 continuation bytes
            i += 1;
            while i < raw.len() && raw[i] & 0xC0 == 0x80 {
                i += 1;
            }
        }
        count += 1;
    }
    count
}

fn is_high_surrogate(escape: &[u8]) -> bool {
    matches!(escape.get(2..4), Some([b'd' | b'D', b'8' | b'9' | b'a' | b'b' | b'A' | b'B']))
}

/// Replaces a number with `digit` repeated once per digit of the original,
/// or `length` times when a fixed length is configured.
#[derive(Debug, Clone)]
pub struct DigitMasker {
    digit: u8,
    length: Option<usize>,
}

impl DigitMasker {
    /// Create a digit masker.
    ///
    /// `digit` must be in `1..=9` and `length` must not be zero, otherwise the
    /// output would not be a valid JSON number.
    pub fn new(digit: u8, length: Option<usize>) -> Result<Self> {
        if !(1..=9).contains(&digit) {
            return Err(MaskerError::config(format!(
                "number mask digit must be between 1 and 9, got {}",
                digit
            )));
        }
        if length == Some(0) {
            return Err(MaskerError::config(
                "obfuscation length must be at least 1 when masking numbers with digits",
            ));
        }
        Ok(Self {
            digit: b'0' + digit,
            length,
        })
    }
}

impl ValueMasker for DigitMasker {
    fn mask(&self, context: &ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError> {
        let count = match self.length {
            Some(length) => length,
            None => context
                .as_bytes()
                .iter()
                .filter(|b| b.is_ascii_digit())
                .count()
                .max(1),
        };
        Ok(vec![self.digit; count])
    }
}

/// Replaces a boolean with a fixed `true` or `false`.
#[derive(Debug, Clone, Copy)]
pub struct BooleanMasker {
    value: bool,
}

impl BooleanMasker {
    /// Create a masker emitting `value`.
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

impl ValueMasker for BooleanMasker {
    fn mask(&self, _context: &ValueMaskerContext<'_>) -> std::result::Result<Vec<u8>, ValueMaskerError> {
        Ok(if self.value { b"true".to_vec() } else { b"false".to_vec() })
    }
}
