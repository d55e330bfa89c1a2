//! Value masker protocol.
//!
//! A [`ValueMasker`] is invoked once per targeted value. It receives a
//! [`ValueMaskerContext`] borrowing the value's bytes and returns the bytes to
//! write in its place, or a [`ValueMaskerError`] whose offset is relative to
//! the start of the value. The scanner turns that relative offset into an
//! absolute one before the error leaves the masker.
//!
//! Any `Fn(&ValueMaskerContext<'_>) -> Result<Vec<u8>, ValueMaskerError>`
//! closure implements the trait.
//!
//! # Example
//!
//! ```
//! use jsonmask::masking::{ValueMasker, ValueMaskerContext, ValueMaskerError};
//!
//! let upper = |ctx: &ValueMaskerContext<'_>| -> Result<Vec<u8>, ValueMaskerError> {
//!     Ok(ctx.as_bytes().to_ascii_uppercase())
//! };
//!
//! let json = br#"{"a":"abc"}"#;
//! let ctx = ValueMaskerContext::new(json, 5, 10);
//! assert_eq!(upper.mask(&ctx).unwrap(), br#""ABC""#);
//! ```

use std::fmt;

use crate::error::MaskerError;

/// Failure raised by a value masker, positioned relative to the value start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMaskerError {
    message: String,
    relative_index: usize,
}

impl ValueMaskerError {
    /// Create an error at `relative_index` bytes from the start of the value.
    pub fn new(message: impl Into<String>, relative_index: usize) -> Self {
        Self {
            message: message.into(),
            relative_index,
        }
    }

    /// Caller-supplied message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offset from the first byte of the value.
    pub fn relative_index(&self) -> usize {
        self.relative_index
    }

    /// Resolve against the value's absolute start in the input buffer.
    pub fn into_invalid_json(self, value_start: usize) -> MaskerError {
        MaskerError::InvalidJson {
            message: self.message,
            index: value_start.saturating_add(self.relative_index),
        }
    }
}

impl fmt::Display for ValueMaskerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at relative index {}", self.message, self.relative_index)
    }
}

impl std::error::Error for ValueMaskerError {}

/// Borrowed view of one value being masked.
///
/// The span covers the raw JSON token: strings include both quotes.
#[derive(Debug, Clone, Copy)]
pub struct ValueMaskerContext<'a> {
    buffer: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> ValueMaskerContext<'a> {
    /// Create a context for `buffer[start..end]`.
    pub fn new(buffer: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(buffer.len());
        Self {
            buffer,
            start: start.min(end),
            end,
        }
    }

    /// Raw bytes of the value token.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buffer[self.start..self.end]
    }

    /// Length of the value token in bytes.
    pub fn byte_length(&self) -> usize {
        self.end - self.start
    }

    /// Byte at `index` relative to the value start.
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_bytes().get(index).copied()
    }

    /// Absolute start of the value in the input buffer.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute end (exclusive) of the value in the input buffer.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The value token as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// Contents of a string value without its surrounding quotes.
    ///
    /// Returns the whole token for non-string values.
    pub fn string_contents(&self) -> &'a [u8] {
        let bytes = self.as_bytes();
        match bytes {
            [b'"', inner @ .., b'"'] => inner,
            _ => bytes,
        }
    }

    /// Build an error for this value at `relative_index`.
    pub fn invalid_json(&self, message: impl Into<String>, relative_index: usize) -> ValueMaskerError {
        ValueMaskerError::new(message, relative_index)
    }
}

/// Produces replacement bytes for a targeted value.
///
/// Implementations must be stateless with respect to individual calls so one
/// masker can serve concurrent scans.
pub trait ValueMasker: Send + Sync {
    /// Return the bytes that replace the value described by `context`.
    fn mask(&self, context: &ValueMaskerContext<'_>) -> Result<Vec<u8>, ValueMaskerError>;
}

impl<F> ValueMasker for F
where
    F: Fn(&ValueMaskerContext<'_>) -> Result<Vec<u8>, ValueMaskerError> + Send + Sync,
{
    fn mask(&self, context: &ValueMaskerContext<'_>) -> Result<Vec<u8>, ValueMaskerError> {
        self(context)
    }
}
