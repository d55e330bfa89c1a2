//! Per-call cursor over the input buffer.

use std::fmt;

use crate::error::{MaskerError, Result};

/// Bytes of context shown on each side of the cursor by the `Display` impl.
const WINDOW: usize = 10;

/// Cursor and token bookkeeping for one masking pass.
///
/// Created fresh for every `mask()` call and never shared. The cursor only
/// moves forward and stays within `0..=buffer.len()`, where `buffer.len()`
/// means the scan reached the end of the input.
#[derive(Debug)]
pub struct MaskingState<'a> {
    buffer: &'a [u8],
    index: usize,
    token_start: Option<usize>,
}

impl<'a> MaskingState<'a> {
    /// Create a state positioned at the start of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            index: 0,
            token_start: None,
        }
    }

    /// The full input buffer.
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Current cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor has reached the end of the buffer.
    pub fn at_end(&self) -> bool {
        self.index >= self.buffer.len()
    }

    /// Byte under the cursor, or `None` at end of buffer.
    pub fn current(&self) -> Option<u8> {
        self.buffer.get(self.index).copied()
    }

    /// Byte `offset` positions after the cursor.
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.buffer.get(self.index.checked_add(offset)?).copied()
    }

    /// Move the cursor forward by `n` bytes.
    ///
    /// Fails with `InvalidState` if that would pass the end of the buffer.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        match self.index.checked_add(n) {
            Some(next) if next <= self.buffer.len() => {
                self.index = next;
                Ok(())
            }
            _ => Err(MaskerError::invalid_state(format!(
                "cannot advance {} bytes from index {} in a buffer of {} bytes: {}",
                n,
                self.index,
                self.buffer.len(),
                self
            ))),
        }
    }

    /// Move the cursor forward to `index`.
    pub fn advance_to(&mut self, index: usize) -> Result<()> {
        match index.checked_sub(self.index) {
            Some(n) => self.advance(n),
            None => Err(MaskerError::invalid_state(format!(
                "cursor cannot move backwards from {} to {}: {}",
                self.index, index, self
            ))),
        }
    }

    /// Skip JSON insignificant whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.current() {
            self.index += 1;
        }
    }

    /// Mark the cursor as the start of the token being scanned.
    pub fn start_token(&mut self) {
        self.token_start = Some(self.index);
    }

    /// Forget the current token.
    pub fn end_token(&mut self) {
        self.token_start = None;
    }

    /// Start index of the token being scanned.
    ///
    /// Fails with `InvalidState` when no token is active.
    pub fn current_token_start_index(&self) -> Result<usize> {
        self.token_start.ok_or_else(|| {
            MaskerError::invalid_state(format!(
                "no token is being scanned at index {}: {}",
                self.index, self
            ))
        })
    }
}

/// Renders a window of bytes around the cursor: `>` precedes the byte under
/// the cursor and `<` follows it when more input remains. At end of buffer the
/// cursor renders as `><end of buffer>`.
impl fmt::Display for MaskingState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.buffer.len();
        let index = self.index.min(len);
        let before = &self.buffer[index.saturating_sub(WINDOW)..index];
        f.write_str(&String::from_utf8_lossy(before))?;
        f.write_str(">")?;
        if index == len {
            return f.write_str("<end of buffer>");
        }
        f.write_str(&String::from_utf8_lossy(&self.buffer[index..=index]))?;
        let after_end = len.min(index + 1 + WINDOW);
        if index + 1 < after_end {
            f.write_str("<")?;
            f.write_str(&String::from_utf8_lossy(&self.buffer[index + 1..after_end]))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "{\n    \"maskMe\": \"some value\"\n}\n";

    #[test]
    fn renders_window_around_cursor() {
        let mut state = MaskingState::new(DOCUMENT.as_bytes());
        assert_eq!(state.to_string(), ">{<\n    \"mask");

        state.advance(10).unwrap();
        assert_eq!(state.to_string(), "{\n    \"mas>k<Me\": \"some");

        state.advance(20).unwrap();
        assert_eq!(state.to_string(), "e value\"\n}>\n");

        state.advance(1).unwrap();
        assert_eq!(state.to_string(), " value\"\n}\n><end of buffer>");
    }

    #[test]
    fn token_start_requires_active_token() {
        let mut state = MaskingState::new(DOCUMENT.as_bytes());
        let err = state.current_token_start_index().unwrap_err();
        assert!(matches!(err, MaskerError::InvalidState { .. }));

        state.advance(16).unwrap();
        state.start_token();
        assert_eq!(state.current_token_start_index().unwrap(), 16);

        state.end_token();
        assert!(state.current_token_start_index().is_err());
    }

    #[test]
    fn token_start_guard_holds_at_every_position() {
        let mut state = MaskingState::new(DOCUMENT.as_bytes());
        loop {
            let err = state.current_token_start_index().unwrap_err();
            assert!(matches!(err, MaskerError::InvalidState { .. }));
            if state.at_end() {
                break;
            }
            state.advance(1).unwrap();
        }
        assert_eq!(state.index(), DOCUMENT.len());
    }

    #[test]
    fn invalid_state_errors_show_the_window() {
        let mut state = MaskingState::new(DOCUMENT.as_bytes());
        state.advance(10).unwrap();

        let err = state.current_token_start_index().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state: no token is being scanned at index 10: {\n    \"mas>k<Me\": \"some"
        );

        let err = state.advance(100).unwrap_err();
        assert!(err.to_string().ends_with(">k<Me\": \"some"));

        let err = state.advance_to(3).unwrap_err();
        assert!(err.to_string().contains(">k<"));
    }

    #[test]
    fn advance_past_end_fails_and_keeps_cursor() {
        let mut state = MaskingState::new(b"[1]");
        state.advance(3).unwrap();
        assert!(state.at_end());

        let err = state.advance(1).unwrap_err();
        assert!(matches!(err, MaskerError::InvalidState { .. }));
        assert_eq!(state.index(), 3);
    }

    #[test]
    fn advance_to_rejects_backwards_moves() {
        let mut state = MaskingState::new(b"{\"a\":1}");
        state.advance_to(4).unwrap();
        assert_eq!(state.current(), Some(b':'));
        assert!(state.advance_to(2).is_err());
        assert_eq!(state.index(), 4);
    }

    #[test]
    fn cursor_never_decreases_across_advances() {
        let mut state = MaskingState::new(DOCUMENT.as_bytes());
        let mut last = state.index();
        for step in [0, 1, 5, 0, 7, 100, 3, 40, 2] {
            let _ = state.advance(step);
            assert!(state.index() >= last);
            assert!(state.index() <= DOCUMENT.len());
            last = state.index();
        }
    }

    #[test]
    fn skip_whitespace_stops_at_token() {
        let mut state = MaskingState::new(b" \t\r\n  x");
        state.skip_whitespace();
        assert_eq!(state.current(), Some(b'x'));
        assert_eq!(state.peek(1), None);
    }

    #[test]
    fn empty_buffer_renders_end_marker() {
        let state = MaskingState::new(b"");
        assert!(state.at_end());
        assert_eq!(state.to_string(), "><end of buffer>");
    }
}
