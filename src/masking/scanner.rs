//! Token-level scan loop shared by every algorithm variant.
//!
//! The scanner walks the input once, tracking only what it needs to decide
//! whether the value under the cursor is a target: a stack of open containers,
//! the decision inherited from the owning key, and (for path-aware variants)
//! one trie pointer per nesting level. Bytes outside masked values are copied
//! through untouched in large slices.

use crate::config::{MaskingConfig, TargetKeyMode};
use crate::error::{MaskerError, Result};
use crate::matcher::{KeyMatcher, TriePointer};

use super::algorithm::KeyProbe;
use super::state::MaskingState;
use super::value_masker::{ValueMasker, ValueMaskerContext};

/// What happens to the primitive values under one owning key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Keep,
    Mask,
    /// Keep the whole subtree regardless of nested keys.
    KeepAll,
    /// Mask the whole subtree regardless of nested keys.
    MaskAll,
}

impl Target {
    fn masks(self) -> bool {
        matches!(self, Self::Mask | Self::MaskAll)
    }

    fn is_forced(self) -> bool {
        matches!(self, Self::KeepAll | Self::MaskAll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    container: Container,
    target: Target,
    path: Option<TriePointer>,
    expect_key: bool,
}

/// Decision and path for the next value to be scanned.
#[derive(Debug, Clone, Copy)]
struct Pending {
    target: Target,
    path: Option<TriePointer>,
}

#[derive(Debug, Clone, Copy)]
enum ValueKind {
    String,
    Number,
    Boolean,
}

pub(crate) struct Scanner<'a, P: KeyProbe + ?Sized> {
    state: MaskingState<'a>,
    config: &'a MaskingConfig,
    probe: &'a P,
    paths: Option<&'a KeyMatcher>,
    stack: Vec<Frame>,
    output: Vec<u8>,
    /// Input bytes before this index have been written to `output`.
    copied: usize,
}

impl<'a, P: KeyProbe + ?Sized> Scanner<'a, P> {
    pub(crate) fn new(input: &'a [u8], config: &'a MaskingConfig, probe: &'a P) -> Self {
        Self {
            state: MaskingState::new(input),
            config,
            probe,
            paths: probe.paths(),
            stack: Vec::new(),
            output: Vec::with_capacity(input.len()),
            copied: 0,
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<u8>> {
        let mut pending = Pending {
            target: match self.config.target_key_mode() {
                TargetKeyMode::Mask => Target::Keep,
                TargetKeyMode::Allow => Target::Mask,
            },
            path: self.paths.and_then(KeyMatcher::path_root),
        };

        loop {
            self.state.skip_whitespace();
            let Some(byte) = self.state.current() else {
                break;
            };
            match byte {
                b'{' => {
                    self.state.advance(1)?;
                    self.stack.push(Frame {
                        container: Container::Object,
                        target: pending.target,
                        path: pending.path,
                        expect_key: true,
                    });
                }
                b'[' => {
                    self.state.advance(1)?;
                    self.stack.push(Frame {
                        container: Container::Array,
                        target: pending.target,
                        path: pending.path,
                        expect_key: false,
                    });
                    pending = self.element_pending();
                }
                b'}' | b']' => {
                    self.state.advance(1)?;
                    self.stack.pop();
                }
                b',' => {
                    self.state.advance(1)?;
                    match self.stack.last().map(|frame| frame.container) {
                        Some(Container::Object) => {
                            if let Some(frame) = self.stack.last_mut() {
                                frame.expect_key = true;
                            }
                        }
                        Some(Container::Array) => pending = self.element_pending(),
                        None => {}
                    }
                }
                b'"' if self.expecting_key() => pending = self.scan_key()?,
                b'"' => self.scan_string(pending.target)?,
                b'-' | b'0'..=b'9' => self.scan_number(pending.target)?,
                b't' => self.scan_literal(b"true", pending.target)?,
                b'f' => self.scan_literal(b"false", pending.target)?,
                // colons, null and stray bytes pass through as-is
                _ => self.state.advance(1)?,
            }
        }

        let input = self.state.buffer();
        self.output.extend_from_slice(&input[self.copied..]);
        Ok(self.output)
    }

    fn expecting_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame {
                container: Container::Object,
                expect_key: true,
                ..
            })
        )
    }

    /// Decision for a value owned by a key (or array element) that did or
    /// did not match, below a parent decision.
    fn resolve(&self, parent: Target, matched: bool) -> Target {
        if parent.is_forced() {
            return parent;
        }
        let nested = self.config.mask_nested_values();
        match (self.config.target_key_mode(), matched) {
            (TargetKeyMode::Mask, true) if nested => Target::MaskAll,
            (TargetKeyMode::Mask, true) => Target::Mask,
            (TargetKeyMode::Mask, false) => Target::Keep,
            (TargetKeyMode::Allow, true) if nested => Target::KeepAll,
            (TargetKeyMode::Allow, true) => Target::Keep,
            (TargetKeyMode::Allow, false) => Target::Mask,
        }
    }

    /// Array elements inherit the array's decision unless their own path matches.
    fn element_pending(&self) -> Pending {
        let Some(frame) = self.stack.last() else {
            return Pending {
                target: Target::Keep,
                path: None,
            };
        };
        let path = self.paths.and_then(|paths| paths.path_element(frame.path));
        let path_matched = self.paths.is_some_and(|paths| paths.is_target_path(path));
        let target = if path_matched {
            self.resolve(frame.target, true)
        } else {
            frame.target
        };
        Pending { target, path }
    }

    fn scan_key(&mut self) -> Result<Pending> {
        let (parent_target, parent_path) = match self.stack.last_mut() {
            Some(frame) => {
                frame.expect_key = false;
                (frame.target, frame.path)
            }
            None => (Target::Keep, None),
        };

        self.state.start_token();
        let start = self.state.current_token_start_index()?;
        let buffer = self.state.buffer();
        let Some(end) = string_end(buffer, start) else {
            // unterminated key: nothing left to mask
            self.state.advance_to(buffer.len())?;
            self.state.end_token();
            return Ok(Pending {
                target: parent_target,
                path: None,
            });
        };

        let (key_start, key_end) = (start + 1, end - 1);
        let path = self
            .paths
            .and_then(|paths| paths.path_child(parent_path, &buffer[key_start..key_end]));
        let matched = !parent_target.is_forced()
            && (self.probe.is_target(buffer, key_start, key_end)
                || self.paths.is_some_and(|paths| paths.is_target_path(path)));

        self.state.advance_to(end)?;
        self.state.end_token();
        Ok(Pending {
            target: self.resolve(parent_target, matched),
            path,
        })
    }

    fn scan_string(&mut self, target: Target) -> Result<()> {
        self.state.start_token();
        let start = self.state.current_token_start_index()?;
        let buffer = self.state.buffer();
        match string_end(buffer, start) {
            Some(end) => {
                if target.masks() {
                    self.replace(end, ValueKind::String)?;
                }
                self.state.advance_to(end)?;
            }
            None if target.masks() => {
                return Err(MaskerError::InvalidJson {
                    message: "Unterminated string".to_string(),
                    index: start,
                });
            }
            None => self.state.advance_to(buffer.len())?,
        }
        self.state.end_token();
        Ok(())
    }

    fn scan_number(&mut self, target: Target) -> Result<()> {
        self.state.start_token();
        let start = self.state.current_token_start_index()?;
        let buffer = self.state.buffer();
        let length = buffer[start..]
            .iter()
            .take_while(|b| matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E'))
            .count();
        let end = start + length;
        if target.masks() {
            self.replace(end, ValueKind::Number)?;
        }
        self.state.advance_to(end)?;
        self.state.end_token();
        Ok(())
    }

    fn scan_literal(&mut self, literal: &[u8], target: Target) -> Result<()> {
        let start = self.state.index();
        if !self.state.buffer()[start..].starts_with(literal) {
            // not a boolean after all; pass the byte through
            return self.state.advance(1);
        }
        self.state.start_token();
        let end = start + literal.len();
        if target.masks() {
            self.replace(end, ValueKind::Boolean)?;
        }
        self.state.advance_to(end)?;
        self.state.end_token();
        Ok(())
    }

    /// Replace the current token (up to `end`) with the value masker's output.
    fn replace(&mut self, end: usize, kind: ValueKind) -> Result<()> {
        let start = self.state.current_token_start_index()?;
        let buffer = self.state.buffer();
        let masker: &dyn ValueMasker = match kind {
            ValueKind::String => self.config.string_masker(),
            ValueKind::Number => self.config.number_masker(),
            ValueKind::Boolean => self.config.boolean_masker(),
        };
        let context = ValueMaskerContext::new(buffer, start, end);
        let replacement = masker.mask(&context).map_err(|err| {
            tracing::debug!(
                start,
                end,
                window = %self.state,
                "value masker rejected {:?} value",
                kind
            );
            err.into_invalid_json(start)
        })?;
        tracing::trace!(start, end, "masked {:?} value", kind);

        self.output.extend_from_slice(&buffer[self.copied..start]);
        self.output.extend_from_slice(&replacement);
        self.copied = end;
        Ok(())
    }
}

/// Index just past the closing quote of the string opening at `start`.
///
/// A backslash always escapes the following byte, so `\"` does not close
/// the string while `\\"` does.
fn string_end(buffer: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < buffer.len() {
        match buffer[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}
