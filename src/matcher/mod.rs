//! Target key matching.
//!
//! - [`RadixTrie`] - Compressed prefix tree with a resumable [`TriePointer`]
//! - [`KeyMatcher`] - Answers whether an object key (or JSON path) is a target
//!
//! # Example
//!
//! ```
//! use jsonmask::matcher::KeyMatcher;
//!
//! let matcher = KeyMatcher::new(["password", "token"], Vec::<String>::new(), false);
//! let json = br#"{"password":"x"}"#;
//!
//! assert!(matcher.matches(json, 2, 10));
//! assert!(!matcher.matches(json, 2, 6));
//! ```

pub mod radix_trie;

pub use radix_trie::{RadixTrie, TriePointer};

/// Path text of the document root.
pub(crate) const PATH_ROOT: &[u8] = b"$";
/// Path segment appended for every array element.
pub(crate) const PATH_ARRAY_ELEMENT: &[u8] = b"[*]";
/// Precedes every segment in the path trie. Raw JSON keys cannot contain an
/// unescaped NUL, so a key holding `.` or `[*]` never spans two segments.
pub(crate) const PATH_SEGMENT_SEPARATOR: u8 = 0x00;

/// Trie form of a normalized JSON path: `$` followed by each `.name` or
/// `[*]` segment prefixed with [`PATH_SEGMENT_SEPARATOR`].
pub(crate) fn encode_path(path: &[u8]) -> Vec<u8> {
    let body = path.strip_prefix(PATH_ROOT).unwrap_or(path);
    let mut encoded = Vec::with_capacity(path.len() + 8);
    encoded.extend_from_slice(PATH_ROOT);
    let mut i = 0;
    while i < body.len() {
        encoded.push(PATH_SEGMENT_SEPARATOR);
        if body[i..].starts_with(PATH_ARRAY_ELEMENT) {
            encoded.extend_from_slice(PATH_ARRAY_ELEMENT);
            i += PATH_ARRAY_ELEMENT.len();
        } else {
            let len = body[i + 1..]
                .iter()
                .take_while(|&&b| b != b'.' && b != b'[')
                .count();
            encoded.extend_from_slice(&body[i..i + 1 + len]);
            i += 1 + len;
        }
    }
    encoded
}

/// Matches object keys and JSON paths against the configured targets.
///
/// Built once per masker and shared read-only between concurrent scans.
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    keys: RadixTrie,
    paths: Option<RadixTrie>,
}

impl KeyMatcher {
    /// Build a matcher from target key names and normalized JSON paths
    /// (see [`crate::config::normalize_json_path`]).
    pub fn new<K, P>(keys: K, paths: P, case_insensitive: bool) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<[u8]>,
        P: IntoIterator,
        P::Item: AsRef<[u8]>,
    {
        let encoded: Vec<Vec<u8>> = paths
            .into_iter()
            .map(|path| encode_path(path.as_ref()))
            .collect();
        let paths = RadixTrie::new(encoded, case_insensitive);
        Self {
            keys: RadixTrie::new(keys, case_insensitive),
            paths: (!paths.is_empty()).then_some(paths),
        }
    }

    /// Whether `buffer[start..end]` is exactly a target key.
    ///
    /// Walks the trie one byte at a time and stops at the first mismatch, so
    /// the cost is bounded by the key length regardless of the number of targets.
    pub fn matches(&self, buffer: &[u8], start: usize, end: usize) -> bool {
        if start >= end || end > buffer.len() {
            return false;
        }
        let mut pointer = TriePointer::root();
        for &byte in &buffer[start..end] {
            match self.keys.step(pointer, byte) {
                Some(next) => pointer = next,
                None => return false,
            }
        }
        self.keys.is_terminal(pointer)
    }

    /// Whether any JSON paths were configured.
    pub fn is_path_aware(&self) -> bool {
        self.paths.is_some()
    }

    /// Number of distinct target keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of distinct target paths.
    pub fn path_count(&self) -> usize {
        self.paths.as_ref().map_or(0, RadixTrie::len)
    }

    /// Pointer for the document root, if path matching is enabled.
    pub fn path_root(&self) -> Option<TriePointer> {
        let paths = self.paths.as_ref()?;
        paths.step_all(TriePointer::root(), PATH_ROOT)
    }

    /// Extend a path pointer with a `.<key>` segment.
    pub fn path_child(&self, parent: Option<TriePointer>, key: &[u8]) -> Option<TriePointer> {
        let paths = self.paths.as_ref()?;
        let pointer = paths.step(parent?, PATH_SEGMENT_SEPARATOR)?;
        let pointer = paths.step(pointer, b'.')?;
        paths.step_all(pointer, key)
    }

    /// Extend a path pointer with an array element segment.
    pub fn path_element(&self, parent: Option<TriePointer>) -> Option<TriePointer> {
        let paths = self.paths.as_ref()?;
        let pointer = paths.step(parent?, PATH_SEGMENT_SEPARATOR)?;
        paths.step_all(pointer, PATH_ARRAY_ELEMENT)
    }

    /// Whether the pointer designates exactly one of the target paths.
    pub fn is_target_path(&self, pointer: Option<TriePointer>) -> bool {
        match (&self.paths, pointer) {
            (Some(paths), Some(pointer)) => paths.is_terminal(pointer),
            _ => false,
        }
    }
}
