//! JSON path targets.
//!
//! Only the subset needed to address values by position is accepted: a
//! leading `$` followed by `.name` member segments and `[*]` array element
//! segments, e.g. `$.user.password` or `$.items[*].token`. Bracketed member
//! names (`$['a']`) are rewritten to dot form.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MaskerError, Result};

static JSON_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$(?:\.[^.\[\]]+|\[\*\])+$").unwrap());

static BRACKET_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\['([^'\[\]]+)'\]").unwrap());

/// Validate a JSON path and return its normalized text.
///
/// # Example
///
/// ```
/// use jsonmask::config::normalize_json_path;
///
/// assert_eq!(normalize_json_path("$['user'].password").unwrap(), "$.user.password");
/// assert!(normalize_json_path("user.password").is_err());
/// ```
pub fn normalize_json_path(path: &str) -> Result<String> {
    let normalized = BRACKET_MEMBER.replace_all(path.trim(), ".$1");
    if JSON_PATH.is_match(&normalized) {
        Ok(normalized.into_owned())
    } else {
        Err(MaskerError::config(format!(
            "invalid JSON path '{}': expected '$' followed by '.name' or '[*]' segments",
            path
        )))
    }
}
