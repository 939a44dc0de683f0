//! Lenient JSON repair for hand-written mock responses.
//!
//! Mock files may leave object keys and simple string values unquoted:
//!
//! ```text
//! {name: Alice, age: 30}  →  {"name": "Alice", "age": 30}
//! ```
//!
//! The repair is two regex rewrites, not a JSON parser:
//! 1. quote a `[a-zA-Z0-9_]+` token between `{`/`,` and `:`
//! 2. quote a `[a-zA-Z][a-zA-Z0-9_]*` token between `:` and `,`/`}`
//!
//! # Limitations
//! - `true`, `false` and `null` are quoted by rule 2 and become strings
//! - Array elements are never quoted
//! - Look-alike text inside string values can be rewritten
//! - Values containing spaces or starting with a digit are left alone
//! - Only ASCII space, tab, CR, LF and form feed count as whitespace
//!
//! Callers must validate the output, see [`normalize_response`].

use std::sync::LazyLock;

use regex::Regex;

use crate::routing::error::DispatchError;

static UNQUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,])([\t\n\f\r ]*)([a-zA-Z0-9_]+)([\t\n\f\r ]*):").expect("valid key regex")
});

static BARE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([\t\n\f\r ]*)([a-zA-Z][a-zA-Z0-9_]*)([\t\n\f\r ]*[,}])")
        .expect("valid value regex")
});

/// Best-effort rewrite of loosely quoted JSON-like text.
///
/// The result is not guaranteed to be valid JSON.
pub fn fix_json_response(text: &str) -> String {
    let keys_quoted = UNQUOTED_KEY.replace_all(text, r#"${1}${2}"${3}"${4}:"#);
    BARE_VALUE
        .replace_all(&keys_quoted, r#":${1}"${2}"${3}"#)
        .into_owned()
}

/// Repair `template` and check that the result parses as JSON.
pub fn normalize_response(template: &str) -> Result<String, DispatchError> {
    let repaired = fix_json_response(template);
    match serde_json::from_str::<serde_json::Value>(&repaired) {
        Ok(_) => Ok(repaired),
        Err(_) => Err(DispatchError::ResponseInvalid { repaired }),
    }
}
