//! Placeholder extraction for script text.
//!
//! Recognizes `{{name}}`, `{{name.path}}`, `{{name.sex | male text | female text}}`
//! and the built-in `{{parish.*}}` names. Parsing is lenient: an unterminated
//! `{{` yields nothing and the first `}}` always closes a placeholder.

use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

use crate::constants::BUILTIN_PLACEHOLDERS;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The two literal alternatives of a gendered placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conditional {
    pub if_true: String,
    pub if_false: String,
}

/// A single `{{...}}` occurrence found in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderToken {
    /// The full token including braces, as written.
    pub raw: String,
    /// First segment before any dot; what the validator checks.
    pub property_name: String,
    /// Everything after the first dot, left uninterpreted.
    pub path: Option<String>,
    pub conditional: Option<Conditional>,
    pub is_builtin: bool,
}

impl PlaceholderToken {
    /// The reference without conditional branches, e.g. `bride.full_name`.
    pub fn reference(&self) -> String {
        match &self.path {
            Some(path) => format!("{}.{}", self.property_name, path),
            None => self.property_name.clone(),
        }
    }
}

/// Returns true when `reference` is one of the built-in placeholder names.
pub fn is_builtin(reference: &str) -> bool {
    BUILTIN_PLACEHOLDERS.contains(&reference)
}

/// Extracts every placeholder from `text`, left to right, duplicates kept.
///
/// # Arguments
/// * `text` - Script text, or `None` for a section without content
///
/// # Returns
/// * `Vec<PlaceholderToken>` - One token per placeholder occurrence
pub fn extract<'a>(text: impl Into<Option<&'a str>>) -> Vec<PlaceholderToken> {
    match text.into() {
        Some(text) => scan(text).into_iter().map(|(_, token)| token).collect(),
        None => Vec::new(),
    }
}

/// Like [`extract`], also returning the byte range each token occupies.
pub fn scan(text: &str) -> Vec<(Range<usize>, PlaceholderToken)> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some(open) = text[cursor..].find(OPEN).map(|i| cursor + i) {
        let inner_start = open + OPEN.len();
        let Some(close) = text[inner_start..].find(CLOSE).map(|i| inner_start + i) else {
            break;
        };
        let end = close + CLOSE.len();
        if let Some(token) = parse_token(&text[open..end], &text[inner_start..close]) {
            tokens.push((open..end, token));
        }
        cursor = end;
    }
    tokens
}

/// Unique property names referenced by `text`, builtins excluded.
pub fn referenced_properties<'a>(text: impl Into<Option<&'a str>>) -> HashSet<String> {
    extract(text)
        .into_iter()
        .filter(|t| !t.is_builtin)
        .map(|t| t.property_name)
        .collect()
}

fn parse_token(raw: &str, inner: &str) -> Option<PlaceholderToken> {
    let parts: Vec<&str> = inner.split('|').map(str::trim).collect();
    let (reference, conditional) = if parts.len() == 3 {
        (
            parts[0],
            Some(Conditional {
                if_true: parts[1].to_string(),
                if_false: parts[2].to_string(),
            }),
        )
    } else {
        (inner.trim(), None)
    };

    if reference.is_empty() {
        return None;
    }

    let (property_name, path) = match reference.split_once('.') {
        Some((name, path)) => (name.trim(), Some(path.trim().to_string())),
        None => (reference, None),
    };

    Some(PlaceholderToken {
        raw: raw.to_string(),
        property_name: property_name.to_string(),
        path,
        conditional,
        is_builtin: is_builtin(reference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_joins_path() {
        let token = &extract("{{bride.full_name}}")[0];
        assert_eq!(token.reference(), "bride.full_name");
        let token = &extract("{{bride}}")[0];
        assert_eq!(token.reference(), "bride");
    }

    #[test]
    fn test_scan_ranges() {
        let text = "Dear {{bride}} and {{groom}}";
        let spans = scan(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].0.clone()], "{{bride}}");
        assert_eq!(&text[spans[1].0.clone()], "{{groom}}");
    }

    #[test]
    fn test_whitespace_only_is_ignored() {
        assert!(extract("{{   }}").is_empty());
        assert!(extract("{{}}").is_empty());
    }
}
