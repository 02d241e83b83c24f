//! Parsing of the authorization attribute list.
//!
//! The header value is a comma-separated list of `key="value"` pairs:
//!
//! ```text
//! id="dh37fgj492je", ts="1353832234", mac="...", ext="some-app-data"
//! ```
//!
//! Parsing is deliberately permissive; validation of which keys are allowed
//! happens in [`crate::verify`]. Values cannot contain `,` or `"`: there is no
//! escaping rule.

use tracing::trace;

use crate::error::AuthError;

/// Attributes decoded from a header, in the order they first appeared.
///
/// When a key occurs more than once the last value wins; the entry keeps the
/// position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    entries: Vec<(String, String)>,
}

impl ParsedAttributes {
    /// Insert an attribute, replacing the value of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the value of an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over the attribute names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of distinct attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an attribute list into [`ParsedAttributes`].
///
/// Segments without an `=` are skipped. Keys and values are trimmed, and a
/// value wrapped in double quotes loses exactly one quote on each side.
///
/// # Examples
///
/// ```
/// use macauth::attributes::parse_attributes;
///
/// let attrs = parse_attributes(r#"id="abc", ts="1353832234", mac="xyz=""#).unwrap();
/// assert_eq!(attrs.get("id"), Some("abc"));
/// assert_eq!(attrs.get("mac"), Some("xyz="));
/// ```
///
/// # Errors
///
/// Returns [`AuthError::MalformedHeader`] if the header is empty or whitespace.
pub fn parse_attributes(header: &str) -> Result<ParsedAttributes, AuthError> {
    if header.trim().is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    let mut attributes = ParsedAttributes::default();
    for segment in header.split(',') {
        let Some((key, value)) = segment.split_once('=') else {
            trace!(segment_len = segment.len(), "Skipping attribute segment without '='");
            continue;
        };
        attributes.insert(key.trim(), unquote(value.trim()));
    }

    Ok(attributes)
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
