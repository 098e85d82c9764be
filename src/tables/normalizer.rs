//! Table normalizer.
//!
//! Flattens the records of one source table into a [`NormalizedMapping`]:
//! codepoint key (uppercase hex, no `U+`) to replacement value. Tables encode
//! the preferred form either as a bare codepoint or as a bracketed combining
//! sequence such as `<00CA,0304>`; both shapes end up as plain strings here.

use super::descriptor::NormalizationRule;
use super::loader::RawRecord;
use regex::Regex;
use std::collections::HashMap;

/// Prefix some tables put on both key and value cells.
const CODEPOINT_PREFIX: &str = "U+";

/// Flat key to value dictionary derived from one source table.
///
/// Never holds an empty key, an empty value, or a key mapped to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedMapping {
    entries: HashMap<String, String>,
}

impl NormalizedMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a normalized pair, replacing any earlier value for the key.
    ///
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.entries.insert(key, value)
    }

    /// Replacement value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table produced no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for NormalizedMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut mapping = NormalizedMapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// Build one mapping from a table's records.
///
/// Every record contributes one candidate pair per `from` column, in column
/// order. Within a table the last write for a key wins. `table` only labels
/// log output.
pub fn build_mapping(table: &str, records: &[RawRecord], rule: &NormalizationRule) -> NormalizedMapping {
    let mut mapping = NormalizedMapping::new();
    let mut rejected = 0usize;

    for record in records {
        let value = record.get(&rule.to_column).map(String::as_str);

        for column in &rule.from_columns {
            let key = record.get(column).map(String::as_str);
            match normalize_pair(key, value) {
                Some((key, value)) => {
                    if let Some(previous) = mapping.insert(key.clone(), value.clone()) {
                        log::trace!("{}: {} -> {:?} overwrites {:?}", table, key, value, previous);
                    }
                },
                None => {
                    log::trace!("{}: rejected {}: {:?} -> {:?}", table, column, key, value);
                    rejected += 1;
                },
            }
        }
    }

    log::trace!("{}: {} entries built, {} candidate pairs rejected", table, mapping.len(), rejected);
    mapping
}

/// Normalize one candidate `(key, value)` pair.
///
/// Returns `None` when either side is missing or empty, or when the pair maps
/// a key to itself. A `U+` prefix on the key is stripped from both sides; a
/// prefix on the value alone is left in place.
pub fn normalize_pair(key: Option<&str>, value: Option<&str>) -> Option<(String, String)> {
    let (key, value) = match (key, value) {
        (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() && key != value => (key, value),
        _ => return None,
    };

    let (key, value) = match key.strip_prefix(CODEPOINT_PREFIX) {
        Some(stripped) => (stripped, skip_chars(value, CODEPOINT_PREFIX.len())),
        None => (key, value),
    };

    let value = match value.strip_prefix('<').and_then(|v| v.strip_suffix('>')) {
        Some(_) => compose_sequence(value).unwrap_or_else(|| {
            log::warn!("Unparseable combining sequence {:?} for key {}, kept verbatim", value, key);
            value.to_string()
        }),
        None => value.to_string(),
    };

    if key.is_empty() || value.is_empty() || key == value {
        return None;
    }

    Some((key.to_string(), value))
}

/// Compose `<00CA,0304>` into the string U+00CA U+0304.
fn compose_sequence(bracketed: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref RE_SEQUENCE: Regex =
            Regex::new(r"^<\s*[0-9A-Fa-f]+(?:\s*,\s*[0-9A-Fa-f]+)*\s*>$").unwrap();
    }

    if !RE_SEQUENCE.is_match(bracketed) {
        return None;
    }

    bracketed[1..bracketed.len() - 1]
        .split(',')
        .map(|token| u32::from_str_radix(token.trim(), 16).ok().and_then(char::from_u32))
        .collect()
}

fn skip_chars(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((offset, _)) => &s[offset..],
        None => "",
    }
}
