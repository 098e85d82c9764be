//! Resolution engine and string converter.
//!
//! A character is resolved by threading its codepoint key through every
//! table of a [`MappingRegistry`] in order. Each table that knows the current
//! value rewrites it, and the rewritten value is the key for the next table,
//! so mappings compose across revisions.
//!
//! # Example
//!
//! ```
//! use hkscs_convert::tables::NormalizedMapping;
//! use hkscs_convert::{MappingRegistry, Resolver};
//!
//! let hkscs1999: NormalizedMapping = [("E2A3".to_string(), "745C".to_string())].into_iter().collect();
//! let registry = MappingRegistry::from_tables(vec![("hkscs1999".to_string(), hkscs1999)]);
//! let resolver = Resolver::new(&registry);
//!
//! assert_eq!(resolver.resolve_character("\u{E2A3}"), "瑜");
//! assert_eq!(resolver.resolve_string("口\u{E2A3}"), "口瑜");
//! ```

use crate::registry::MappingRegistry;
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// One rewrite in a resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep<'r> {
    /// Table that rewrote the value
    pub table: &'r str,
    /// Value after the rewrite
    pub value: String,
}

/// Resolves characters and strings against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r MappingRegistry,
}

impl<'r> Resolver<'r> {
    /// Create a resolver over a fully built registry.
    pub fn new(registry: &'r MappingRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a single user-perceived character.
    ///
    /// Input that is not exactly one grapheme made of one scalar value (empty
    /// strings, several characters, emoji with modifiers) is returned as is,
    /// as is any character no table maps.
    pub fn resolve_character<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let character = match single_scalar(input) {
            Some(character) => character,
            None => return Cow::Borrowed(input),
        };

        match self.trace(character).pop() {
            Some(last) => Cow::Owned(render(last.value)),
            None => Cow::Borrowed(input),
        }
    }

    /// Resolve every grapheme of `input` independently and join the results.
    pub fn resolve_string<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut changed = false;
        let resolved: String = input
            .graphemes(true)
            .map(|grapheme| {
                let result = self.resolve_character(grapheme);
                changed |= matches!(result, Cow::Owned(_));
                result
            })
            .collect();

        if changed {
            Cow::Owned(resolved)
        } else {
            Cow::Borrowed(input)
        }
    }

    /// The rewrites a character goes through, in table order.
    ///
    /// Empty when no table maps the character.
    pub fn trace(&self, character: char) -> Vec<ChainStep<'r>> {
        let mut value = resolution_key(character);
        let mut steps = Vec::new();

        for (table, mapping) in self.registry.tables() {
            if let Some(next) = mapping.get(&value) {
                log::trace!("{}: {} -> {}", table, value, next);
                value = next.to_string();
                steps.push(ChainStep {
                    table,
                    value: value.clone(),
                });
            }
        }

        steps
    }
}

/// Resolve a single character against `registry`.
pub fn resolve_character<'a>(registry: &MappingRegistry, input: &'a str) -> Cow<'a, str> {
    Resolver::new(registry).resolve_character(input)
}

/// Resolve a whole string against `registry`.
pub fn resolve_string<'a>(registry: &MappingRegistry, input: &'a str) -> Cow<'a, str> {
    Resolver::new(registry).resolve_string(input)
}

/// Lookup key of a character: uppercase hex codepoint, no prefix or padding.
pub fn resolution_key(character: char) -> String {
    format!("{:X}", character as u32)
}

/// The only scalar value of `input`, if it is one grapheme of one scalar.
fn single_scalar(input: &str) -> Option<char> {
    let mut graphemes = input.graphemes(true);
    let grapheme = graphemes.next()?;
    if graphemes.next().is_some() {
        return None;
    }

    let mut chars = grapheme.chars();
    let character = chars.next()?;
    match chars.next() {
        Some(_) => None,
        None => Some(character),
    }
}

/// Turn the final chain value into output text.
///
/// A single grapheme is already a character. Otherwise a hex string names a
/// codepoint. Anything else passes through verbatim.
fn render(value: String) -> String {
    let mut graphemes = value.graphemes(true);
    if graphemes.next().is_some() && graphemes.next().is_none() {
        return value;
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        if let Some(character) = u32::from_str_radix(&value, 16).ok().and_then(char::from_u32) {
            return character.to_string();
        }
    }

    value
}
