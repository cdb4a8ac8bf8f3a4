//! Token Grammar Codec
//!
//! Encodes and decodes the strings used as object keys and values in token styles:
//! - token properties: `md$hover$color` (responsive, selector, CSS property)
//! - token values: `$color.blue` (theme key, token)
//! - arbitrary values: `[red]` (a literal that bypasses the theme)
//!
//! The structural predicates only look at the shape of a string and need no config,
//! so callers can skip non-candidates before doing any config lookups.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::token::config::Config;
use crate::token::constants::*;

fn token_property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9][a-z0-9-]*\$){1,2}-?[a-z][a-z0-9-]*$")
            .expect("token property pattern is valid")
    })
}

fn token_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\$([A-Za-z][A-Za-z0-9-]*)\.([A-Za-z0-9][A-Za-z0-9-]*)$")
            .expect("token value pattern is valid")
    })
}

/// Bare word literal, optionally quoted. Anything else gets no arbitrary encoding.
fn arbitrary_candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(['"]?)([\w-]+)(['"]?)$"#).expect("arbitrary value pattern is valid")
    })
}

/// Decoded left-hand side of a token style declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProperty {
    pub responsive: Option<String>,
    pub selector: Option<String>,
    pub css_property: String,
}

impl TokenProperty {
    /// Encode back into the property name string
    pub fn encode(&self) -> String {
        let mut name = String::new();
        for variant in [&self.responsive, &self.selector].into_iter().flatten() {
            name.push_str(variant);
            name.push(VARIANT_SEPARATOR);
        }
        name.push_str(&self.css_property);
        name
    }
}

impl fmt::Display for TokenProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Decoded theme reference on the right-hand side of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValue {
    pub theme_key: String,
    pub token: String,
}

impl TokenValue {
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}",
            TOKEN_VALUE_MARKER, self.theme_key, THEME_KEY_SEPARATOR, self.token
        )
    }

    /// The `$token` label shown in completion lists
    pub fn short_name(&self) -> String {
        format!("{}{}", TOKEN_VALUE_MARKER, self.token)
    }

    /// The theme value this reference points at, if the config defines it
    pub fn resolve<'c>(&self, config: &'c Config) -> Option<&'c str> {
        config.theme_value(&self.theme_key, &self.token)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Check whether `name` has the shape of a token property
pub fn is_token_property_name(name: &str) -> bool {
    token_property_regex().is_match(name)
}

/// Decode a token property against the config.
///
/// Returns `None` when the name is not a token property, or when one of its
/// variants is not defined by the config.
pub fn decode_token_property(name: &str, config: &Config) -> Option<TokenProperty> {
    if !is_token_property_name(name) {
        return None;
    }

    let mut parts: Vec<&str> = name.split(VARIANT_SEPARATOR).collect();
    let css_property = parts.pop()?.to_string();

    match parts.as_slice() {
        [variant] if config.has_responsive(variant) => Some(TokenProperty {
            responsive: Some(variant.to_string()),
            selector: None,
            css_property,
        }),
        [variant] if config.has_selector(variant) => Some(TokenProperty {
            responsive: None,
            selector: Some(variant.to_string()),
            css_property,
        }),
        [responsive, selector]
            if config.has_responsive(responsive) && config.has_selector(selector) =>
        {
            Some(TokenProperty {
                responsive: Some(responsive.to_string()),
                selector: Some(selector.to_string()),
                css_property,
            })
        }
        _ => None,
    }
}

/// Check whether `name` has the shape of a theme reference
pub fn is_token_value_name(name: &str) -> bool {
    token_value_regex().is_match(name)
}

pub fn decode_token_value(name: &str) -> Option<TokenValue> {
    let captures = token_value_regex().captures(name)?;
    Some(TokenValue {
        theme_key: captures.get(1)?.as_str().to_string(),
        token: captures.get(2)?.as_str().to_string(),
    })
}

/// Check whether a value (quotes stripped) is already marked arbitrary
pub fn is_arbitrary_value(value: &str) -> bool {
    value.len() >= 2
        && value.starts_with(ARBITRARY_VALUE_OPEN)
        && value.ends_with(ARBITRARY_VALUE_CLOSE)
}

/// Mark a literal as arbitrary: `red` -> `[red]`, `'red'` -> `'[red]'`.
///
/// Only bare word literals are rewritten, everything else (including values that
/// are already arbitrary) comes back unchanged.
pub fn encode_arbitrary_value(literal: &str) -> String {
    arbitrary_candidate_regex()
        .replace(literal, "${1}[${2}]${3}")
        .into_owned()
}

/// Like [`encode_arbitrary_value`] but `None` when the literal is not word shaped
pub fn try_encode_arbitrary_value(literal: &str) -> Option<String> {
    if arbitrary_candidate_regex().is_match(literal) {
        Some(encode_arbitrary_value(literal))
    } else {
        None
    }
}
