//! Token Grammar Constants
//!
//! Markers of the token grammar, diagnostic codes shared with the host and the
//! tree-sitter node kinds the augmenters look at. Keeping them in one place keeps
//! the host, the augmenters and the tests in agreement.

// Grammar markers
/// Separates variants from each other and from the CSS property (`md$hover$color`)
pub const VARIANT_SEPARATOR: char = '$';
/// Starts a theme reference (`$color.blue`) and the short completion label (`$blue`)
pub const TOKEN_VALUE_MARKER: char = '$';
/// Separates the theme key from the token name in a theme reference
pub const THEME_KEY_SEPARATOR: char = '.';
/// Opens an arbitrary value (`[red]`)
pub const ARBITRARY_VALUE_OPEN: char = '[';
/// Closes an arbitrary value
pub const ARBITRARY_VALUE_CLOSE: char = ']';
/// Prefixed to the sort text of token properties, sorts before any identifier character
pub const TOKEN_PROPERTY_SORT_PREFIX: &str = "!";

// Diagnostic codes
/// Synthesized when a token property names a variant missing from the config
pub const SELECTOR_NOT_FOUND_CODE: i32 = 100_001;
/// The host's generic "type is not assignable" code
pub const VALUE_NOT_ASSIGNABLE_CODE: i32 = 2322;
/// Syntax errors reported by the standalone host
pub const SYNTAX_ERROR_CODE: i32 = 1005;
/// Source attached to every diagnostic this crate synthesizes
pub const DIAGNOSTIC_SOURCE: &str = "token-lens";

// Code fixes
/// Identifier of the "mark as arbitrary" fix
pub const ARBITRARY_VALUE_FIX_ID: &str = "markArbitraryValue";

// Completion details
/// Kind reported for resolved theme tokens
pub const DETAIL_KIND_STRING: &str = "string";

// Tree-sitter node kinds (tree-sitter-typescript)
/// Root of a parsed file
pub const NODE_PROGRAM: &str = "program";
/// Object literal property assignment (`key: value`)
pub const NODE_PAIR: &str = "pair";
/// String literal, quotes included
pub const NODE_STRING: &str = "string";
/// Text of a string literal without its quotes
pub const NODE_STRING_FRAGMENT: &str = "string_fragment";
/// Numeric literal
pub const NODE_NUMBER: &str = "number";
/// Field of a pair holding the property name
pub const FIELD_KEY: &str = "key";
/// Field of a pair holding the value
pub const FIELD_VALUE: &str = "value";
