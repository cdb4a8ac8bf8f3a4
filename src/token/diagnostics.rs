//! Token Diagnostics
//!
//! Post-processes the host's semantic diagnostics for a file:
//! - adds an error for token properties whose variants are missing from the config
//! - rewrites the host's generic "not assignable" message on token properties into
//!   one that explains the token grammar
//!
//! The host list is computed first and treated as opaque. The tree walk then matches
//! host diagnostics to property nodes by start position and error code.

use tower_lsp::lsp_types::*;
use tree_sitter::Node;

use crate::language::tree_utils::{string_literal_text, LineIndex};
use crate::token::config::Config;
use crate::token::constants::*;
use crate::token::grammar::{decode_token_property, encode_arbitrary_value, is_token_property_name};

/// Token diagnostic augmenter
pub struct TokenDiagnostics<'c> {
    config: &'c Config,
}

impl<'c> TokenDiagnostics<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Augment `original` with token diagnostics for the tree rooted at `root`.
    ///
    /// Host diagnostics keep their order; synthesized ones are appended in source order.
    pub fn augment(&self, root: Node, content: &str, mut original: Vec<Diagnostic>) -> Vec<Diagnostic> {
        let lines = LineIndex::new(content);
        let mut added = Vec::new();
        self.walk_node(root, content, &lines, &mut original, &mut added);
        original.extend(added);
        original
    }

    /// Pre-order walk over every node
    fn walk_node(
        &self,
        node: Node,
        content: &str,
        lines: &LineIndex,
        original: &mut [Diagnostic],
        added: &mut Vec<Diagnostic>,
    ) {
        if node.kind() == NODE_PAIR {
            self.check_property_assignment(node, content, lines, original, added);
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.walk_node(child, content, lines, original, added);
            }
        }
    }

    fn check_property_assignment(
        &self,
        pair: Node,
        content: &str,
        lines: &LineIndex,
        original: &mut [Diagnostic],
        added: &mut Vec<Diagnostic>,
    ) {
        let Some(key_node) = pair.child_by_field_name(FIELD_KEY) else {
            return;
        };
        let Some(name) = string_literal_text(key_node, content) else {
            return;
        };

        if !is_token_property_name(name) {
            return;
        }

        if decode_token_property(name, self.config).is_none() {
            added.push(Diagnostic {
                range: lines.range(key_node),
                severity: Some(DiagnosticSeverity::ERROR),
                code: Some(NumberOrString::Number(SELECTOR_NOT_FOUND_CODE)),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!("Invalid property '{}'. Selector not found in theme.", name),
                ..Default::default()
            });
        }

        let start = lines.position(pair.start_byte());
        let host_diagnostic = original.iter_mut().find(|diagnostic| {
            diagnostic.range.start == start
                && diagnostic.code == Some(NumberOrString::Number(VALUE_NOT_ASSIGNABLE_CODE))
        });

        if let Some(diagnostic) = host_diagnostic {
            let value = pair
                .child_by_field_name(FIELD_VALUE)
                .and_then(|value_node| string_literal_text(value_node, content));
            diagnostic.message = invalid_value_message(name, value);
        }
    }
}

/// Message replacing the host's generic "not assignable" text
pub fn invalid_value_message(property: &str, literal: Option<&str>) -> String {
    match literal {
        Some(literal) => format!(
            "Value '{}' is not a theme token for '{}'. Use a theme token or mark it arbitrary with '{}'.",
            literal,
            property,
            encode_arbitrary_value(literal)
        ),
        None => format!("Grid values are not assignable to '{}'.", property),
    }
}
