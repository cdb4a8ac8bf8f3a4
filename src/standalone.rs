//! Standalone Host
//!
//! A minimal in-process [`LanguageService`] for editors that have no TypeScript host
//! to plug into. It keeps open documents parsed with tree-sitter-typescript and
//! emulates what typed theme definitions would give a type checker:
//! - syntax errors as syntactic diagnostics
//! - "not assignable" errors for token property values that are not theme references
//! - every theme entry as a completion inside a property value string
//!
//! Everything else (hover, definitions, formatting) is left to other tools.

use std::collections::HashMap;

use serde_json::Value;
use tower_lsp::lsp_types::*;
use tree_sitter::Node;
use url::Url;

use crate::language::parser::TsParser;
use crate::language::source_file::SourceFile;
use crate::language::tree_utils::{
    find_named_node_at_offset, node_text, node_to_range, position_to_byte, string_literal_text,
    LineIndex,
};
use crate::service::{CompletionEntryDetails, LanguageService};
use crate::token::config::Config;
use crate::token::constants::*;
use crate::token::grammar::{decode_token_value, is_arbitrary_value, is_token_property_name, TokenValue};

/// Source of diagnostics produced by the standalone host itself
const HOST_SOURCE: &str = "ts";

/// Document store and checker for TypeScript style files
pub struct StandaloneHost {
    documents: HashMap<Url, SourceFile>,
    parser: TsParser,
    tsx_parser: TsParser,
    config: Option<Config>,
}

impl StandaloneHost {
    pub fn new(config: Option<Config>) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            documents: HashMap::new(),
            parser: TsParser::new()?,
            tsx_parser: TsParser::new_tsx()?,
            config,
        })
    }

    fn parser_for(&mut self, uri: &Url) -> &mut TsParser {
        if uri.path().ends_with(".tsx") {
            &mut self.tsx_parser
        } else {
            &mut self.parser
        }
    }

    /// Open and parse a new document
    pub fn open_document(&mut self, uri: Url, content: String, version: i32) {
        let parser = self.parser_for(&uri);
        let document = SourceFile::parsed(uri.clone(), content, version, parser);
        self.documents.insert(uri, document);
    }

    /// Replace the content of an open document
    pub fn update_document(&mut self, uri: &Url, content: String, version: i32) {
        let Some(mut document) = self.documents.remove(uri) else {
            log::warn!("[update_document] Document not open: {}", uri);
            return;
        };
        document.replace_content(content, version, self.parser_for(uri));
        self.documents.insert(uri.clone(), document);
    }

    pub fn close_document(&mut self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn document_uris(&self) -> impl Iterator<Item = &Url> {
        self.documents.keys()
    }

    /// Recursively collect ERROR and MISSING nodes
    fn collect_syntax_errors(&self, node: Node, content: &str, diagnostics: &mut Vec<Diagnostic>) {
        if node.is_error() || node.is_missing() {
            let message = if node.is_missing() {
                format!("'{}' expected.", node.kind())
            } else {
                format!("Syntax error: {}", node_text(node, content))
            };
            diagnostics.push(Diagnostic {
                range: node_to_range(node, content),
                severity: Some(DiagnosticSeverity::ERROR),
                code: Some(NumberOrString::Number(SYNTAX_ERROR_CODE)),
                source: Some(HOST_SOURCE.to_string()),
                message,
                ..Default::default()
            });
            return;
        }

        if !node.has_error() {
            return;
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_syntax_errors(child, content, diagnostics);
            }
        }
    }

    /// Recursively check the values assigned to token properties
    fn check_token_values(
        &self,
        config: &Config,
        node: Node,
        content: &str,
        lines: &LineIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if node.kind() == NODE_PAIR {
            if let Some(diagnostic) = self.check_pair_value(config, node, content, lines) {
                diagnostics.push(diagnostic);
            }
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.check_token_values(config, child, content, lines, diagnostics);
            }
        }
    }

    fn check_pair_value(
        &self,
        config: &Config,
        pair: Node,
        content: &str,
        lines: &LineIndex,
    ) -> Option<Diagnostic> {
        let key_node = pair.child_by_field_name(FIELD_KEY)?;
        let name = string_literal_text(key_node, content)?;
        if !is_token_property_name(name) {
            return None;
        }

        let value_node = pair.child_by_field_name(FIELD_VALUE)?;
        let assignable = match value_node.kind() {
            NODE_STRING => {
                let value = string_literal_text(value_node, content)?;
                is_arbitrary_value(value)
                    || decode_token_value(value)
                        .and_then(|token_value| token_value.resolve(config).map(|_| ()))
                        .is_some()
            }
            NODE_NUMBER => false,
            // Identifiers, calls and the like are typed elsewhere
            _ => true,
        };

        if assignable {
            return None;
        }

        Some(Diagnostic {
            range: lines.range(key_node),
            severity: Some(DiagnosticSeverity::ERROR),
            code: Some(NumberOrString::Number(VALUE_NOT_ASSIGNABLE_CODE)),
            source: Some(HOST_SOURCE.to_string()),
            message: format!(
                "Type '{}' is not assignable to type 'TokenValue'.",
                node_text(value_node, content)
            ),
            ..Default::default()
        })
    }

    /// Whether the cursor sits in the value string of a property assignment
    fn is_in_value_string(&self, file: &SourceFile, position: Position) -> bool {
        let Some(tree) = file.tree() else {
            return false;
        };

        // The character just typed is the one before the cursor
        let offset = position_to_byte(position, file.content()).saturating_sub(1);
        let Some(mut node) = find_named_node_at_offset(tree.root_node(), offset) else {
            return false;
        };
        if node.kind() == NODE_STRING_FRAGMENT {
            match node.parent() {
                Some(parent) => node = parent,
                None => return false,
            }
        }
        if node.kind() != NODE_STRING {
            return false;
        }

        node.parent()
            .filter(|parent| parent.kind() == NODE_PAIR)
            .and_then(|pair| pair.child_by_field_name(FIELD_VALUE))
            .map(|value| value.id() == node.id())
            .unwrap_or(false)
    }

    fn theme_completions(&self, config: &Config) -> Vec<CompletionItem> {
        config
            .theme
            .iter()
            .flat_map(|(theme_key, tokens)| {
                tokens.keys().map(move |token| {
                    let value = TokenValue {
                        theme_key: theme_key.clone(),
                        token: token.clone(),
                    };
                    CompletionItem {
                        label: value.encode(),
                        kind: Some(CompletionItemKind::VALUE),
                        ..Default::default()
                    }
                })
            })
            .collect()
    }
}

impl LanguageService for StandaloneHost {
    fn source_file(&self, uri: &Url) -> Option<&SourceFile> {
        self.documents.get(uri)
    }

    fn syntactic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if let Some(file) = self.documents.get(uri) {
            if let Some(tree) = file.tree() {
                self.collect_syntax_errors(tree.root_node(), file.content(), &mut diagnostics);
            }
        }
        diagnostics
    }

    fn semantic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let (Some(config), Some(file)) = (&self.config, self.documents.get(uri)) else {
            return diagnostics;
        };
        if let Some(tree) = file.tree() {
            let lines = LineIndex::new(file.content());
            self.check_token_values(config, tree.root_node(), file.content(), &lines, &mut diagnostics);
        }
        diagnostics
    }

    fn code_fixes_at_position(
        &self,
        _uri: &Url,
        _range: Range,
        _error_codes: &[i32],
        _options: &FormattingOptions,
    ) -> Vec<CodeActionOrCommand> {
        Vec::new()
    }

    fn completions_at_position(
        &self,
        uri: &Url,
        position: Position,
        _context: Option<&CompletionContext>,
    ) -> Option<CompletionResponse> {
        let config = self.config.as_ref()?;
        let file = self.documents.get(uri)?;

        if !self.is_in_value_string(file, position) {
            return None;
        }

        let items = self.theme_completions(config);
        if items.is_empty() {
            None
        } else {
            Some(CompletionResponse::Array(items))
        }
    }

    fn completion_entry_details(
        &self,
        _uri: &Url,
        _position: Position,
        _entry_name: &str,
        _options: &FormattingOptions,
        _source: Option<&str>,
        _data: Option<&Value>,
    ) -> Option<CompletionEntryDetails> {
        None
    }

    fn quick_info_at_position(&self, _uri: &Url, _position: Position) -> Option<Hover> {
        None
    }

    fn definition_at_position(&self, _uri: &Url, _position: Position) -> Option<Vec<Location>> {
        None
    }

    fn references_at_position(&self, _uri: &Url, _position: Position) -> Option<Vec<Location>> {
        None
    }

    fn formatting_edits(&self, _uri: &Url, _options: &FormattingOptions) -> Option<Vec<TextEdit>> {
        None
    }

    fn dispose(&self) {
        log::info!("Standalone host disposed with {} open documents", self.documents.len());
    }
}
