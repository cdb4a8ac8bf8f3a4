//! Test utilities shared across the codebase

use std::cell::Cell;
use std::collections::BTreeMap;

use serde_json::Value;
use tower_lsp::lsp_types::*;
use tree_sitter::Node;
use url::Url;

use crate::language::parser::TsParser;
use crate::language::source_file::SourceFile;
use crate::service::{CompletionEntryDetails, LanguageService};
use crate::token::config::Config;

/// Uri used for the single file of a test host
pub fn test_uri() -> Url {
    Url::parse("file:///project/src/styles.ts").unwrap()
}

/// Config with a small theme, `md`/`lg` breakpoints and `hover`/`focus` selectors
pub fn sample_config() -> Config {
    let mut theme = BTreeMap::new();
    theme.insert(
        "color".to_string(),
        BTreeMap::from([
            ("blue".to_string(), "#00f".to_string()),
            ("red".to_string(), "#f00".to_string()),
        ]),
    );
    theme.insert(
        "space".to_string(),
        BTreeMap::from([("1".to_string(), "0.25rem".to_string())]),
    );

    Config {
        theme,
        responsive: BTreeMap::from([
            ("md".to_string(), "@media (min-width: 700px)".to_string()),
            ("lg".to_string(), "@media (min-width: 1024px)".to_string()),
        ]),
        selectors: BTreeMap::from([
            ("hover".to_string(), "&:hover".to_string()),
            ("focus".to_string(), "&:focus".to_string()),
        ]),
    }
}

/// Parse TypeScript content into a source file for [`test_uri`]
pub fn parse_source(content: &str) -> SourceFile {
    let mut parser = TsParser::new().unwrap();
    SourceFile::parsed(test_uri(), content.to_string(), 1, &mut parser)
}

/// First node of `kind` in a depth-first walk
pub fn find_node_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }

    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find_map(|child| find_node_by_kind(child, kind))
}

/// Byte offset of the first occurrence of `needle`
pub fn offset_of(content: &str, needle: &str) -> usize {
    content
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in test content", needle))
}

/// Plain completion item as a host would return it
pub fn completion_item(label: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(CompletionItemKind::VALUE),
        ..Default::default()
    }
}

/// Diagnostic with a numeric code starting at `start`
pub fn host_diagnostic(start: Position, end: Position, code: i32, message: &str) -> Diagnostic {
    Diagnostic {
        range: Range { start, end },
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::Number(code)),
        source: Some("ts".to_string()),
        message: message.to_string(),
        ..Default::default()
    }
}

/// Host with canned results that counts the calls it receives
#[derive(Default)]
pub struct MockHost {
    pub file: Option<SourceFile>,
    pub syntactic: Vec<Diagnostic>,
    pub semantic: Vec<Diagnostic>,
    pub fixes: Vec<CodeActionOrCommand>,
    pub completions: Option<CompletionResponse>,
    pub details: Option<CompletionEntryDetails>,
    pub hover: Option<Hover>,
    pub locations: Option<Vec<Location>>,
    pub edits: Option<Vec<TextEdit>>,
    pub calls: Cell<usize>,
    pub disposed: Cell<bool>,
}

impl MockHost {
    pub fn with_source(content: &str) -> Self {
        Self {
            file: Some(parse_source(content)),
            ..Default::default()
        }
    }

    fn record(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl LanguageService for MockHost {
    fn source_file(&self, uri: &Url) -> Option<&SourceFile> {
        self.file.as_ref().filter(|file| file.uri() == uri)
    }

    fn syntactic_diagnostics(&self, _uri: &Url) -> Vec<Diagnostic> {
        self.record();
        self.syntactic.clone()
    }

    fn semantic_diagnostics(&self, _uri: &Url) -> Vec<Diagnostic> {
        self.record();
        self.semantic.clone()
    }

    fn code_fixes_at_position(
        &self,
        _uri: &Url,
        _range: Range,
        _error_codes: &[i32],
        _options: &FormattingOptions,
    ) -> Vec<CodeActionOrCommand> {
        self.record();
        self.fixes.clone()
    }

    fn completions_at_position(
        &self,
        _uri: &Url,
        _position: Position,
        _context: Option<&CompletionContext>,
    ) -> Option<CompletionResponse> {
        self.record();
        self.completions.clone()
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
        self.record();
        self.details.clone()
    }

    fn quick_info_at_position(&self, _uri: &Url, _position: Position) -> Option<Hover> {
        self.record();
        self.hover.clone()
    }

    fn definition_at_position(&self, _uri: &Url, _position: Position) -> Option<Vec<Location>> {
        self.record();
        self.locations.clone()
    }

    fn references_at_position(&self, _uri: &Url, _position: Position) -> Option<Vec<Location>> {
        self.record();
        self.locations.clone()
    }

    fn formatting_edits(&self, _uri: &Url, _options: &FormattingOptions) -> Option<Vec<TextEdit>> {
        self.record();
        self.edits.clone()
    }

    fn dispose(&self) {
        self.disposed.set(true);
    }
}
