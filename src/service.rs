//! Language Service
//!
//! The operation set of the host analysis service. The token plugin implements the
//! same trait, so a host can swap its own service for the wrapped one without
//! noticing anything but the extra token semantics.

use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeActionOrCommand, CompletionContext, CompletionResponse, Diagnostic, FormattingOptions,
    Hover, Location, Position, Range, TextEdit,
};
use url::Url;

use crate::language::source_file::SourceFile;

/// Details shown for a single completion entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntryDetails {
    pub name: String,
    pub kind: String,
    pub kind_modifiers: String,
    /// Text rendered in the detail view
    pub display: String,
    pub documentation: Option<String>,
}

/// Operations of a language analysis service.
///
/// Every method is called synchronously, one request at a time.
pub trait LanguageService {
    /// Parsed source of a file the service knows about
    fn source_file(&self, uri: &Url) -> Option<&SourceFile>;

    fn syntactic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic>;

    fn semantic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic>;

    /// Fixes for the diagnostics with `error_codes` inside `range`
    fn code_fixes_at_position(
        &self,
        uri: &Url,
        range: Range,
        error_codes: &[i32],
        options: &FormattingOptions,
    ) -> Vec<CodeActionOrCommand>;

    fn completions_at_position(
        &self,
        uri: &Url,
        position: Position,
        context: Option<&CompletionContext>,
    ) -> Option<CompletionResponse>;

    fn completion_entry_details(
        &self,
        uri: &Url,
        position: Position,
        entry_name: &str,
        options: &FormattingOptions,
        source: Option<&str>,
        data: Option<&Value>,
    ) -> Option<CompletionEntryDetails>;

    fn quick_info_at_position(&self, uri: &Url, position: Position) -> Option<Hover>;

    fn definition_at_position(&self, uri: &Url, position: Position) -> Option<Vec<Location>>;

    fn references_at_position(&self, uri: &Url, position: Position) -> Option<Vec<Location>>;

    fn formatting_edits(&self, uri: &Url, options: &FormattingOptions) -> Option<Vec<TextEdit>>;

    /// Called once when the session ends
    fn dispose(&self);
}
