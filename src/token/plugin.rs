//! Token Language Service Plugin
//!
//! Wraps a host [`LanguageService`] and adds token semantics to four operations:
//! semantic diagnostics, code fixes, completions and completion details. Everything
//! else is forwarded to the host unchanged.
//!
//! Without a config the plugin is a pure pass-through.

use std::path::Path;

use serde_json::Value;
use tower_lsp::lsp_types::*;
use url::Url;

use crate::language::source_file::SourceFile;
use crate::language::tree_utils::position_to_byte;
use crate::service::{CompletionEntryDetails, LanguageService};
use crate::token::code_fix::arbitrary_value_fix;
use crate::token::completion::TokenCompletion;
use crate::token::config::{config_path_for, file_exists, load_config_at, Config};
use crate::token::constants::VALUE_NOT_ASSIGNABLE_CODE;
use crate::token::details::token_entry_details;
use crate::token::diagnostics::TokenDiagnostics;
use crate::token::session_cache::SessionCache;

/// Locate and load the token config of a project.
///
/// A missing or unreadable config is logged and yields `None`, which turns the
/// plugin into a pass-through.
pub fn load_project_config(project_dir: &Path, override_path: Option<&Path>) -> Option<Config> {
    let config_path = config_path_for(project_dir, override_path);

    if !file_exists(&config_path) {
        log::warn!(
            "No token config found at {}, token features are disabled",
            config_path.display()
        );
        return None;
    }

    match load_config_at(&config_path) {
        Ok(config) => {
            log::info!("Loaded token config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::error!(
                "Failed to load token config {}: {}, token features are disabled",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// State that only exists when a config was loaded
struct TokenState {
    config: Config,
    /// Lives as long as the plugin, cleared on [`LanguageService::dispose`]
    cache: SessionCache,
}

/// Host language service with token augmentation
pub struct TokenLanguageService<H> {
    host: H,
    state: Option<TokenState>,
}

impl<H: LanguageService> TokenLanguageService<H> {
    /// Create the plugin for a project, loading the config from `project_dir`
    /// or from `override_path`.
    pub fn create(host: H, project_dir: &Path, override_path: Option<&Path>) -> Self {
        Self::with_config(host, load_project_config(project_dir, override_path))
    }

    /// Create the plugin with an already loaded config
    pub fn with_config(host: H, config: Option<Config>) -> Self {
        Self {
            host,
            state: config.map(|config| TokenState {
                config,
                cache: SessionCache::new(),
            }),
        }
    }

    /// Whether token augmentation is active
    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn config(&self) -> Option<&Config> {
        self.state.as_ref().map(|state| &state.config)
    }

    pub fn session_cache(&self) -> Option<&SessionCache> {
        self.state.as_ref().map(|state| &state.cache)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: LanguageService> LanguageService for TokenLanguageService<H> {
    fn source_file(&self, uri: &Url) -> Option<&SourceFile> {
        self.host.source_file(uri)
    }

    fn syntactic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        self.host.syntactic_diagnostics(uri)
    }

    fn semantic_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        let original = self.host.semantic_diagnostics(uri);
        let Some(state) = &self.state else {
            return original;
        };

        let Some(file) = self.host.source_file(uri) else {
            log::debug!("No source file for {}, diagnostics left unchanged", uri);
            return original;
        };
        let Some(tree) = file.tree() else {
            return original;
        };

        TokenDiagnostics::new(&state.config).augment(tree.root_node(), file.content(), original)
    }

    fn code_fixes_at_position(
        &self,
        uri: &Url,
        range: Range,
        error_codes: &[i32],
        options: &FormattingOptions,
    ) -> Vec<CodeActionOrCommand> {
        let host_fixes = self.host.code_fixes_at_position(uri, range, error_codes, options);
        if self.state.is_none() || !error_codes.contains(&VALUE_NOT_ASSIGNABLE_CODE) {
            return host_fixes;
        }

        let Some(file) = self.host.source_file(uri) else {
            return host_fixes;
        };
        let Some(tree) = file.tree() else {
            return host_fixes;
        };

        let offset = position_to_byte(range.start, file.content());
        match arbitrary_value_fix(tree.root_node(), file.content(), uri, offset) {
            // The arbitrary fix replaces whatever the host offered for this code
            Some(action) => vec![CodeActionOrCommand::CodeAction(action)],
            None => host_fixes,
        }
    }

    fn completions_at_position(
        &self,
        uri: &Url,
        position: Position,
        context: Option<&CompletionContext>,
    ) -> Option<CompletionResponse> {
        let response = self.host.completions_at_position(uri, position, context);
        match &self.state {
            Some(state) => TokenCompletion::new(&state.config, &state.cache).augment(response),
            None => response,
        }
    }

    fn completion_entry_details(
        &self,
        uri: &Url,
        position: Position,
        entry_name: &str,
        options: &FormattingOptions,
        source: Option<&str>,
        data: Option<&Value>,
    ) -> Option<CompletionEntryDetails> {
        let host_details =
            self.host
                .completion_entry_details(uri, position, entry_name, options, source, data);

        match &self.state {
            Some(state) => token_entry_details(&state.cache, entry_name).or(host_details),
            None => host_details,
        }
    }

    fn quick_info_at_position(&self, uri: &Url, position: Position) -> Option<Hover> {
        self.host.quick_info_at_position(uri, position)
    }

    fn definition_at_position(&self, uri: &Url, position: Position) -> Option<Vec<Location>> {
        self.host.definition_at_position(uri, position)
    }

    fn references_at_position(&self, uri: &Url, position: Position) -> Option<Vec<Location>> {
        self.host.references_at_position(uri, position)
    }

    fn formatting_edits(&self, uri: &Url, options: &FormattingOptions) -> Option<Vec<TextEdit>> {
        self.host.formatting_edits(uri, options)
    }

    fn dispose(&self) {
        if let Some(state) = &self.state {
            state.cache.clear();
        }
        self.host.dispose();
    }
}
