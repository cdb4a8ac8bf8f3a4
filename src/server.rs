//! Token Language Server
//!
//! Serves the token plugin over the Language Server Protocol using tower-lsp, with the
//! standalone host underneath. Requests are translated one to one onto the
//! [`LanguageService`] operations.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use crate::service::LanguageService;
use crate::standalone::StandaloneHost;
use crate::token::constants::DIAGNOSTIC_SOURCE;
use crate::token::plugin::{load_project_config, TokenLanguageService};

/// Stored in `CompletionItem::data` so resolve knows where the item came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionItemOrigin {
    uri: Url,
    position: Position,
}

/// Token Language Server
pub struct TokenLanguageServer {
    client: Client,
    /// tower-lsp requires Send + Sync, requests are still handled one at a time
    state: Arc<Mutex<TokenLanguageService<StandaloneHost>>>,
}

impl TokenLanguageServer {
    pub fn new(client: Client, service: TokenLanguageService<StandaloneHost>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` against the service, `None` if the lock is poisoned
    fn with_service<T>(&self, f: impl FnOnce(&mut TokenLanguageService<StandaloneHost>) -> T) -> Option<T> {
        match self.state.lock() {
            Ok(mut service) => Some(f(&mut service)),
            Err(_) => {
                log::error!("Failed to acquire service lock");
                None
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TokenLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                diagnostic_provider: Some(DiagnosticServerCapabilities::Options(
                    DiagnosticOptions {
                        identifier: Some(DIAGNOSTIC_SOURCE.to_string()),
                        inter_file_dependencies: false,
                        workspace_diagnostics: false,
                        ..Default::default()
                    },
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    trigger_characters: Some(vec![
                        "'".to_string(),  // start of a value string
                        "\"".to_string(),
                        "$".to_string(), // theme references
                    ]),
                    all_commit_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    completion_item: None,
                }),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let enabled = self.with_service(|service| service.is_enabled()).unwrap_or(false);
        let message = if enabled {
            "Token Language Server initialized"
        } else {
            "Token Language Server initialized without a token config"
        };
        self.client.log_message(MessageType::INFO, message).await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.with_service(|service| service.dispose());
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        log::info!("Opened document: {}", document.uri);
        self.with_service(|service| {
            service
                .host_mut()
                .open_document(document.uri, document.text, document.version)
        });
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync, the last change holds the whole document
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        self.with_service(|service| service.host_mut().update_document(&uri, change.text, version));
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        log::info!("Closed document: {}", uri);
        self.with_service(|service| service.host_mut().close_document(&uri));
    }

    async fn diagnostic(
        &self,
        params: DocumentDiagnosticParams,
    ) -> Result<DocumentDiagnosticReportResult> {
        let uri = params.text_document.uri;

        let diagnostics = self
            .with_service(|service| {
                let mut diagnostics = service.syntactic_diagnostics(&uri);
                diagnostics.extend(service.semantic_diagnostics(&uri));
                diagnostics
            })
            .unwrap_or_default();

        Ok(DocumentDiagnosticReportResult::Report(
            DocumentDiagnosticReport::Full(RelatedFullDocumentDiagnosticReport {
                related_documents: None,
                full_document_diagnostic_report: FullDocumentDiagnosticReport {
                    result_id: None,
                    items: diagnostics,
                },
            }),
        ))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let response = self
            .with_service(|service| {
                service.completions_at_position(&uri, position, params.context.as_ref())
            })
            .flatten();

        let Some(mut response) = response else {
            return Ok(None);
        };

        let origin = serde_json::to_value(CompletionItemOrigin {
            uri: uri.clone(),
            position,
        })
        .ok();
        let items = match &mut response {
            CompletionResponse::Array(items) => items,
            CompletionResponse::List(list) => &mut list.items,
        };
        for item in items.iter_mut().filter(|item| item.data.is_none()) {
            item.data = origin.clone();
        }

        log::debug!("Returning {} completions for {}", items.len(), uri);
        Ok(Some(response))
    }

    async fn completion_resolve(&self, mut item: CompletionItem) -> Result<CompletionItem> {
        let Some(origin) = item
            .data
            .clone()
            .and_then(|data| serde_json::from_value::<CompletionItemOrigin>(data).ok())
        else {
            return Ok(item);
        };

        let details = self
            .with_service(|service| {
                service.completion_entry_details(
                    &origin.uri,
                    origin.position,
                    &item.label,
                    &FormattingOptions::default(),
                    None,
                    item.data.as_ref(),
                )
            })
            .flatten();

        if let Some(details) = details {
            item.detail = Some(if details.kind_modifiers.is_empty() {
                details.display
            } else {
                format!("{}: {}", details.kind_modifiers, details.display)
            });
            if let Some(documentation) = details.documentation {
                item.documentation = Some(Documentation::String(documentation));
            }
        }

        Ok(item)
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let range = params.range;
        let error_codes: Vec<i32> = params
            .context
            .diagnostics
            .iter()
            .filter_map(|diagnostic| match diagnostic.code {
                Some(NumberOrString::Number(code)) => Some(code),
                _ => None,
            })
            .collect();

        let actions = self
            .with_service(|service| {
                service.code_fixes_at_position(&uri, range, &error_codes, &FormattingOptions::default())
            })
            .unwrap_or_default();

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        Ok(self
            .with_service(|service| service.quick_info_at_position(&uri, position))
            .flatten())
    }
}

/// Create and start the token language server on stdio
pub async fn start_language_server(project_path: PathBuf, config_override: Option<PathBuf>) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    // The standalone host checks values against the same config the plugin augments with
    let config = load_project_config(&project_path, config_override.as_deref());
    let host = StandaloneHost::new(config.clone())?;
    let plugin = TokenLanguageService::with_config(host, config);

    let (service, socket) = LspService::new(|client| TokenLanguageServer::new(client, plugin));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
