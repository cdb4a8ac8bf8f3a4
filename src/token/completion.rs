//! Token Completion
//!
//! Reorders and relabels the host's completion entries:
//! - token properties sort ahead of everything else and show their responsive description
//! - theme references are shown as `$token` with the theme key as modifier, while the
//!   full reference is still what gets inserted
//!
//! Every theme reference seen here is recorded in the session cache so the detail
//! request for the same entry can be answered later.

use tower_lsp::lsp_types::*;

use crate::token::config::Config;
use crate::token::constants::TOKEN_PROPERTY_SORT_PREFIX;
use crate::token::grammar::{
    decode_token_property, decode_token_value, is_token_property_name, is_token_value_name,
};
use crate::token::session_cache::{SessionCache, TokenConfigEntry};

/// Token completion augmenter
pub struct TokenCompletion<'a> {
    config: &'a Config,
    cache: &'a SessionCache,
}

impl<'a> TokenCompletion<'a> {
    pub fn new(config: &'a Config, cache: &'a SessionCache) -> Self {
        Self { config, cache }
    }

    /// Augment every entry of a host completion response
    pub fn augment(&self, response: Option<CompletionResponse>) -> Option<CompletionResponse> {
        let mut response = response?;
        let items = match &mut response {
            CompletionResponse::Array(items) => items,
            CompletionResponse::List(list) => &mut list.items,
        };

        for item in items.iter_mut() {
            self.augment_item(item);
        }

        Some(response)
    }

    /// Augment a single entry in place
    pub fn augment_item(&self, item: &mut CompletionItem) {
        let name = item.label.clone();
        item.sort_text = Some(name.clone());

        if is_token_property_name(&name) {
            if let Some(property) = decode_token_property(&name, self.config) {
                item.sort_text = Some(format!("{}{}", TOKEN_PROPERTY_SORT_PREFIX, name));

                let description = property
                    .responsive
                    .as_deref()
                    .and_then(|responsive| self.config.responsive.get(responsive));
                if let Some(description) = description {
                    item.label_details = Some(CompletionItemLabelDetails {
                        detail: None,
                        description: Some(description.clone()),
                    });
                }
            }
        }

        if is_token_value_name(&name) {
            let Some(token_value) = decode_token_value(&name) else {
                return;
            };
            let Some(resolved) = token_value.resolve(self.config) else {
                return;
            };

            self.cache.insert(
                &token_value.token,
                TokenConfigEntry {
                    theme_key: token_value.theme_key.clone(),
                    token_value: resolved.to_string(),
                },
            );

            item.label = token_value.short_name();
            item.detail = Some(token_value.theme_key.clone());
            if item.text_edit.is_none() {
                item.insert_text = Some(name.clone());
            }
            item.label_details = Some(CompletionItemLabelDetails {
                detail: None,
                description: Some(name),
            });
        }
    }
}
