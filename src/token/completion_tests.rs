//! Tests for token completion

use std::collections::BTreeMap;

use tower_lsp::lsp_types::*;

use super::completion::TokenCompletion;
use super::session_cache::{SessionCache, TokenConfigEntry};
use crate::test_utils::{completion_item, sample_config};

fn augment(labels: &[&str], cache: &SessionCache) -> Vec<CompletionItem> {
    let config = sample_config();
    let items = labels.iter().map(|label| completion_item(label)).collect();
    let response = TokenCompletion::new(&config, cache)
        .augment(Some(CompletionResponse::Array(items)))
        .unwrap();

    match response {
        CompletionResponse::Array(items) => items,
        CompletionResponse::List(list) => list.items,
    }
}

#[test]
fn test_plain_entries_sort_by_name() {
    let cache = SessionCache::new();
    let items = augment(&["color", "display"], &cache);

    assert_eq!(items[0].sort_text.as_deref(), Some("color"));
    assert_eq!(items[1].sort_text.as_deref(), Some("display"));
    assert_eq!(items[0].label_details, None);
    assert!(cache.is_empty());
}

#[test]
fn test_token_properties_sort_first() {
    let cache = SessionCache::new();
    let items = augment(&["color", "hover$color"], &cache);

    let property_sort = items[1].sort_text.clone().unwrap();
    assert_eq!(property_sort, "!hover$color");
    assert!(property_sort < items[0].sort_text.clone().unwrap());
    // Selector only, nothing to describe
    assert_eq!(items[1].label_details, None);
}

#[test]
fn test_responsive_description_is_attached() {
    let cache = SessionCache::new();
    let items = augment(&["md$hover$color"], &cache);

    let details = items[0].label_details.as_ref().unwrap();
    assert_eq!(details.description.as_deref(), Some("@media (min-width: 700px)"));
    assert_eq!(items[0].label, "md$hover$color");
}

#[test]
fn test_unknown_variant_keeps_default_sort() {
    let cache = SessionCache::new();
    let items = augment(&["ai$sm"], &cache);

    assert_eq!(items[0].sort_text.as_deref(), Some("ai$sm"));
    assert_eq!(items[0].label_details, None);
}

#[test]
fn test_token_value_is_relabelled_and_cached() {
    let cache = SessionCache::new();
    let items = augment(&["ai$sm", "$color.blue"], &cache);

    let value = &items[1];
    assert_eq!(value.label, "$blue");
    assert_eq!(value.detail.as_deref(), Some("color"));
    assert_eq!(value.insert_text.as_deref(), Some("$color.blue"));
    assert_eq!(value.sort_text.as_deref(), Some("$color.blue"));
    assert_eq!(
        value.label_details.as_ref().unwrap().description.as_deref(),
        Some("$color.blue")
    );

    assert_eq!(
        cache.get("blue"),
        Some(TokenConfigEntry {
            theme_key: "color".to_string(),
            token_value: "#00f".to_string(),
        })
    );
}

#[test]
fn test_unresolved_token_value_is_left_alone() {
    let cache = SessionCache::new();
    let items = augment(&["$color.purple"], &cache);

    assert_eq!(items[0].label, "$color.purple");
    assert_eq!(items[0].insert_text, None);
    assert!(cache.is_empty());
}

#[test]
fn test_existing_text_edit_is_kept() {
    let config = sample_config();
    let cache = SessionCache::new();
    let edit = TextEdit {
        range: Range::new(Position::new(0, 0), Position::new(0, 1)),
        new_text: "$color.red".to_string(),
    };
    let mut item = completion_item("$color.red");
    item.text_edit = Some(CompletionTextEdit::Edit(edit.clone()));

    TokenCompletion::new(&config, &cache).augment_item(&mut item);

    assert_eq!(item.label, "$red");
    assert_eq!(item.insert_text, None);
    assert_eq!(item.text_edit, Some(CompletionTextEdit::Edit(edit)));
}

#[test]
fn test_completion_list_is_augmented() {
    let config = sample_config();
    let cache = SessionCache::new();
    let list = CompletionList {
        is_incomplete: true,
        items: vec![completion_item("$space.1")],
    };

    let response = TokenCompletion::new(&config, &cache)
        .augment(Some(CompletionResponse::List(list)))
        .unwrap();

    let CompletionResponse::List(list) = response else {
        panic!("Expected the list shape to be preserved");
    };
    assert!(list.is_incomplete);
    assert_eq!(list.items[0].label, "$1");
    assert_eq!(cache.get("1").unwrap().token_value, "0.25rem");
}

#[test]
fn test_absent_response_stays_absent() {
    let config = sample_config();
    let cache = SessionCache::new();
    assert!(TokenCompletion::new(&config, &cache).augment(None).is_none());
}

#[test]
fn test_shared_short_token_resolves_to_last_entry() {
    let mut config = sample_config();
    config.theme.insert(
        "radius".to_string(),
        BTreeMap::from([("1".to_string(), "2px".to_string())]),
    );
    let cache = SessionCache::new();
    let items = vec![completion_item("$space.1"), completion_item("$radius.1")];

    let response = TokenCompletion::new(&config, &cache)
        .augment(Some(CompletionResponse::Array(items)))
        .unwrap();
    let CompletionResponse::Array(items) = response else {
        panic!("Expected an array response");
    };

    // Both show the same short label, the cache keeps the later one
    assert_eq!(items[0].label, "$1");
    assert_eq!(items[1].label, "$1");
    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.get("1"),
        Some(TokenConfigEntry {
            theme_key: "radius".to_string(),
            token_value: "2px".to_string(),
        })
    );
}
