//! Token Completion Details
//!
//! Answers the detail request for a `$token` entry from the session cache filled
//! while the completion list was built.

use crate::service::CompletionEntryDetails;
use crate::token::constants::{DETAIL_KIND_STRING, TOKEN_VALUE_MARKER};
use crate::token::session_cache::SessionCache;

/// Short token of an entry name: `$blue` -> `blue`
pub fn short_token(entry_name: &str) -> Option<&str> {
    entry_name
        .rsplit_once(TOKEN_VALUE_MARKER)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

/// Details for a cached theme token, `None` if the entry was never listed
pub fn token_entry_details(cache: &SessionCache, entry_name: &str) -> Option<CompletionEntryDetails> {
    let token = short_token(entry_name)?;
    let entry = cache.get(token)?;

    Some(CompletionEntryDetails {
        name: entry_name.to_string(),
        kind: DETAIL_KIND_STRING.to_string(),
        kind_modifiers: entry.theme_key,
        display: entry.token_value,
        documentation: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::session_cache::TokenConfigEntry;

    #[test]
    fn test_short_token() {
        assert_eq!(short_token("$blue"), Some("blue"));
        assert_eq!(short_token("blue"), None);
        assert_eq!(short_token("$"), None);
    }

    #[test]
    fn test_details_from_cache() {
        let cache = SessionCache::new();
        cache.insert(
            "blue",
            TokenConfigEntry {
                theme_key: "color".to_string(),
                token_value: "#00f".to_string(),
            },
        );

        let details = token_entry_details(&cache, "$blue").unwrap();
        assert_eq!(details.name, "$blue");
        assert_eq!(details.kind, "string");
        assert_eq!(details.kind_modifiers, "color");
        assert_eq!(details.display, "#00f");

        assert_eq!(token_entry_details(&cache, "$red"), None);
    }
}
