//! Arbitrary Value Code Fix
//!
//! Offers to wrap a literal token value in the arbitrary marker (`'red'` -> `'[red]'`)
//! when the host reported it as not assignable.

use std::collections::HashMap;

use serde_json::json;
use tower_lsp::lsp_types::*;
use tree_sitter::Node;

use crate::language::tree_utils::{find_named_node_at_offset, node_text, node_to_range};
use crate::token::constants::*;
use crate::token::grammar::try_encode_arbitrary_value;

/// Build the "mark as arbitrary" fix for the node at `offset`.
///
/// `None` when the node is not part of a property assignment with a string value, or
/// when the value is not a bare word.
pub fn arbitrary_value_fix(root: Node, content: &str, uri: &Url, offset: usize) -> Option<CodeAction> {
    let mut node = find_named_node_at_offset(root, offset)?;
    // Inside a string literal the smallest node is its fragment
    if node.kind() == NODE_STRING_FRAGMENT {
        node = node.parent()?;
    }
    let pair = node.parent()?;
    if pair.kind() != NODE_PAIR {
        return None;
    }

    let value_node = pair.child_by_field_name(FIELD_VALUE)?;
    if value_node.kind() != NODE_STRING {
        return None;
    }

    let replacement = try_encode_arbitrary_value(node_text(value_node, content))?;

    let mut changes = HashMap::new();
    changes.insert(
        uri.clone(),
        vec![TextEdit {
            range: node_to_range(value_node, content),
            new_text: replacement.clone(),
        }],
    );

    Some(CodeAction {
        title: format!("Replace with arbitrary value {}", replacement),
        kind: Some(CodeActionKind::QUICKFIX),
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }),
        data: Some(json!({ "fixId": ARBITRARY_VALUE_FIX_ID })),
        ..Default::default()
    })
}
