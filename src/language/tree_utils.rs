use tower_lsp::lsp_types::{Position, Range};
use tree_sitter::Node;

use crate::token::constants::{NODE_STRING, NODE_STRING_FRAGMENT};

/// Byte offsets of line starts, for repeated offset to position conversion.
///
/// Columns are counted in UTF-16 code units, as LSP positions are.
pub(crate) struct LineIndex<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            content,
            line_starts,
        }
    }

    /// LSP position of a byte offset, an offset inside a char counts that char
    pub(crate) fn position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.content.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= byte_offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];

        let character: usize = self.content[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < byte_offset)
            .map(|(_, ch)| ch.len_utf16())
            .sum();

        Position {
            line: line as u32,
            character: character as u32,
        }
    }

    pub(crate) fn range(&self, node: Node) -> Range {
        Range {
            start: self.position(node.start_byte()),
            end: self.position(node.end_byte()),
        }
    }
}

/// Convert tree-sitter node to LSP range
pub(crate) fn node_to_range(node: Node, content: &str) -> Range {
    LineIndex::new(content).range(node)
}

/// Convert LSP position to byte offset, the inverse of [`LineIndex::position`]
///
/// Positions past the end of a line clamp to the line end, positions past the
/// last line clamp to the end of the content. A column that splits a surrogate
/// pair maps to the start of that char.
pub(crate) fn position_to_byte(position: Position, content: &str) -> usize {
    let mut line = 0;
    let mut character = 0;

    for (i, ch) in content.char_indices() {
        if line == position.line
            && (ch == '\n' || character + ch.len_utf16() as u32 > position.character)
        {
            return i;
        }

        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += ch.len_utf16() as u32;
        }
    }

    content.len()
}

/// Smallest named node covering the byte offset
pub(crate) fn find_named_node_at_offset<'a>(root: Node<'a>, offset: usize) -> Option<Node<'a>> {
    root.named_descendant_for_byte_range(offset, offset)
}

/// Text of a node, empty if the range is not valid utf8
pub(crate) fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    node.utf8_text(content.as_bytes()).unwrap_or("")
}

/// Text of a string literal node without the quotes
///
/// Returns `None` for nodes that are not string literals.
pub(crate) fn string_literal_text<'a>(node: Node, content: &'a str) -> Option<&'a str> {
    if node.kind() != NODE_STRING {
        return None;
    }

    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == NODE_STRING_FRAGMENT {
                return Some(node_text(child, content));
            }
        }
    }

    // `''` has no fragment child
    Some("")
}
