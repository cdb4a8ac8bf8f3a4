//! TypeScript parser using tree-sitter-typescript
//!
//! Style objects live in ordinary TypeScript/TSX files, so the TypeScript grammar is
//! all the standalone host needs. Tests use it to build the trees a host would hand us.

use tree_sitter::{Parser, Tree};

/// Parser wrapper around tree-sitter-typescript
pub struct TsParser {
    parser: Parser,
}

impl TsParser {
    /// Create a new TypeScript parser
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())?;

        Ok(Self { parser })
    }

    /// Create a parser for `.tsx` files
    pub fn new_tsx() -> Result<Self, Box<dyn std::error::Error>> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())?;

        Ok(Self { parser })
    }

    /// Parse content and return the syntax tree
    pub fn parse(&mut self, content: &str, old_tree: Option<&Tree>) -> Option<Tree> {
        self.parser.parse(content, old_tree)
    }
}

impl Default for TsParser {
    fn default() -> Self {
        Self::new().expect("Failed to create TypeScript parser")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::tree_utils::string_literal_text;
    use crate::test_utils::find_node_by_kind;
    use crate::token::constants::*;

    #[test]
    fn test_parser_creation() {
        assert!(TsParser::new().is_ok());
        assert!(TsParser::new_tsx().is_ok());
    }

    #[test]
    fn test_object_literal_structure() {
        let mut parser = TsParser::new().unwrap();
        let content = "const s = { 'md$color': '$color.blue' };";
        let tree = parser.parse(content, None).unwrap();
        let root = tree.root_node();
        assert!(!root.has_error());
        assert_eq!(root.kind(), NODE_PROGRAM);

        let pair = find_node_by_kind(root, NODE_PAIR).unwrap();
        let key = pair.child_by_field_name(FIELD_KEY).unwrap();
        let value = pair.child_by_field_name(FIELD_VALUE).unwrap();

        assert_eq!(key.kind(), NODE_STRING);
        assert_eq!(key.utf8_text(content.as_bytes()).unwrap(), "'md$color'");
        assert_eq!(value.kind(), NODE_STRING);
        assert_eq!(string_literal_text(value, content), Some("$color.blue"));
        // The pair and its key start at the same offset
        assert_eq!(pair.start_byte(), key.start_byte());
    }
}
