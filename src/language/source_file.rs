//! A parsed source file as handed out by a host

use tree_sitter::Tree;
use url::Url;

use crate::language::parser::TsParser;

/// Source text with its syntax tree
pub struct SourceFile {
    uri: Url,
    content: String,
    version: i32,
    tree: Option<Tree>,
}

impl SourceFile {
    pub fn new(uri: Url, content: String, version: i32) -> Self {
        Self {
            uri,
            content,
            version,
            tree: None,
        }
    }

    /// Create and parse in one step
    pub fn parsed(uri: Url, content: String, version: i32, parser: &mut TsParser) -> Self {
        let mut file = Self::new(uri, content, version);
        file.parse(parser);
        file
    }

    /// Parse the current content, replacing any previous tree
    pub fn parse(&mut self, parser: &mut TsParser) {
        self.tree = parser.parse(&self.content, None);
        if self.tree.is_none() {
            log::warn!("Failed to parse {}", self.uri);
        }
    }

    /// Replace the whole content and reparse
    pub fn replace_content(&mut self, content: String, version: i32, parser: &mut TsParser) {
        self.content = content;
        self.version = version;
        self.parse(parser);
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }
}
