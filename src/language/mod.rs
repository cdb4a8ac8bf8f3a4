//! Source handling shared by the augmenters and the standalone host:
//! parsing with tree-sitter-typescript and tree/position helpers.

pub mod parser;
pub mod source_file;
pub mod tree_utils;
