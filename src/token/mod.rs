//! Token Styles
//!
//! Grammar and editor assistance for token style objects, where object keys encode
//! `responsive$selector$property` declarations and values reference a theme config
//! (`$color.blue`) or are marked arbitrary (`[red]`).

pub mod code_fix;
pub mod completion;
pub mod config;
pub mod constants;
pub mod details;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod plugin;
pub mod session_cache;

#[cfg(test)]
mod completion_tests;
