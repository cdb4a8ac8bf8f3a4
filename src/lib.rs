//! Token Lens Library
//!
//! Editor assistance for token style objects: a grammar codec for token properties
//! and values, and a language service plugin that adds token aware diagnostics,
//! code fixes and completions on top of a host service.

pub mod language;
pub mod server;
pub mod service;
pub mod standalone;
pub mod token;

#[cfg(test)]
pub mod test_utils;
