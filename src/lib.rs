//! Keytally - translation key usage counter
//!
//! Keytally is a CLI tool and library that counts how often each known key
//! (e.g. a localization identifier) occurs as a literal substring across a
//! source tree, and reports every count or only the unused keys.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, terminal report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scan engine (key loading, discovery, parallel aggregation, output)

pub mod cli;
pub mod config;
pub mod core;
