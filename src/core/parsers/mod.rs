//! Parsers for key-source documents.
//!
//! - `keys`: YAML and JSON key files, flattened into dotted key names

pub mod keys;
