//! Core scan engine.
//!
//! ## Pipeline
//!
//! 1. `parsers::keys` loads the known keys, `discovery` lists the source files
//! 2. `aggregator` scans every file in parallel (`scanner`) and merges the
//!    per-file counts into one `KeySet`
//! 3. `filter` narrows the tally to unused keys when asked
//! 4. `writer` serializes the result
//!
//! `context` wires the stages together from CLI arguments and config.

pub mod aggregator;
pub mod context;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod key_set;
pub mod parsers;
pub mod scanner;
pub mod writer;

pub use aggregator::{Aggregator, FileFailure, Tally};
pub use error::{DecodeError, DiscoveryError, FileError, KeySourceError, OutputWriteError};
pub use filter::{ReportMode, filter};
pub use key_set::{KeySet, LocalResult};
pub use scanner::scan;
