//! Parallel scan-and-merge over a fixed list of files.
//!
//! Each file is one rayon task: read the bytes, count keys, merge the local
//! counts into the shared `KeySet`. The mutex around the key set is taken only
//! for the merge, so reads and scans of different files never serialize.
//!
//! `run` returns after the parallel iterator has drained. Every file has then
//! either been merged exactly once or recorded as a `FileFailure`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder, prelude::*};
use tracing::{debug, info, warn};

use super::{
    error::FileError,
    key_set::{KeySet, LocalResult},
    scanner::scan,
};

/// A file that contributed nothing to the tally.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

/// Result of aggregating a set of files.
#[derive(Debug)]
pub struct Tally {
    /// Merged counts for every known key.
    pub counts: KeySet,
    /// Files that could not be read or decoded.
    pub failures: Vec<FileFailure>,
    /// Number of files whose counts were merged.
    pub files_scanned: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    threads: Option<usize>,
}

impl Aggregator {
    /// Aggregator running on rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator running on a dedicated pool of `threads` workers.
    /// `None` falls back to the global pool.
    pub fn with_threads(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Scan `files` from disk and merge their counts into `seed`.
    pub fn run(&self, seed: KeySet, files: Vec<PathBuf>) -> Result<Tally, ThreadPoolBuildError> {
        self.run_with(seed, files, |path: &Path| fs::read(path))
    }

    /// Like [`Aggregator::run`], reading file content through `read`.
    pub fn run_with<R>(
        &self,
        seed: KeySet,
        files: Vec<PathBuf>,
        read: R,
    ) -> Result<Tally, ThreadPoolBuildError>
    where
        R: Fn(&Path) -> io::Result<Vec<u8>> + Sync,
    {
        info!(
            keys = seed.len(),
            files = files.len(),
            threads = ?self.threads,
            "aggregating key usages"
        );

        let tally = match self.threads {
            Some(threads) => ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| aggregate(seed, files, &read)),
            None => aggregate(seed, files, &read),
        };

        info!(
            scanned = tally.files_scanned,
            failed = tally.failures.len(),
            unused = tally.counts.unused_count(),
            "aggregation finished"
        );
        Ok(tally)
    }
}

fn aggregate<R>(seed: KeySet, files: Vec<PathBuf>, read: &R) -> Tally
where
    R: Fn(&Path) -> io::Result<Vec<u8>> + Sync,
{
    let file_count = files.len();
    let keys: Vec<String> = seed.keys().map(str::to_string).collect();
    let shared = Mutex::new(seed);

    let failures: Vec<FileFailure> = files
        .into_par_iter()
        .filter_map(|path| match count_file(&path, &keys, read) {
            Ok(local) => {
                debug!(path = %path.display(), occurrences = local.total(), "scanned file");
                // Only the merge is serialized.
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .merge(local);
                None
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping file");
                Some(FileFailure { path, error })
            }
        })
        .collect();

    Tally {
        counts: shared.into_inner().unwrap_or_else(PoisonError::into_inner),
        files_scanned: file_count - failures.len(),
        failures,
    }
}

fn count_file<R>(path: &Path, keys: &[String], read: &R) -> Result<LocalResult, FileError>
where
    R: Fn(&Path) -> io::Result<Vec<u8>>,
{
    let content = read(path)?;
    Ok(scan(&content, keys.iter().map(String::as_str))?)
}
