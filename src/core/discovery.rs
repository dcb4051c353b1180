use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::DiscoveryError;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Which files under the source root are scanned.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryOptions<'a> {
    /// File extensions to keep, with or without the leading dot.
    pub extensions: &'a [String],
    /// Directories (literal or glob) to restrict the walk to. Empty means the whole root.
    pub includes: &'a [String],
    /// Paths (literal prefix or glob) to skip.
    pub ignores: &'a [String],
}

/// Files found under the source root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Sorted, without duplicates.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed during the walk.
    pub skipped_count: usize,
}

impl Discovery {
    /// Drop `paths` from the file list. Paths are compared after
    /// canonicalization, so `./keys.json` and `/abs/keys.json` are the same
    /// file. Paths that do not exist are ignored.
    pub fn exclude(&mut self, paths: &[&Path]) {
        let excluded: Vec<PathBuf> = paths
            .iter()
            .filter_map(|path| fs::canonicalize(path).ok())
            .collect();
        if excluded.is_empty() {
            return;
        }

        self.files.retain(|file| {
            // Only canonicalize candidates whose file name can match.
            let name_matches = excluded
                .iter()
                .any(|ex| ex.file_name().is_some() && ex.file_name() == file.file_name());
            if !name_matches {
                return true;
            }
            match fs::canonicalize(file) {
                Ok(canonical) => {
                    let keep = !excluded.contains(&canonical);
                    if !keep {
                        debug!(path = %file.display(), "excluding keytally input/output file");
                    }
                    keep
                }
                Err(_) => true,
            }
        });
    }
}

pub fn discover_files(
    root: &Path,
    options: &DiscoveryOptions<'_>,
) -> Result<Discovery, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let extensions: Vec<&str> = options
        .extensions
        .iter()
        .map(|e| e.trim_start_matches('.'))
        .collect();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    for dir in dirs_to_walk(root, options.includes) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    debug!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && has_extension(path, &extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    debug!(
        root = %root.display(),
        files = files.len(),
        skipped = skipped_count,
        "discovered source files"
    );

    Ok(Discovery {
        files: files.into_iter().collect(),
        skipped_count,
    })
}

fn dirs_to_walk(root: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![root.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = root.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
            }
        } else {
            let path = root.join(inc);
            if path.exists() {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "include path does not exist");
            }
        }
    }
    paths
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}
