//! Global key tally.
//!
//! A `KeySet` is seeded once with every known key at zero. After seeding the
//! set of keys is fixed; only counts change, and only upwards, through
//! [`KeySet::merge`].

use std::collections::BTreeMap;

use serde::Serialize;

/// Occurrence counts for a single file, produced by the scanner.
///
/// Not `Clone`: a local result is moved into [`KeySet::merge`], which makes it
/// impossible to merge the same file's counts twice.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LocalResult {
    counts: BTreeMap<String, u64>,
}

impl LocalResult {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Total number of key occurrences in the file.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl FromIterator<(String, u64)> for LocalResult {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Mapping from key to its number of occurrences across all scanned files.
///
/// Serializes as a plain JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeySet {
    counts: BTreeMap<String, u64>,
}

impl KeySet {
    /// Create a key set with every key at count zero.
    ///
    /// Repeated keys collapse into one entry. Key sources reject duplicates
    /// before this point (see [`load_keys`](crate::core::parsers::keys::load_keys)).
    pub fn seed<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            counts: keys.into_iter().map(|k| (k.into(), 0)).collect(),
        }
    }

    /// Add a file's counts into the tally.
    ///
    /// Keys missing from `local` contribute nothing. Keys in `local` that were
    /// not seeded are ignored, so the key set never grows.
    ///
    /// `local` is moved in, so one file's counts cannot be merged twice:
    ///
    /// ```compile_fail
    /// use keytally::core::key_set::{KeySet, LocalResult};
    ///
    /// let mut set = KeySet::seed(["a"]);
    /// let local: LocalResult = [("a".to_string(), 1)].into_iter().collect();
    /// set.merge(local);
    /// set.merge(local);
    /// ```
    pub fn merge(&mut self, local: LocalResult) {
        for (key, count) in local.counts {
            if let Some(total) = self.counts.get_mut(&key) {
                *total += count;
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Key names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(key, count)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of keys whose count is zero.
    pub fn unused_count(&self) -> usize {
        self.counts.values().filter(|count| **count == 0).count()
    }

    pub(crate) fn retain_unused(&mut self) {
        self.counts.retain(|_, count| *count == 0);
    }
}
