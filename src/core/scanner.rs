use std::str;

use super::{error::DecodeError, key_set::LocalResult};

/// Count key occurrences in one file's content.
///
/// Every key is counted as a literal, non-overlapping substring, scanning left
/// to right: `"aa"` occurs once in `"aaa"` and twice in `"aaaa"`. Keys that do
/// not occur are still present in the result with a count of zero.
///
/// Fails only when `content` is not valid UTF-8.
pub fn scan<'k, I>(content: &[u8], keys: I) -> Result<LocalResult, DecodeError>
where
    I: IntoIterator<Item = &'k str>,
{
    let text = str::from_utf8(content)?;
    Ok(keys
        .into_iter()
        .map(|key| (key.to_string(), count_occurrences(text, key)))
        .collect())
}

/// Non-overlapping literal substring count. An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}
