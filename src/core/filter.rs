use super::key_set::KeySet;

/// Which keys end up in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    /// Every known key with its usage count.
    #[default]
    All,
    /// Only keys that were never found.
    UnusedOnly,
}

impl ReportMode {
    pub fn from_unused_only(unused_only: bool) -> Self {
        if unused_only {
            Self::UnusedOnly
        } else {
            Self::All
        }
    }
}

/// Narrow aggregated counts to what `mode` asks for.
pub fn filter(mut counts: KeySet, mode: ReportMode) -> KeySet {
    if mode == ReportMode::UnusedOnly {
        counts.retain_unused();
    }
    counts
}
