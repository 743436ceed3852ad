// file: src/models/outcome.rs
// description: terminal outcomes of a single pruner invocation
// reference: internal data structures

use std::fmt;

/// Terminal outcome of one repository run. Every invocation ends in exactly
/// one of these; errors are carried separately through `PruneError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Repository is archived, no remote access was made.
    SkippedArchived,
    /// The target file does not exist in the repository.
    SkippedMissing,
    /// The file exists but pruning left it unchanged.
    SkippedNoChange,
    /// Dry-run only: the file would have been rewritten.
    WouldUpdate,
    /// The file was rewritten; `commit_url` is present when the host
    /// reported the resulting commit.
    Updated { commit_url: Option<String> },
}

impl Outcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Outcome::Updated { .. })
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Outcome::SkippedArchived => "archived",
            Outcome::SkippedMissing => "missing",
            Outcome::SkippedNoChange => "no-change",
            Outcome::WouldUpdate => "dry-run",
            Outcome::Updated { .. } => "updated",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Updated {
                commit_url: Some(url),
            } => write!(f, "updated ({})", url),
            Outcome::Updated { commit_url: None } => write!(f, "updated"),
            Outcome::WouldUpdate => write!(f, "would update (dry-run)"),
            skipped => write!(f, "skipped ({})", skipped.reason()),
        }
    }
}
