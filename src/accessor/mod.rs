// file: src/accessor/mod.rs
// description: remote text-file access abstraction and exports
// reference: internal module structure

pub mod github;

pub use github::GithubContentsAccessor;

use crate::error::Result;
use async_trait::async_trait;

/// Content and revision of a remote file as last read.
#[derive(Debug, Clone)]
pub struct ReadFile {
    pub exists: bool,
    pub content: String,
    /// Opaque revision token (blob sha on GitHub), fed back to `write_text`
    /// for the compare-and-swap.
    pub revision: Option<String>,
}

impl ReadFile {
    pub fn missing() -> Self {
        Self {
            exists: false,
            content: String::new(),
            revision: None,
        }
    }
}

/// Receipt of a conditional write.
#[derive(Debug, Clone)]
pub struct WriteReceipt {
    pub updated: bool,
    pub commit_url: Option<String>,
}

/// Optimistic-concurrency read/write of a single text file in a repository.
///
/// `write_text` must compare-and-swap against `expected_revision`: a stale
/// token fails with `PruneError::Conflict` instead of clobbering a
/// concurrent edit. Retry and timeout policy live behind this trait, never
/// in the callers.
#[async_trait]
pub trait TextFileAccessor: Send + Sync {
    async fn read_text(&self, path: &str) -> Result<ReadFile>;

    async fn write_text(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_revision: Option<&str>,
    ) -> Result<WriteReceipt>;
}
