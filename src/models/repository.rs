// file: src/models/repository.rs
// description: repository descriptor supplied per invocation
// reference: https://docs.github.com/en/rest/repos

use crate::error::{PruneError, Result};
use serde::{Deserialize, Serialize};

/// A single target repository. `owner` is optional at the edge; callers that
/// build descriptors from API payloads may carry a missing owner, which is
/// rejected during validation rather than at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: Option<String>,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            name: name.into(),
            archived: false,
        }
    }

    /// Parses a `owner/name` target as given on the command line.
    pub fn parse(target: &str) -> Result<Self> {
        match target.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(PruneError::InvalidInput(format!(
                "invalid repository target '{}', expected owner/name",
                target
            ))),
        }
    }

    /// Returns the owner login, failing when the descriptor has none.
    pub fn owner_login(&self) -> Result<&str> {
        match self.owner.as_deref() {
            Some(owner) if !owner.is_empty() => Ok(owner),
            _ => Err(PruneError::missing_owner()),
        }
    }

    pub fn full_name(&self) -> String {
        match self.owner.as_deref() {
            Some(owner) => format!("{}/{}", owner, self.name),
            None => self.name.clone(),
        }
    }
}
