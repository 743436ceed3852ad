// file: src/pruner.rs
// description: conditional read-prune-write of package.json for one repository
// reference: read-modify-write over the TextFileAccessor abstraction

use crate::accessor::TextFileAccessor;
use crate::config::RunConfig;
use crate::error::Result;
use crate::models::{Outcome, RepositoryRef};
use crate::prune;
use tracing::info;

/// Applies the `release.branches` prune to one repository. Holds no state
/// across invocations; each `apply` is an independent read-then-write pass,
/// and a second run over an already-pruned file is a no-op.
pub struct ConfigPruner {
    file_path: String,
    commit_message: String,
    dry_run: bool,
}

impl ConfigPruner {
    pub fn new(run: &RunConfig) -> Self {
        Self {
            file_path: run.file_path.clone(),
            commit_message: run.commit_message.clone(),
            dry_run: run.dry_run,
        }
    }

    /// Reads the target file, prunes it, and writes back only when pruning
    /// changed the document. Accessor failures propagate verbatim; the only
    /// locally handled conditions are the archived, missing-file, and
    /// no-change success paths.
    pub async fn apply(
        &self,
        repository: &RepositoryRef,
        accessor: &dyn TextFileAccessor,
    ) -> Result<Outcome> {
        repository.owner_login()?;

        let full_name = repository.full_name();

        if repository.archived {
            info!("{}: archived, skipping", full_name);
            return Ok(Outcome::SkippedArchived);
        }

        let file = accessor.read_text(&self.file_path).await?;

        if !file.exists {
            info!("{}: no {} found, skipping", full_name, self.file_path);
            return Ok(Outcome::SkippedMissing);
        }

        let Some(pruned) = prune::prune_text(&file.content)? else {
            info!(
                "{}: no 'release.branches' in {}, skipping",
                full_name, self.file_path
            );
            return Ok(Outcome::SkippedNoChange);
        };

        if self.dry_run {
            info!("{}: would update {} (dry-run)", full_name, self.file_path);
            return Ok(Outcome::WouldUpdate);
        }

        let receipt = accessor
            .write_text(
                &self.file_path,
                &pruned,
                &self.commit_message,
                file.revision.as_deref(),
            )
            .await?;

        match &receipt.commit_url {
            Some(url) => info!("{}: updated {} in {}", full_name, self.file_path, url),
            None => info!("{}: updated {}", full_name, self.file_path),
        }

        Ok(Outcome::Updated {
            commit_url: receipt.commit_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{ReadFile, WriteReceipt};
    use crate::config::Config;
    use crate::error::PruneError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Read(String),
        Write {
            path: String,
            content: String,
            message: String,
            revision: Option<String>,
        },
    }

    enum ReadBehavior {
        File { content: String, sha: String },
        Missing,
        Directory,
        ServerError,
    }

    enum WriteBehavior {
        Succeed,
        StaleRevision,
        ServerError,
    }

    struct FakeAccessor {
        read: ReadBehavior,
        write: WriteBehavior,
        commit_url: Option<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeAccessor {
        fn with_file(content: &str) -> Self {
            Self {
                read: ReadBehavior::File {
                    content: content.to_string(),
                    sha: "randomSha".to_string(),
                },
                write: WriteBehavior::Succeed,
                commit_url: Some("https://example.com/commit/1".to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_behavior(read: ReadBehavior) -> Self {
            Self {
                read,
                write: WriteBehavior::Succeed,
                commit_url: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_write(content: &str, write: WriteBehavior) -> Self {
            Self {
                write,
                ..Self::with_file(content)
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn write_calls(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| matches!(c, Call::Write { .. }))
                .collect()
        }
    }

    #[async_trait]
    impl TextFileAccessor for FakeAccessor {
        async fn read_text(&self, path: &str) -> crate::error::Result<ReadFile> {
            self.calls.lock().unwrap().push(Call::Read(path.to_string()));

            match &self.read {
                ReadBehavior::File { content, sha } => Ok(ReadFile {
                    exists: true,
                    content: content.clone(),
                    revision: Some(sha.clone()),
                }),
                ReadBehavior::Missing => Ok(ReadFile::missing()),
                ReadBehavior::Directory => Err(PruneError::NotAFile {
                    path: path.to_string(),
                    kind: "dir".to_string(),
                }),
                ReadBehavior::ServerError => Err(PruneError::Transport {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                }),
            }
        }

        async fn write_text(
            &self,
            path: &str,
            content: &str,
            message: &str,
            expected_revision: Option<&str>,
        ) -> crate::error::Result<WriteReceipt> {
            self.calls.lock().unwrap().push(Call::Write {
                path: path.to_string(),
                content: content.to_string(),
                message: message.to_string(),
                revision: expected_revision.map(str::to_string),
            });

            match self.write {
                WriteBehavior::Succeed => Ok(WriteReceipt {
                    updated: true,
                    commit_url: self.commit_url.clone(),
                }),
                WriteBehavior::StaleRevision => Err(PruneError::Conflict {
                    path: path.to_string(),
                }),
                WriteBehavior::ServerError => Err(PruneError::Transport {
                    status: 502,
                    message: "Bad Gateway".to_string(),
                }),
            }
        }
    }

    fn pruner() -> ConfigPruner {
        ConfigPruner::new(&Config::default_config().run)
    }

    fn repo() -> RepositoryRef {
        RepositoryRef::new("octocat", "Hello-World")
    }

    #[tokio::test]
    async fn test_removes_branches_and_writes_back() {
        let accessor = FakeAccessor::with_file(
            r#"{"name":"octoherd-cli","release":{"branches":["main"],"plugins":["p"]}}"#,
        );

        let outcome = pruner().apply(&repo(), &accessor).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                commit_url: Some("https://example.com/commit/1".to_string())
            }
        );

        let writes = accessor.write_calls();
        assert_eq!(writes.len(), 1);
        let Call::Write {
            path,
            content,
            message,
            revision,
        } = &writes[0]
        else {
            unreachable!()
        };

        assert_eq!(path, "package.json");
        assert_eq!(
            content,
            "{\n  \"name\": \"octoherd-cli\",\n  \"release\": {\n    \"plugins\": [\n      \"p\"\n    ]\n  }\n}\n"
        );
        assert_eq!(
            message,
            "ci(semantic-release): remove 'release.branches' configuration from package.json"
        );
        assert_eq!(revision.as_deref(), Some("randomSha"));
    }

    #[tokio::test]
    async fn test_drops_release_when_it_becomes_empty() {
        let accessor =
            FakeAccessor::with_file(r#"{"name":"octoherd-cli","release":{"branches":["main"]}}"#);

        let outcome = pruner().apply(&repo(), &accessor).await.unwrap();
        assert!(outcome.is_updated());

        let Call::Write { content, .. } = &accessor.write_calls()[0] else {
            unreachable!()
        };
        assert_eq!(content, "{\n  \"name\": \"octoherd-cli\"\n}\n");
    }

    #[tokio::test]
    async fn test_no_change_skips_write() {
        let accessor = FakeAccessor::with_file(r#"{"name":"octoherd-cli"}"#);

        let outcome = pruner().apply(&repo(), &accessor).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedNoChange);
        assert!(accessor.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_skips() {
        let accessor = FakeAccessor::with_behavior(ReadBehavior::Missing);

        let outcome = pruner().apply(&repo(), &accessor).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedMissing);
        assert!(accessor.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_directory_error_propagates() {
        let accessor = FakeAccessor::with_behavior(ReadBehavior::Directory);

        let err = pruner().apply(&repo(), &accessor).await.unwrap_err();
        assert!(matches!(err, PruneError::NotAFile { .. }));
        assert_eq!(err.to_string(), "package.json is not a file, but a dir");
        assert!(accessor.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let accessor = FakeAccessor::with_behavior(ReadBehavior::ServerError);

        let err = pruner().apply(&repo(), &accessor).await.unwrap_err();
        assert!(matches!(err, PruneError::Transport { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_parse_error_propagates() {
        let accessor = FakeAccessor::with_file("{not json");

        let err = pruner().apply(&repo(), &accessor).await.unwrap_err();
        assert!(matches!(err, PruneError::Json(_)));
        assert!(accessor.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_owner_fails_before_any_access() {
        let accessor = FakeAccessor::with_file("{}");
        let repo = RepositoryRef {
            owner: None,
            name: "Hello-World".to_string(),
            archived: false,
        };

        let err = pruner().apply(&repo, &accessor).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "repository must have an 'owner' associated"
        );
        assert!(accessor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_archived_repository_skips_without_access() {
        let accessor = FakeAccessor::with_file("{}");
        let mut repo = repo();
        repo.archived = true;

        let outcome = pruner().apply(&repo, &accessor).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedArchived);
        assert!(accessor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_never_writes() {
        let accessor = FakeAccessor::with_file(r#"{"release":{"branches":["main"]}}"#);
        let mut run = Config::default_config().run;
        run.dry_run = true;

        let outcome = ConfigPruner::new(&run).apply(&repo(), &accessor).await.unwrap();
        assert_eq!(outcome, Outcome::WouldUpdate);
        assert!(accessor.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_stale_revision_conflict_propagates() {
        let accessor = FakeAccessor::failing_write(
            r#"{"release":{"branches":["main"],"plugins":["p"]}}"#,
            WriteBehavior::StaleRevision,
        );

        let err = pruner().apply(&repo(), &accessor).await.unwrap_err();
        assert!(matches!(err, PruneError::Conflict { .. }));
        assert_eq!(
            err.to_string(),
            "Write rejected for package.json: revision is stale"
        );
        assert_eq!(accessor.write_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_write_transport_error_propagates() {
        let accessor = FakeAccessor::failing_write(
            r#"{"release":{"branches":["main"]}}"#,
            WriteBehavior::ServerError,
        );

        let err = pruner().apply(&repo(), &accessor).await.unwrap_err();
        assert!(matches!(err, PruneError::Transport { status: 502, .. }));
        assert_eq!(accessor.write_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let accessor = FakeAccessor::with_file(
            r#"{"release":{"branches":["main"],"plugins":["p"]}}"#,
        );

        let outcome = pruner().apply(&repo(), &accessor).await.unwrap();
        assert!(outcome.is_updated());

        let Call::Write { content, .. } = &accessor.write_calls()[0] else {
            unreachable!()
        };

        let second = FakeAccessor::with_file(content);
        let outcome = pruner().apply(&repo(), &second).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedNoChange);
        assert!(second.write_calls().is_empty());
    }
}
