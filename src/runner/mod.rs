// file: src/runner/mod.rs
// description: bulk fan-out of the pruner across many repositories
// reference: bounded-concurrency stream processing with futures

pub mod progress;

pub use progress::{ProgressTracker, RunStats};

use crate::accessor::GithubContentsAccessor;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Outcome, RepositoryRef};
use crate::pruner::ConfigPruner;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::error;

/// Per-repository result of a bulk run.
pub struct RepoReport {
    pub repository: RepositoryRef,
    pub result: Result<Outcome>,
}

/// Runs the pruner over every target with bounded concurrency. Repositories
/// share no state; same-repository write races are left to the accessor's
/// compare-and-swap. Individual failures are reported, never aborted on.
pub struct BulkRunner {
    config: Arc<Config>,
    colored: bool,
}

impl BulkRunner {
    pub fn new(config: Config, colored: bool) -> Self {
        Self {
            config: Arc::new(config),
            colored,
        }
    }

    pub async fn run(&self, targets: Vec<RepositoryRef>) -> (RunStats, Vec<RepoReport>) {
        let tracker = Arc::new(ProgressTracker::with_color(targets.len(), self.colored));
        let pruner = Arc::new(ConfigPruner::new(&self.config.run));

        let parallel_workers = self.config.run.parallel_workers.max(1);

        let reports = stream::iter(targets.into_iter().map(|repository| {
            let config = Arc::clone(&self.config);
            let pruner = Arc::clone(&pruner);
            let tracker = Arc::clone(&tracker);

            async move {
                tracker.set_message(repository.full_name());

                let result = prune_one(&config, &pruner, &repository).await;

                match &result {
                    Ok(outcome) => tracker.record_outcome(outcome),
                    Err(e) => {
                        error!("{}: {}", repository.full_name(), e);
                        tracker.record_failure();
                    }
                }

                RepoReport { repository, result }
            }
        }))
        .buffer_unordered(parallel_workers)
        .collect::<Vec<_>>()
        .await;

        tracker.finish();
        (tracker.get_stats(), reports)
    }
}

async fn prune_one(
    config: &Config,
    pruner: &ConfigPruner,
    repository: &RepositoryRef,
) -> Result<Outcome> {
    let accessor = GithubContentsAccessor::new(&config.github, repository)?;
    pruner.apply(repository, &accessor).await
}
