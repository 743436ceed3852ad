// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod accessor;
pub mod config;
pub mod error;
pub mod models;
pub mod prune;
pub mod pruner;
pub mod runner;
pub mod utils;

pub use accessor::{GithubContentsAccessor, ReadFile, TextFileAccessor, WriteReceipt};
pub use config::{Config, GithubConfig, RunConfig};
pub use error::{PruneError, Result};
pub use models::{Outcome, RepositoryRef};
pub use pruner::ConfigPruner;
pub use runner::{BulkRunner, ProgressTracker, RepoReport, RunStats};
