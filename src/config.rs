// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PruneError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub github: GithubConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Path of the file to prune inside each target repository.
    pub file_path: String,
    pub commit_message: String,
    pub parallel_workers: usize,
    pub dry_run: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        let defaults = Self::default_config();
        builder = builder
            .set_default("github.api_url", defaults.github.api_url)
            .map_err(|e| PruneError::Config(e.to_string()))?
            .set_default("github.user_agent", defaults.github.user_agent)
            .map_err(|e| PruneError::Config(e.to_string()))?
            .set_default("run.file_path", defaults.run.file_path)
            .map_err(|e| PruneError::Config(e.to_string()))?
            .set_default("run.commit_message", defaults.run.commit_message)
            .map_err(|e| PruneError::Config(e.to_string()))?
            .set_default("run.parallel_workers", defaults.run.parallel_workers as i64)
            .map_err(|e| PruneError::Config(e.to_string()))?
            .set_default("run.dry_run", defaults.run.dry_run)
            .map_err(|e| PruneError::Config(e.to_string()))?;

        builder = builder.add_source(
            config::Environment::with_prefix("RELEASE_PRUNE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PruneError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PruneError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            github: GithubConfig {
                api_url: "https://api.github.com".to_string(),
                token: None,
                user_agent: "release-prune".to_string(),
            },
            run: RunConfig {
                file_path: "package.json".to_string(),
                commit_message:
                    "ci(semantic-release): remove 'release.branches' configuration from package.json"
                        .to_string(),
                parallel_workers: 4,
                dry_run: false,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.run.parallel_workers == 0 {
            return Err(PruneError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.run.file_path.is_empty() {
            return Err(PruneError::Config(
                "file_path must not be empty".to_string(),
            ));
        }

        if self.github.api_url.is_empty() {
            return Err(PruneError::Config("api_url must not be empty".to_string()));
        }

        Ok(())
    }
}
