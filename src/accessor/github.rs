// file: src/accessor/github.rs
// description: GitHub contents API implementation of TextFileAccessor
// reference: https://docs.github.com/en/rest/repos/contents

use crate::accessor::{ReadFile, TextFileAccessor, WriteReceipt};
use crate::config::GithubConfig;
use crate::error::{PruneError, Result};
use crate::models::RepositoryRef;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type")]
    kind: String,
    sha: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateFileRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct UpdateFileResponse {
    #[serde(default)]
    commit: Option<CommitInfo>,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    #[serde(default)]
    html_url: Option<String>,
}

/// Reads and conditionally rewrites one file in one repository through the
/// GitHub contents API. The blob sha returned on read is the revision token;
/// the PUT carries it back so a concurrent edit fails the write instead of
/// being overwritten.
pub struct GithubContentsAccessor {
    client: Client,
    api_base: String,
    token: Option<String>,
    user_agent: String,
    owner: String,
    repo: String,
}

impl GithubContentsAccessor {
    pub fn new(config: &GithubConfig, repository: &RepositoryRef) -> Result<Self> {
        let owner = repository.owner_login()?.to_string();

        Ok(Self {
            client: Client::new(),
            api_base: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
            owner,
            repo: repository.name.clone(),
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", &self.user_agent);

        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }
}

/// The API line-wraps base64 blobs at 60 columns; strip whitespace before
/// decoding.
fn decode_content(raw: &str) -> Result<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(stripped.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

async fn transport_error(response: reqwest::Response) -> PruneError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    PruneError::Transport { status, message }
}

#[async_trait]
impl TextFileAccessor for GithubContentsAccessor {
    async fn read_text(&self, path: &str) -> Result<ReadFile> {
        let url = self.contents_url(path);
        debug!("Fetching {}", url);

        let response = self.request(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ReadFile::missing());
        }

        if !response.status().is_success() {
            return Err(transport_error(response).await);
        }

        let contents: ContentsResponse = response.json().await?;

        if contents.kind != "file" {
            return Err(PruneError::NotAFile {
                path: url,
                kind: contents.kind,
            });
        }

        let content = decode_content(contents.content.as_deref().unwrap_or_default())?;

        Ok(ReadFile {
            exists: true,
            content,
            revision: Some(contents.sha),
        })
    }

    async fn write_text(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_revision: Option<&str>,
    ) -> Result<WriteReceipt> {
        let url = self.contents_url(path);
        debug!("Updating {}", url);

        let body = UpdateFileRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            sha: expected_revision,
        };

        let response = self.request(self.client.put(&url)).json(&body).send().await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(PruneError::Conflict {
                path: path.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(transport_error(response).await);
        }

        let update: UpdateFileResponse = response.json().await?;

        // A successful contents PUT always creates a commit, even for
        // identical content; the identical-content no-op in the trait
        // contract is left to callers that diff before writing.
        Ok(WriteReceipt {
            updated: true,
            commit_url: update.commit.and_then(|c| c.html_url),
        })
    }
}
