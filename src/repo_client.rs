/*!
 * Thin client for the GitHub REST API.
 *
 * The pipeline needs exactly two capabilities from the hosting service:
 * list the recursive tree at the head of the default branch, and fetch the
 * raw UTF-8 content of a single file. Everything else (auth, media types,
 * branch resolution) is plumbing kept inside this module.
 */

use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use url::Url;

use crate::app_config::GithubConfig;
use crate::errors::RepoError;

const USER_AGENT: &str = concat!("mdxlate/", env!("CARGO_PKG_VERSION"));

/// Kind of a tree entry, directory or file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEntryKind {
    /// A directory ("tree" in GitHub terms)
    Directory,
    /// A regular file ("blob" in GitHub terms)
    File,
}

/// One entry of a repository tree listing
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Repository-relative path
    pub path: String,
    /// Directory or file
    pub kind: TreeEntryKind,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<RawTreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct RawTreeEntry {
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
}

/// Client for repository tree listing and raw file retrieval
pub struct RepoClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl RepoClient {
    /// Create a new client from the GitHub section of the configuration
    pub fn new(config: &GithubConfig) -> Result<Self, RepoError> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| RepoError::RequestFailed(format!("Invalid API URL '{}': {}", config.api_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RepoError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.as_str().trim_end_matches('/').to_string(),
            token: config.resolve_token(),
        })
    }

    /// List the full recursive tree at the head of the default branch
    pub async fn list_tree(&self, repository: &str) -> Result<Vec<TreeEntry>, RepoError> {
        let default_branch = self.default_branch(repository).await?;
        debug!("Default branch of {} is {}", repository, default_branch);

        let branch: BranchResponse = self
            .get_json(&format!("{}/repos/{}/branches/{}", self.api_url, repository, default_branch))
            .await?;

        let tree: TreeResponse = self
            .get_json(&format!(
                "{}/repos/{}/git/trees/{}?recursive=1",
                self.api_url, repository, branch.commit.sha
            ))
            .await?;

        if tree.truncated {
            return Err(RepoError::UnexpectedResponse(format!(
                "Tree listing for {} was truncated by the API",
                repository
            )));
        }

        Ok(tree
            .tree
            .into_iter()
            .filter_map(|entry| {
                let kind = match entry.entry_type.as_str() {
                    "tree" => TreeEntryKind::Directory,
                    "blob" => TreeEntryKind::File,
                    // Submodule commits and the like are not docs material
                    _ => return None,
                };
                Some(TreeEntry { path: entry.path, kind })
            })
            .collect())
    }

    /// Fetch the decoded UTF-8 content of a single file
    pub async fn get_file(&self, repository: &str, file_path: &str) -> Result<String, RepoError> {
        let url = format!("{}/repos/{}/contents/{}", self.api_url, repository, file_path);

        // The raw media type skips the base64 envelope of the contents API
        let response = self
            .request(&url)
            .header(header::ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await
            .map_err(|e| RepoError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .text()
            .await
            .map_err(|e| RepoError::UnexpectedResponse(format!("Non-text content at {}: {}", file_path, e)))
    }

    /// Resolve the default branch name of a repository
    async fn default_branch(&self, repository: &str) -> Result<String, RepoError> {
        let repo: RepositoryResponse = self
            .get_json(&format!("{}/repos/{}", self.api_url, repository))
            .await?;
        Ok(repo.default_branch)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, RepoError> {
        let response = self
            .request(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| RepoError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RepoError::UnexpectedResponse(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RepoError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RepoError::ApiError {
                status_code: status.as_u16(),
                message: format!("{} (check the GitHub token)", message),
            });
        }

        Err(RepoError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}
