/*!
 * Docs developer agent: locates the docs root, enumerates docs files and
 * fetches their content.
 *
 * The locator is the judgment call and goes through the LLM: given the
 * repository's directory listing, the model picks the docs root. The
 * enumerator asks the model to confirm the markdown file list and then
 * verifies every returned path and the total count against the repository
 * tree, so a hallucinated or incomplete answer aborts the run. The fetcher
 * needs no judgment at all and reads straight from the hosting API.
 */

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::agents::{AgentService, ContentFetcher, DocsEnumerator, DocsLocator, parse_json_reply};
use crate::errors::PipelineError;
use crate::pipeline::DocFile;
use crate::repo_client::{RepoClient, TreeEntryKind};

/// Markdown-like extensions that count as documentation
const DOC_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

const LOCATOR_SYSTEM_PROMPT: &str = "You are a docs developer. You are the best in the field \
when it comes to identifying where documentation lives in a repository. Answer with JSON only.";

const ENUMERATOR_SYSTEM_PROMPT: &str = "You are a docs developer. You are the best in the field \
when it comes to identifying which files in a repository are documentation. Answer with JSON only.";

#[derive(Debug, Deserialize)]
struct LocateReply {
    docs_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnumerateReply {
    #[serde(default)]
    files: Vec<EnumeratedFile>,
}

#[derive(Debug, Deserialize)]
struct EnumeratedFile {
    path: String,
}

/// Check whether a path is a docs file under the given root
pub fn is_docs_file(path: &str, docs_root: &str) -> bool {
    path.starts_with(&format!("{}/", docs_root.trim_end_matches('/')))
        && DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// LLM-assisted locator, enumerator and fetcher over the hosting API
pub struct DocsDeveloper {
    repo_client: Arc<RepoClient>,
    service: Arc<AgentService>,
    /// Configured docs root used when the model cannot decide
    default_docs_root: String,
}

impl DocsDeveloper {
    /// Create a new docs developer agent
    pub fn new(repo_client: Arc<RepoClient>, service: Arc<AgentService>, default_docs_root: impl Into<String>) -> Self {
        Self {
            repo_client,
            service,
            default_docs_root: default_docs_root.into(),
        }
    }
}

#[async_trait]
impl DocsLocator for DocsDeveloper {
    async fn locate_docs_root(&self, repository: &str) -> Result<String> {
        let tree = self.repo_client.list_tree(repository).await?;

        let directories: Vec<&str> = tree
            .iter()
            .filter(|entry| entry.kind == TreeEntryKind::Directory)
            .map(|entry| entry.path.as_str())
            .collect();

        if directories.is_empty() {
            return Err(PipelineError::DocsRootNotFound(repository.to_string()).into());
        }

        let prompt = format!(
            "Identify the path to the documentation root directory of the repository \"{}\".\n\
             These are all the directories in the repository:\n{}\n\n\
             Respond with JSON of the form {{\"docs_dir\": \"<relative path>\"}}. \
             Use null when no directory holds the documentation.",
            repository,
            directories.join("\n"),
        );

        let reply = self.service.complete(LOCATOR_SYSTEM_PROMPT, &prompt).await?;
        let parsed: LocateReply = parse_json_reply(&reply)?;

        let known: HashSet<&str> = directories.iter().copied().collect();

        if let Some(docs_dir) = parsed.docs_dir {
            let docs_dir = docs_dir.trim_matches('/').to_string();
            if known.contains(docs_dir.as_str()) {
                info!("Docs root of {} resolved to '{}'", repository, docs_dir);
                return Ok(docs_dir);
            }
            warn!(
                "Locator proposed '{}' which is not a directory of {}, falling back",
                docs_dir, repository
            );
        }

        // Fall back to the configured default when it actually exists
        if known.contains(self.default_docs_root.as_str()) {
            info!(
                "Docs root of {} defaulted to '{}'",
                repository, self.default_docs_root
            );
            return Ok(self.default_docs_root.clone());
        }

        Err(PipelineError::DocsRootNotFound(repository.to_string()).into())
    }
}

#[async_trait]
impl DocsEnumerator for DocsDeveloper {
    async fn enumerate_files(&self, repository: &str, docs_root: &str) -> Result<Vec<DocFile>> {
        let tree = self.repo_client.list_tree(repository).await?;

        // The tree filter is the ground truth the model's answer is held to
        let candidates: Vec<&str> = tree
            .iter()
            .filter(|entry| entry.kind == TreeEntryKind::File && is_docs_file(&entry.path, docs_root))
            .map(|entry| entry.path.as_str())
            .collect();

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = format!(
            "List all the documentation files of the repository \"{}\" under the docs directory \"{}\".\n\
             These are the markdown files found in the repository tree:\n{}\n\n\
             Respond with JSON of the form {{\"files\": [{{\"path\": \"<relative path>\"}}]}}. \
             Make sure the number of files in your answer matches the number of files listed above.",
            repository,
            docs_root,
            candidates.join("\n"),
        );

        let reply = self.service.complete(ENUMERATOR_SYSTEM_PROMPT, &prompt).await?;
        let parsed: EnumerateReply = parse_json_reply(&reply)?;

        let candidate_set: HashSet<&str> = candidates.iter().copied().collect();
        let returned: HashSet<&str> = parsed
            .files
            .iter()
            .map(|f| f.path.as_str())
            .filter(|p| candidate_set.contains(p))
            .collect();

        if returned.len() != candidates.len() {
            return Err(PipelineError::EnumerationMismatch {
                expected: candidates.len(),
                reported: returned.len(),
            }
            .into());
        }

        debug!("Enumerated {} docs files under {}/{}", candidates.len(), repository, docs_root);

        // Tree order keeps batch numbering deterministic regardless of how
        // the model ordered its answer
        Ok(candidates.into_iter().map(DocFile::new).collect())
    }
}

#[async_trait]
impl ContentFetcher for DocsDeveloper {
    async fn fetch_content(&self, repository: &str, path: &str) -> Result<String> {
        let content = self.repo_client.get_file(repository, path).await?;
        debug!("Fetched {} ({} bytes)", path, content.len());
        Ok(content)
    }
}
