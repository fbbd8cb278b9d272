/*!
 * Capability seams for the pipeline stages.
 *
 * Every decision the pipeline delegates to an external brain (where do the
 * docs live, which files are docs, what does a file contain, how does it read
 * in the target language) goes through one of these traits. The controller
 * only ever sees the traits, so tests drive it with deterministic stubs while
 * production wires up the LLM-backed implementations below.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::pipeline::DocFile;

/// Proposes the documentation root directory of a repository
#[async_trait]
pub trait DocsLocator: Send + Sync {
    /// Return the repository-relative docs root path
    async fn locate_docs_root(&self, repository: &str) -> Result<String>;
}

/// Enumerates the documentation files under a docs root
#[async_trait]
pub trait DocsEnumerator: Send + Sync {
    /// Return the count-verified list of docs files, content fields empty
    async fn enumerate_files(&self, repository: &str, docs_root: &str) -> Result<Vec<DocFile>>;
}

/// Retrieves the raw text of one file at a time
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Return the decoded UTF-8 content of the file
    async fn fetch_content(&self, repository: &str, path: &str) -> Result<String>;
}

/// Translates one file's content into the run's target language
#[async_trait]
pub trait Translator: Send + Sync {
    /// Return the translated content
    async fn translate(&self, path: &str, content: &str) -> Result<String>;
}

/// Re-validates and improves a prior translation
#[async_trait]
pub trait Reviewer: Send + Sync {
    /// Return the reviewed translation, replacing the previous one
    async fn review(&self, path: &str, original: &str, translated: &str) -> Result<String>;
}

/// Parse a structured JSON reply from a model, tolerating a markdown fence
/// around the payload.
pub(crate) fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let trimmed = reply.trim();

    let body = if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        rest.trim_start_matches(['\r', '\n'])
            .strip_suffix("```")
            .unwrap_or(rest)
            .trim()
    } else {
        trimmed
    };

    serde_json::from_str(body).map_err(|e| anyhow!("Malformed structured reply: {} (reply was: {})", e, reply))
}

pub mod docs_developer;
pub mod service;
pub mod translator;

pub use docs_developer::DocsDeveloper;
pub use service::AgentService;
pub use translator::DocsTranslator;
