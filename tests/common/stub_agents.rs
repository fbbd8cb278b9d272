/*!
 * Deterministic stub implementations of the pipeline capabilities.
 *
 * These stand in for the LLM-backed agents so the workflow controller can be
 * exercised end-to-end without any network. Every stub counts its calls so
 * tests can assert skip/re-run behavior per stage.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use mdxlate::agents::{ContentFetcher, DocsEnumerator, DocsLocator, Reviewer, Translator};
use mdxlate::errors::PipelineError;
use mdxlate::pipeline::DocFile;

/// Locator returning a fixed docs root, or failing when none is configured
pub struct StubLocator {
    root: Option<String>,
    pub calls: AtomicUsize,
}

impl StubLocator {
    pub fn found(root: &str) -> Self {
        Self {
            root: Some(root.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            root: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocsLocator for StubLocator {
    async fn locate_docs_root(&self, repository: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.root
            .clone()
            .ok_or_else(|| PipelineError::DocsRootNotFound(repository.to_string()).into())
    }
}

/// Enumerator returning a fixed candidate list
pub struct StubEnumerator {
    candidates: Vec<DocFile>,
    pub calls: AtomicUsize,
}

impl StubEnumerator {
    pub fn new(candidates: Vec<DocFile>) -> Self {
        Self {
            candidates,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocsEnumerator for StubEnumerator {
    async fn enumerate_files(&self, _repository: &str, _docs_root: &str) -> Result<Vec<DocFile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.clone())
    }
}

/// Fetcher serving content from a map and recording every fetched path
pub struct CountingFetcher {
    contents: HashMap<String, String>,
    pub fetched_paths: Mutex<Vec<String>>,
}

impl CountingFetcher {
    pub fn new(contents: &[(&str, &str)]) -> Self {
        Self {
            contents: contents
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
            fetched_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.fetched_paths.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentFetcher for CountingFetcher {
    async fn fetch_content(&self, _repository: &str, path: &str) -> Result<String> {
        self.fetched_paths.lock().unwrap().push(path.to_string());
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("No stub content for '{}'", path))
    }
}

/// Translator prefixing content with a language marker
pub struct StubTranslator {
    pub calls: AtomicUsize,
}

impl StubTranslator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, _path: &str, content: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[pt-BR] {}", content))
    }
}

/// Translator failing for one specific path
pub struct FailingTranslator {
    fail_path: String,
    pub calls: AtomicUsize,
}

impl FailingTranslator {
    pub fn new(fail_path: &str) -> Self {
        Self {
            fail_path: fail_path.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, path: &str, content: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if path == self.fail_path {
            return Err(anyhow!("translation failed for '{}'", path));
        }
        Ok(format!("[pt-BR] {}", content))
    }
}

/// Reviewer wrapping the current translation, recording every call
pub struct StubReviewer {
    pub calls: AtomicUsize,
}

impl StubReviewer {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Reviewer for StubReviewer {
    async fn review(&self, _path: &str, _original: &str, translated: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[reviewed] {}", translated))
    }
}

/// Convenience bundle of working stubs shared by the workflow tests
pub struct StubCapabilities {
    pub locator: Arc<StubLocator>,
    pub enumerator: Arc<StubEnumerator>,
    pub fetcher: Arc<CountingFetcher>,
    pub translator: Arc<StubTranslator>,
    pub reviewer: Arc<StubReviewer>,
}

impl StubCapabilities {
    pub fn new(docs_root: &str, candidates: Vec<DocFile>, contents: &[(&str, &str)]) -> Self {
        Self {
            locator: Arc::new(StubLocator::found(docs_root)),
            enumerator: Arc::new(StubEnumerator::new(candidates)),
            fetcher: Arc::new(CountingFetcher::new(contents)),
            translator: Arc::new(StubTranslator::new()),
            reviewer: Arc::new(StubReviewer::new()),
        }
    }
}
