use anyhow::{Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{info, warn};
use std::future::Future;
use std::sync::Arc;

use crate::agents::{
    AgentService, ContentFetcher, DocsDeveloper, DocsEnumerator, DocsLocator, DocsTranslator,
    Reviewer, Translator,
};
use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::pipeline::{BatchPacing, BatchRunner, RunState};
use crate::repo_client::RepoClient;
use crate::validation::LengthValidator;

// @module: Workflow controller for the docs translation pipeline

/// Main application controller driving the pipeline stages
///
/// The stages run strictly in order, each gated on full completion of the
/// previous one: locate docs root, enumerate files, fetch content, translate,
/// optionally review, persist. The capabilities are injected trait objects so
/// the whole state machine is testable without any network.
pub struct Controller {
    // @field: App configuration
    config: Config,
    pacing: BatchPacing,
    locator: Arc<dyn DocsLocator>,
    enumerator: Arc<dyn DocsEnumerator>,
    fetcher: Arc<dyn ContentFetcher>,
    translator: Arc<dyn Translator>,
    reviewer: Arc<dyn Reviewer>,
}

impl Controller {
    // @method: Create a controller with production capabilities from config
    pub fn with_config(config: Config) -> Result<Self> {
        let repo_client = Arc::new(RepoClient::new(&config.github)?);
        let service = Arc::new(AgentService::new(config.translation.clone())?);

        let docs_developer = Arc::new(DocsDeveloper::new(
            repo_client,
            service.clone(),
            config.docs_root.clone(),
        ));

        let language_name = language_utils::get_language_name(&config.target_language)?;
        let translator = Arc::new(DocsTranslator::new(
            service,
            config.target_language.clone(),
            language_name,
            config.translation.common.preserved_terms.clone(),
            LengthValidator::new(
                config.translation.common.min_length_ratio,
                config.translation.common.max_length_ratio,
            ),
        ));

        let pacing = BatchPacing::new(
            config.pipeline.batch_size,
            std::time::Duration::from_secs(config.pipeline.batch_delay_secs),
        );

        Ok(Self {
            config,
            pacing,
            locator: docs_developer.clone(),
            enumerator: docs_developer.clone(),
            fetcher: docs_developer,
            translator: translator.clone(),
            reviewer: translator,
        })
    }

    /// Create a controller with explicitly injected capabilities
    pub fn with_capabilities(
        config: Config,
        pacing: BatchPacing,
        locator: Arc<dyn DocsLocator>,
        enumerator: Arc<dyn DocsEnumerator>,
        fetcher: Arc<dyn ContentFetcher>,
        translator: Arc<dyn Translator>,
        reviewer: Arc<dyn Reviewer>,
    ) -> Self {
        Self {
            config,
            pacing,
            locator,
            enumerator,
            fetcher,
            translator,
            reviewer,
        }
    }

    /// Run the full pipeline for one repository
    pub async fn run(&self, run_id: &str) -> Result<()> {
        let start_time = std::time::Instant::now();
        let multi_progress = MultiProgress::new();

        info!(
            "🚀 mdxlate: {} -> {} (run {})",
            self.config.repository, self.config.target_language, run_id
        );

        let mut state = RunState::new(
            self.config.repository.clone(),
            self.config.path_filter.clone(),
            run_id,
        );

        self.locate_docs_root(&mut state).await?;
        self.enumerate_files(&mut state).await?;

        if state.files.is_empty() {
            warn!("No documentation files retained, nothing to do");
            return Ok(());
        }

        self.fetch_content(&mut state, &multi_progress).await?;
        self.translate_files(&mut state, &multi_progress).await?;

        if self.config.pipeline.review {
            self.review_files(&mut state, &multi_progress).await?;
        }

        let written = self.persist_files(&state)?;

        info!(
            "Translated {} files in {}",
            written,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Stage 1: resolve the docs root, fatal when none can be determined
    async fn locate_docs_root(&self, state: &mut RunState) -> Result<()> {
        let docs_root = self.locator.locate_docs_root(&state.repository).await?;
        info!("Docs root: {}", docs_root);
        state.docs_root = Some(docs_root);
        Ok(())
    }

    /// Stage 2: enumerate candidates and apply the retain policy
    async fn enumerate_files(&self, state: &mut RunState) -> Result<()> {
        let docs_root = state
            .docs_root
            .clone()
            .ok_or_else(|| anyhow!("Docs root was not resolved before enumeration"))?;

        let candidates = self.enumerator.enumerate_files(&state.repository, &docs_root).await?;
        let candidate_count = candidates.len();
        state.retain_candidates(candidates);

        info!(
            "Enumerated {} docs files, retained {} for this run",
            candidate_count,
            state.files.len()
        );
        Ok(())
    }

    /// Stage 3: fetch original content for files that do not have it yet
    async fn fetch_content(&self, state: &mut RunState, multi_progress: &MultiProgress) -> Result<()> {
        let pending = state.pending_fetch_indices();
        if pending.is_empty() {
            info!("All files already carry content, skipping fetch");
            return Ok(());
        }

        let items: Vec<(usize, String)> = pending
            .into_iter()
            .map(|idx| (idx, state.files[idx].path.clone()))
            .collect();

        let repository = state.repository.clone();
        let fetcher = self.fetcher.clone();

        let results = self
            .run_batched_stage("fetch_content", multi_progress, items, move |(idx, path)| {
                let fetcher = fetcher.clone();
                let repository = repository.clone();
                async move {
                    let content = fetcher.fetch_content(&repository, &path).await?;
                    Ok((idx, content))
                }
            })
            .await?;

        for (idx, content) in results {
            state.files[idx].original_content = Some(content);
        }
        Ok(())
    }

    /// Stage 4: translate files that do not have a translation yet
    async fn translate_files(&self, state: &mut RunState, multi_progress: &MultiProgress) -> Result<()> {
        let pending = state.pending_translation_indices();
        if pending.is_empty() {
            info!("All files already translated, skipping translation");
            return Ok(());
        }

        let items = Self::content_items(state, &pending)?;
        let translator = self.translator.clone();

        let results = self
            .run_batched_stage(
                "translate_files",
                multi_progress,
                items,
                move |(idx, path, content)| {
                    let translator = translator.clone();
                    async move {
                        let translated = translator.translate(&path, &content).await?;
                        Ok((idx, translated))
                    }
                },
            )
            .await?;

        for (idx, translated) in results {
            state.files[idx].translated_content = Some(translated);
        }
        Ok(())
    }

    /// Stage 5 (optional): review every file, replacing its translation
    async fn review_files(&self, state: &mut RunState, multi_progress: &MultiProgress) -> Result<()> {
        let indices = state.all_indices();
        let mut items = Vec::with_capacity(indices.len());
        for idx in indices {
            let file = &state.files[idx];
            let original = Self::require_content(file.original_content.as_deref(), &file.path)?;
            let translated = file
                .translated_content
                .clone()
                .ok_or_else(|| anyhow!("File '{}' reached the review stage untranslated", file.path))?;
            items.push((idx, file.path.clone(), original.to_string(), translated));
        }

        let reviewer = self.reviewer.clone();

        let results = self
            .run_batched_stage(
                "review_files",
                multi_progress,
                items,
                move |(idx, path, original, translated)| {
                    let reviewer = reviewer.clone();
                    async move {
                        let reviewed = reviewer.review(&path, &original, &translated).await?;
                        Ok((idx, reviewed))
                    }
                },
            )
            .await?;

        for (idx, reviewed) in results {
            state.files[idx].translated_content = Some(reviewed);
        }
        Ok(())
    }

    /// Stage 6: write every translation under `<output_dir>/<run_id>/<path>`
    fn persist_files(&self, state: &RunState) -> Result<usize> {
        let mut written = 0;
        for file in &state.files {
            let translated = file.translated_content.as_deref().ok_or_else(|| {
                PipelineError::MissingTranslation {
                    path: file.path.clone(),
                }
            })?;

            let output_path = FileManager::run_output_path(&self.config.output_dir, &state.run_id, &file.path);
            FileManager::write_to_file(&output_path, translated)?;
            written += 1;
        }

        info!(
            "Output written to {}",
            FileManager::run_output_path(&self.config.output_dir, &state.run_id, "").display()
        );
        Ok(written)
    }

    /// Run one batched stage with a progress bar tracking completed batches
    async fn run_batched_stage<T, R, F, Fut>(
        &self,
        stage: &str,
        multi_progress: &MultiProgress,
        items: Vec<T>,
        op: F,
    ) -> Result<Vec<R>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let runner = BatchRunner::new(self.pacing.clone());
        let total_batches = self.pacing.batch_count(items.len()) as u64;

        let progress_bar = multi_progress.add(ProgressBar::new(total_batches));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message(stage.to_string());

        let pb = progress_bar.clone();
        let results = runner
            .run(stage, items, op, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();
        results
    }

    /// Collect (index, path, original content) triples for a batched stage
    fn content_items(state: &RunState, indices: &[usize]) -> Result<Vec<(usize, String, String)>> {
        indices
            .iter()
            .map(|&idx| {
                let file = &state.files[idx];
                let content = Self::require_content(file.original_content.as_deref(), &file.path)?;
                Ok((idx, file.path.clone(), content.to_string()))
            })
            .collect()
    }

    fn require_content<'a>(content: Option<&'a str>, path: &str) -> Result<&'a str> {
        content.ok_or_else(|| anyhow!("File '{}' has no original content, fetch stage did not complete", path))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
