/*!
 * End-to-end workflow tests driving the controller with stub capabilities
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use mdxlate::app_config::Config;
use mdxlate::app_controller::Controller;
use mdxlate::pipeline::{BatchPacing, DocFile};

use crate::common;
use crate::common::stub_agents::{
    CountingFetcher, FailingTranslator, StubCapabilities, StubEnumerator, StubLocator,
    StubReviewer, StubTranslator,
};

fn test_config(output_dir: &str, review: bool) -> Config {
    let mut config = Config::default();
    config.repository = "acme/widgets".to_string();
    config.output_dir = output_dir.to_string();
    config.pipeline.review = review;
    config
}

fn controller_with(config: Config, stubs: &StubCapabilities) -> Controller {
    Controller::with_capabilities(
        config,
        BatchPacing::unthrottled(10),
        stubs.locator.clone(),
        stubs.enumerator.clone(),
        stubs.fetcher.clone(),
        stubs.translator.clone(),
        stubs.reviewer.clone(),
    )
}

/// The §-scenario: a docs root with two markdown files and a non-doc file
/// yields exactly two translated files mirroring the repository paths.
#[tokio::test]
async fn test_run_withTwoDocsFiles_shouldPersistTranslations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    // docs/image.png never makes it out of enumeration
    let stubs = StubCapabilities::new(
        "docs",
        vec![DocFile::new("docs/intro.md"), DocFile::new("docs/guide.mdx")],
        &[
            ("docs/intro.md", "# Intro\nWelcome."),
            ("docs/guide.mdx", "# Guide\nDetails."),
        ],
    );

    let controller = controller_with(test_config(&output_dir, false), &stubs);
    controller.run("run-1").await?;

    let intro = fs::read_to_string(temp_dir.path().join("run-1/docs/intro.md"))?;
    let guide = fs::read_to_string(temp_dir.path().join("run-1/docs/guide.mdx"))?;

    assert_eq!(intro, "[pt-BR] # Intro\nWelcome.");
    assert_eq!(guide, "[pt-BR] # Guide\nDetails.");
    assert_ne!(intro, "# Intro\nWelcome.");

    // Exactly the two enumerated files exist under the run directory
    let run_docs = temp_dir.path().join("run-1/docs");
    assert_eq!(fs::read_dir(&run_docs)?.count(), 2);

    // Review was disabled, so the reviewer never ran
    assert_eq!(stubs.reviewer.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

/// Files that already carry original content are not fetched again
#[tokio::test]
async fn test_run_withPrefetchedFile_shouldSkipItsFetch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let mut prefetched = DocFile::new("docs/done.md");
    prefetched.original_content = Some("# Done".to_string());

    // The suffix filter keeps the pre-seeded file in the retained set
    let mut config = test_config(&output_dir, false);
    config.path_filter = vec![".md".to_string()];

    let stubs = StubCapabilities::new(
        "docs",
        vec![prefetched, DocFile::new("docs/pending.md")],
        &[("docs/pending.md", "# Pending")],
    );

    let controller = controller_with(config, &stubs);
    controller.run("run-1").await?;

    let fetched = stubs.fetcher.fetched_paths.lock().unwrap().clone();
    assert_eq!(fetched, vec!["docs/pending.md"]);

    // Both files still get translated and persisted
    assert_eq!(stubs.translator.calls.load(Ordering::SeqCst), 2);
    assert!(temp_dir.path().join("run-1/docs/done.md").exists());
    assert!(temp_dir.path().join("run-1/docs/pending.md").exists());
    Ok(())
}

/// With no filter, a candidate already carrying content is excluded entirely
#[tokio::test]
async fn test_run_withEmptyFilter_shouldDropCompletedCandidates() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let mut completed = DocFile::new("docs/done.md");
    completed.original_content = Some("# Done".to_string());

    let stubs = StubCapabilities::new(
        "docs",
        vec![completed, DocFile::new("docs/pending.md")],
        &[("docs/pending.md", "# Pending")],
    );

    let controller = controller_with(test_config(&output_dir, false), &stubs);
    controller.run("run-1").await?;

    assert_eq!(stubs.fetcher.call_count(), 1);
    assert_eq!(stubs.translator.calls.load(Ordering::SeqCst), 1);
    assert!(!temp_dir.path().join("run-1/docs/done.md").exists());
    assert!(temp_dir.path().join("run-1/docs/pending.md").exists());
    Ok(())
}

/// The review stage runs for every file and its output replaces the translation
#[tokio::test]
async fn test_run_withReviewEnabled_shouldReviewEveryFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let stubs = StubCapabilities::new(
        "docs",
        vec![DocFile::new("docs/intro.md"), DocFile::new("docs/guide.mdx")],
        &[
            ("docs/intro.md", "# Intro"),
            ("docs/guide.mdx", "# Guide"),
        ],
    );

    let controller = controller_with(test_config(&output_dir, true), &stubs);
    controller.run("run-1").await?;

    assert_eq!(stubs.reviewer.calls.load(Ordering::SeqCst), 2);

    let intro = fs::read_to_string(temp_dir.path().join("run-1/docs/intro.md"))?;
    assert_eq!(intro, "[reviewed] [pt-BR] # Intro");
    Ok(())
}

/// A failing locator aborts the run before any file work begins
#[tokio::test]
async fn test_run_withUnresolvableDocsRoot_shouldAbortEarly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let fetcher = Arc::new(CountingFetcher::new(&[]));
    let controller = Controller::with_capabilities(
        test_config(&output_dir, false),
        BatchPacing::unthrottled(10),
        Arc::new(StubLocator::not_found()),
        Arc::new(StubEnumerator::new(vec![DocFile::new("docs/a.md")])),
        fetcher.clone(),
        Arc::new(StubTranslator::new()),
        Arc::new(StubReviewer::new()),
    );

    let result = controller.run("run-1").await;

    assert!(result.is_err());
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

/// One failed translation aborts the run and nothing is persisted
#[tokio::test]
async fn test_run_withFailingTranslation_shouldAbortWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let controller = Controller::with_capabilities(
        test_config(&output_dir, false),
        BatchPacing::unthrottled(10),
        Arc::new(StubLocator::found("docs")),
        Arc::new(StubEnumerator::new(vec![
            DocFile::new("docs/good.md"),
            DocFile::new("docs/bad.md"),
        ])),
        Arc::new(CountingFetcher::new(&[
            ("docs/good.md", "# Good"),
            ("docs/bad.md", "# Bad"),
        ])),
        Arc::new(FailingTranslator::new("docs/bad.md")),
        Arc::new(StubReviewer::new()),
    );

    let result = controller.run("run-1").await;

    assert!(result.is_err());
    // Fail-fast: the persist stage never ran
    assert!(!temp_dir.path().join("run-1").exists());
    Ok(())
}

/// An empty retained set completes without touching later stages
#[tokio::test]
async fn test_run_withNoRetainedFiles_shouldFinishWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_string_lossy().to_string();

    let stubs = StubCapabilities::new("docs", Vec::new(), &[]);
    let controller = controller_with(test_config(&output_dir, false), &stubs);

    controller.run("run-1").await?;

    assert_eq!(stubs.fetcher.call_count(), 0);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}
