/*!
 * Tests for the per-run pipeline state and its retain policy
 */

use mdxlate::pipeline::{DocFile, RunState};

fn file_with_content(path: &str, content: &str) -> DocFile {
    let mut file = DocFile::new(path);
    file.original_content = Some(content.to_string());
    file
}

/// Suffix filters retain exactly the paths ending with a filter entry
#[test]
fn test_retain_candidates_withSuffixFilter_shouldKeepMatchingPaths() {
    let mut state = RunState::new("acme/widgets", vec![".md".to_string()], "run");
    state.retain_candidates(vec![
        DocFile::new("a/x.md"),
        DocFile::new("a/y.mdx"),
        DocFile::new("b/z.md"),
    ]);

    let paths: Vec<&str> = state.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a/x.md", "b/z.md"]);
}

/// A filtered run keeps files even when they already carry content
#[test]
fn test_retain_candidates_withSuffixFilter_shouldIgnoreExistingContent() {
    let mut state = RunState::new("acme/widgets", vec![".md".to_string()], "run");
    state.retain_candidates(vec![file_with_content("a/x.md", "done")]);

    assert_eq!(state.files.len(), 1);
}

/// Without a filter, files that already have content are treated as done
#[test]
fn test_retain_candidates_withEmptyFilter_shouldDropFilesWithContent() {
    let mut state = RunState::new("acme/widgets", Vec::new(), "run");
    state.retain_candidates(vec![
        file_with_content("docs/done.md", "already fetched"),
        DocFile::new("docs/pending.md"),
    ]);

    let paths: Vec<&str> = state.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["docs/pending.md"]);
}

/// Duplicate paths keep their first occurrence, preserving order
#[test]
fn test_retain_candidates_withDuplicatePaths_shouldKeepFirstOccurrence() {
    let mut state = RunState::new("acme/widgets", Vec::new(), "run");
    state.retain_candidates(vec![
        DocFile::new("docs/a.md"),
        DocFile::new("docs/b.md"),
        DocFile::new("docs/a.md"),
    ]);

    let paths: Vec<&str> = state.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["docs/a.md", "docs/b.md"]);
}

/// Pending selectors only pick files still missing the stage's output
#[test]
fn test_pending_indices_shouldReflectPerFileProgress() {
    let mut state = RunState::new("acme/widgets", vec![".md".to_string()], "run");
    state.retain_candidates(vec![
        file_with_content("docs/a.md", "content a"),
        DocFile::new("docs/b.md"),
    ]);
    state.files[0].translated_content = Some("translated a".to_string());

    assert_eq!(state.pending_fetch_indices(), vec![1]);
    assert_eq!(state.pending_translation_indices(), vec![1]);
    assert_eq!(state.all_indices(), vec![0, 1]);
}

/// A fresh state starts with no docs root and no files
#[test]
fn test_new_state_shouldStartEmpty() {
    let state = RunState::new("acme/widgets", Vec::new(), "run-1");

    assert_eq!(state.repository, "acme/widgets");
    assert_eq!(state.run_id, "run-1");
    assert!(state.docs_root.is_none());
    assert!(state.files.is_empty());
    assert!(state.pending_fetch_indices().is_empty());
}
