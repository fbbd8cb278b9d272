/*!
 * Per-run pipeline state.
 *
 * One `RunState` is built per invocation and threaded mutably through the
 * pipeline stages. It owns the ordered file list; batch numbering and output
 * layout both derive from that order.
 */

/// One documentation file tracked through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct DocFile {
    /// Repository-relative path, unique within a run
    pub path: String,

    /// Raw content in the source language; set once by the fetch stage
    pub original_content: Option<String>,

    /// Translated content; set by translate, may be replaced by review
    pub translated_content: Option<String>,
}

impl DocFile {
    /// Create a new file record with no content yet
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            original_content: None,
            translated_content: None,
        }
    }
}

/// Process-wide state for one pipeline execution
#[derive(Debug)]
pub struct RunState {
    /// Source repository, "owner/name", fixed for the run
    pub repository: String,

    /// Docs root directory, resolved by the locate stage
    pub docs_root: Option<String>,

    /// Ordered file set, unique by path; order defines batch numbering
    pub files: Vec<DocFile>,

    /// Path suffixes restricting the run; empty means all pending files
    pub path_filter: Vec<String>,

    /// Identifier namespacing the output directory
    pub run_id: String,
}

impl RunState {
    /// Create a fresh run state with an empty file set
    pub fn new(repository: impl Into<String>, path_filter: Vec<String>, run_id: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            docs_root: None,
            files: Vec::new(),
            path_filter,
            run_id: run_id.into(),
        }
    }

    /// Apply the retain policy to enumerated candidates and store the result.
    ///
    /// With a non-empty filter, a candidate survives when its path ends with
    /// any of the suffixes. With an empty filter, a candidate survives when
    /// it has no original content yet, so re-entry with pre-seeded files
    /// skips the ones that are already done. Duplicate paths keep the first
    /// occurrence so batch numbering stays deterministic.
    pub fn retain_candidates(&mut self, candidates: Vec<DocFile>) {
        let mut retained: Vec<DocFile> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let keep = if self.path_filter.is_empty() {
                candidate.original_content.is_none()
            } else {
                self.path_filter.iter().any(|suffix| candidate.path.ends_with(suffix))
            };

            if keep && !retained.iter().any(|f| f.path == candidate.path) {
                retained.push(candidate);
            }
        }

        self.files = retained;
    }

    /// Indices of files still waiting for their original content
    pub fn pending_fetch_indices(&self) -> Vec<usize> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.original_content.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of files still waiting for a translation
    pub fn pending_translation_indices(&self) -> Vec<usize> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.translated_content.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of every file in the run; the review stage never skips
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.files.len()).collect()
    }
}
