/*!
 * Error types for the mdxlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with LLM provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur when talking to the repository hosting API
#[derive(Error, Debug)]
pub enum RepoError {
    /// Error when making an API request fails
    #[error("GitHub request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the hosting API itself
    #[error("GitHub API error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when a response is missing an expected field
    #[error("Unexpected GitHub response: {0}")]
    UnexpectedResponse(String),
}

/// Errors raised by the translation pipeline itself
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The docs root directory could not be determined
    #[error("Could not determine docs root for repository '{0}'")]
    DocsRootNotFound(String),

    /// The enumerator returned a file list that disagrees with the repository tree
    #[error("Docs enumeration mismatch: expected {expected} files, enumerator returned {reported}")]
    EnumerationMismatch {
        /// Files matching the docs filter in the repository tree
        expected: usize,
        /// Files the enumerator actually returned
        reported: usize,
    },

    /// A file reached the persist stage without translated content
    #[error("No translated content for '{path}', an upstream stage did not complete")]
    MissingTranslation {
        /// Repository-relative path of the file
        path: String,
    },
}
