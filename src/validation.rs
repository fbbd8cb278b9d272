/*!
 * Length-parity validation for translations.
 *
 * A translation that is drastically shorter or longer than its source
 * usually means dropped sections or model chatter around the payload. The
 * check only warns; translation quality scoring is out of scope.
 */

use std::fmt;

/// A detected length-parity violation
#[derive(Debug, Clone, PartialEq)]
pub struct LengthIssue {
    /// Source length in characters
    pub source_len: usize,
    /// Translated length in characters
    pub translated_len: usize,
    /// Observed translated/source ratio
    pub ratio: f32,
}

impl fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translated length {} vs source length {} (ratio {:.2})",
            self.translated_len, self.source_len, self.ratio
        )
    }
}

/// Checks translated length against a ratio band around the source length
#[derive(Debug, Clone)]
pub struct LengthValidator {
    min_ratio: f32,
    max_ratio: f32,
}

impl LengthValidator {
    /// Create a validator for the given ratio band
    pub fn new(min_ratio: f32, max_ratio: f32) -> Self {
        Self { min_ratio, max_ratio }
    }

    /// Return an issue when the translated length falls outside the band.
    /// Empty sources are never flagged.
    pub fn check(&self, source: &str, translated: &str) -> Option<LengthIssue> {
        let source_len = source.chars().count();
        if source_len == 0 {
            return None;
        }

        let translated_len = translated.chars().count();
        let ratio = translated_len as f32 / source_len as f32;

        if ratio < self.min_ratio || ratio > self.max_ratio {
            return Some(LengthIssue {
                source_len,
                translated_len,
                ratio,
            });
        }

        None
    }
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self::new(0.6, 1.6)
    }
}
