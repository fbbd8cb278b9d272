use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for target-language tag handling
///
/// This module provides functions for validating BCP-47-like tags such as
/// "pt-BR" or plain ISO 639-1/639-3 codes, and for resolving human-readable
/// language names used in prompts and logs.
/// Split a tag into its primary language subtag and optional region subtag
pub fn split_language_tag(tag: &str) -> (String, Option<String>) {
    let trimmed = tag.trim();
    match trimmed.split_once(['-', '_']) {
        Some((primary, region)) => (
            primary.to_lowercase(),
            Some(region.to_uppercase()).filter(|r| !r.is_empty()),
        ),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Resolve the primary subtag of a language tag to an isolang Language
pub fn resolve_language(tag: &str) -> Result<Language> {
    let (primary, _region) = split_language_tag(tag);

    if primary.len() == 2 {
        if let Some(lang) = Language::from_639_1(&primary) {
            return Ok(lang);
        }
    } else if primary.len() == 3 {
        if let Some(lang) = Language::from_639_3(&primary) {
            return Ok(lang);
        }
    }

    Err(anyhow!("Invalid language tag: {}", tag))
}

/// Validate a language tag, returning an error for unknown primary subtags
pub fn validate_language_tag(tag: &str) -> Result<()> {
    resolve_language(tag).map(|_| ())
}

/// Get the English display name for a language tag, keeping the region
///
/// "pt-BR" becomes "Portuguese (BR)"; a plain "fr" becomes "French".
pub fn get_language_name(tag: &str) -> Result<String> {
    let lang = resolve_language(tag)?;
    let (_primary, region) = split_language_tag(tag);

    match region {
        Some(region) => Ok(format!("{} ({})", lang.to_name(), region)),
        None => Ok(lang.to_name().to_string()),
    }
}

/// Check if two language tags refer to the same primary language
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    match (resolve_language(tag1), resolve_language(tag2)) {
        (Ok(lang1), Ok(lang2)) => lang1 == lang2,
        _ => false,
    }
}
