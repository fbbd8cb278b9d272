/*!
 * Translator agent: translates one docs file at a time and optionally
 * re-reviews a prior translation.
 *
 * The prompts carry the fixed translation rules: markdown/MDX syntax stays
 * intact, code blocks stay untranslated, the configured entity terms stay in
 * the source language, and nothing but the translated content is emitted.
 */

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::warn;

use crate::agents::{AgentService, Reviewer, Translator};
use crate::validation::LengthValidator;

const TRANSLATOR_SYSTEM_PROMPT: &str = "You are a translator with a strong software development \
background who specializes in technical documentation. You translate accurately while keeping \
every markup construct exactly as it was.";

/// LLM-backed translator and reviewer for docs files
pub struct DocsTranslator {
    service: Arc<AgentService>,
    /// Target language tag, e.g. "pt-BR"
    target_language: String,
    /// Human-readable language name used in prompts
    language_name: String,
    /// Entity terms that must stay untranslated
    preserved_terms: Vec<String>,
    /// Length-parity check applied to every result
    length_validator: LengthValidator,
}

impl DocsTranslator {
    /// Create a new translator agent
    pub fn new(
        service: Arc<AgentService>,
        target_language: impl Into<String>,
        language_name: impl Into<String>,
        preserved_terms: Vec<String>,
        length_validator: LengthValidator,
    ) -> Self {
        Self {
            service,
            target_language: target_language.into(),
            language_name: language_name.into(),
            preserved_terms,
            length_validator,
        }
    }

    fn translation_rules(&self) -> String {
        let terms = self
            .preserved_terms
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "IMPORTANT NOTES:\n\
             - Do not mess up the markdown/MDX syntax of the content.\n\
             - Do not translate any code blocks. Leave them in the file as-is.\n\
             - Do not translate any entity names like {}.\n\
             - Keep the translation close to the original length.\n\
             - Output only the translated content, no other text.",
            terms
        )
    }

    fn check_length(&self, path: &str, source: &str, translated: &str) {
        if let Some(issue) = self.length_validator.check(source, translated) {
            warn!("Length parity issue for {}: {}", path, issue);
        }
    }
}

#[async_trait]
impl Translator for DocsTranslator {
    async fn translate(&self, path: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Translate the content of the file. Make sure the translation is high-quality.\n\
             - File => \"{}\"\n\
             - Desired language => \"{}\" ({})\n\n\
             {}\n\n\
             File content:\n{}",
            path,
            self.target_language,
            self.language_name,
            self.translation_rules(),
            content,
        );

        let translated = self.service.complete(TRANSLATOR_SYSTEM_PROMPT, &prompt).await?;
        let translated = translated.trim().to_string();

        self.check_length(path, content, &translated);
        Ok(translated)
    }
}

#[async_trait]
impl Reviewer for DocsTranslator {
    async fn review(&self, path: &str, original: &str, translated: &str) -> Result<String> {
        let prompt = format!(
            "Review the translation of the file below and return an improved final version. \
             Fix mistranslations, restore any markup the translation damaged, and keep wording \
             that is already good.\n\
             - File => \"{}\"\n\
             - Desired language => \"{}\" ({})\n\n\
             {}\n\n\
             Original content:\n{}\n\n\
             Current translation:\n{}",
            path,
            self.target_language,
            self.language_name,
            self.translation_rules(),
            original,
            translated,
        );

        let reviewed = self.service.complete(TRANSLATOR_SYSTEM_PROMPT, &prompt).await?;
        let reviewed = reviewed.trim().to_string();

        self.check_length(path, original, &reviewed);
        Ok(reviewed)
    }
}
