/*!
 * Provider dispatch for agent completions.
 *
 * The agents express their work as a (system, user) prompt pair; this
 * service routes the pair to whichever provider the configuration selects
 * and hands back the reply text.
 */

use anyhow::{Result, anyhow};

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Upper bound for Anthropic generations, generous enough for long docs pages
const ANTHROPIC_MAX_TOKENS: u32 = 8192;

/// Routes agent prompts to the configured LLM provider
#[derive(Debug, Clone)]
pub struct AgentService {
    config: TranslationConfig,
}

impl AgentService {
    /// Create a new service from the translation configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        match config.provider {
            TranslationProvider::OpenAI | TranslationProvider::Anthropic => {
                if config.get_api_key().is_empty() {
                    return Err(anyhow!(
                        "API key is required for the {} provider",
                        config.provider.display_name()
                    ));
                }
            }
            TranslationProvider::Ollama => {}
        }
        Ok(Self { config })
    }

    /// The provider currently selected
    pub fn provider(&self) -> &TranslationProvider {
        &self.config.provider
    }

    /// The model the selected provider will use
    pub fn model(&self) -> String {
        self.config.get_model()
    }

    /// Complete a prompt pair and return the reply text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let model = self.config.get_model();
        let endpoint = self.config.get_endpoint();
        let timeout_secs = self.config.get_timeout_secs();
        let temperature = self.config.common.temperature;

        match self.config.provider {
            TranslationProvider::Ollama => {
                let client = Ollama::new(endpoint, timeout_secs);
                let request = ChatRequest::new(model)
                    .add_message("system", system)
                    .add_message("user", user)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            TranslationProvider::OpenAI => {
                let client = OpenAI::new(self.config.get_api_key(), endpoint, timeout_secs);
                let request = OpenAIRequest::new(model)
                    .add_message("system", system)
                    .add_message("user", user)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            TranslationProvider::Anthropic => {
                let client = Anthropic::new(self.config.get_api_key(), endpoint, timeout_secs);
                let request = AnthropicRequest::new(model, ANTHROPIC_MAX_TOKENS)
                    .system(system)
                    .add_message("user", user)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text(&response))
            }
        }
    }
}
