// ABOUTME: CompletionService - the single "submit prompt, get text" operation,
// ABOUTME: paced by the RateGovernor it owns.

use std::sync::Arc;

use super::{GeminiClient, LlmClient, Request};
use crate::config::AgentConfig;
use crate::error::{GovernorError, LlmError};
use crate::throttle::RateGovernor;

/// Prompt-to-text service over an [`LlmClient`], throttled by its own governor.
///
/// A service built without a client (no API key) still exists so that the
/// document-only features keep working; its completions fail with
/// `LlmError::Configuration`.
pub struct CompletionService {
    client: Option<Arc<dyn LlmClient>>,
    model: String,
    governor: RateGovernor,
}

impl CompletionService {
    /// Create a service over `client`, allowing `max_per_minute` requests.
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        max_per_minute: f64,
    ) -> Result<Self, GovernorError> {
        Ok(Self {
            client: Some(client),
            model: model.into(),
            governor: RateGovernor::new(max_per_minute)?,
        })
    }

    /// Create a service with AI disabled.
    pub fn disabled(model: impl Into<String>) -> Self {
        Self {
            client: None,
            model: model.into(),
            governor: RateGovernor::unlimited(),
        }
    }

    /// Build the Gemini-backed service described by `config`.
    ///
    /// A missing API key yields a disabled service rather than an error.
    pub fn from_config(config: &AgentConfig) -> Result<Self, GovernorError> {
        let Some(api_key) = config.api_key.as_deref() else {
            tracing::warn!("no API key configured; AI features are disabled");
            return Ok(Self::disabled(&config.model));
        };

        let mut client = GeminiClient::new(api_key);
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url);
        }
        tracing::info!(model = %config.model, rate = config.max_per_minute, "Gemini client ready");

        Self::new(Arc::new(client), &config.model, config.max_per_minute)
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn governor(&self) -> &RateGovernor {
        &self.governor
    }

    /// Send `prompt` and return the generated text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let client = self.client.as_ref().ok_or_else(|| {
            LlmError::Configuration("API key not configured".to_string())
        })?;

        let request = Request::prompt(&self.model, prompt);
        let response = self
            .governor
            .run(|| async { client.create_message(&request).await })
            .await?;

        let text = response.text();
        if text.trim().is_empty() {
            tracing::warn!(stop_reason = ?response.stop_reason, "model returned no text");
            return Err(LlmError::EmptyResponse);
        }

        tracing::info!(chars = text.chars().count(), "model responded");
        Ok(text)
    }

    /// Ask a question, optionally prefixed with context.
    pub async fn ask(&self, question: &str, context: Option<&str>) -> Result<String, LlmError> {
        self.complete(&compose_question(question, context)).await
    }
}

fn compose_question(question: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !context.trim().is_empty() => {
            format!("Context: {context}\n\nQuestion: {question}")
        }
        _ => question.to_string(),
    }
}
