// ABOUTME: Runtime configuration for the agent - API key, model and rate ceiling.
// ABOUTME: Read from the environment; the CLI layers its flags on top.

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_PER_MINUTE: f64 = 10.0;

/// Settings needed to build a [`CompletionService`](crate::llm::CompletionService).
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Gemini API key. `None` disables every AI-backed operation.
    pub api_key: Option<String>,
    pub model: String,
    /// Ceiling for completion requests per minute.
    pub max_per_minute: f64,
    /// Override for the Gemini endpoint, used by tests and proxies.
    pub base_url: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_per_minute: DEFAULT_MAX_PER_MINUTE,
            base_url: None,
        }
    }
}

impl AgentConfig {
    /// Build a config from the process environment.
    ///
    /// Reads `GOOGLE_API_KEY` (falling back to `GEMINI_API_KEY`),
    /// `OFFICE_AGENT_MODEL`, `OFFICE_AGENT_RATE` and `OFFICE_AGENT_BASE_URL`.
    /// Unset, empty or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_per_minute = match get("OFFICE_AGENT_RATE").map(|v| v.parse::<f64>()) {
            Some(Ok(rate)) => rate,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring unparsable OFFICE_AGENT_RATE");
                defaults.max_per_minute
            }
            None => defaults.max_per_minute,
        };

        Self {
            api_key: get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            model: get("OFFICE_AGENT_MODEL").unwrap_or(defaults.model),
            max_per_minute,
            base_url: get("OFFICE_AGENT_BASE_URL"),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the requests-per-minute ceiling.
    pub fn with_max_per_minute(mut self, max_per_minute: f64) -> Self {
        self.max_per_minute = max_per_minute;
        self
    }

    /// Set the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
