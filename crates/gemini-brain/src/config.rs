//! Configuration for GeminiBrain.

use brain_core::BrainError;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for GeminiBrain.
#[derive(Debug, Clone)]
pub struct GeminiBrainConfig {
    /// Base URL of the Generative Language API.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system instruction sent with every request.
    pub system_prompt: Option<String>,

    /// Maximum tokens for the response.
    pub max_output_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GeminiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_output_tokens: Some(1024),
            temperature: Some(0.1),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeminiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.0-flash)
    /// - `GEMINI_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `GEMINI_PROMPT_FILE` - Path to system prompt file (default: SYSTEM_PROMPT.md)
    /// - `GEMINI_MAX_OUTPUT_TOKENS` - Max tokens (default: 1024)
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.1)
    /// - `GEMINI_TIMEOUT_SECS` - Request timeout (default: 30)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| BrainError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        // System prompt: env var takes precedence, then try loading from file
        let system_prompt = if let Ok(prompt) = env::var("GEMINI_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file = env::var("GEMINI_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_output_tokens = env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.1));

        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_output_tokens,
            temperature,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiBrainConfigBuilder {
        GeminiBrainConfigBuilder::default()
    }

    /// Full URL of the generateContent endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Builder for GeminiBrainConfig.
#[derive(Debug, Default)]
pub struct GeminiBrainConfigBuilder {
    config: GeminiBrainConfig,
}

impl GeminiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max output tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiBrainConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiBrainConfig::default();

        assert_eq!(config.api_url, "https://generativelanguage.googleapis.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.1));
    }

    #[test]
    fn test_builder_all_options() {
        let config = GeminiBrainConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com/")
            .model("gemini-pro")
            .system_prompt("Be brief")
            .max_output_tokens(256)
            .temperature(0.0)
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.system_prompt.as_deref(), Some("Be brief"));
        assert_eq!(config.max_output_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.0));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint(),
            "https://custom.api.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    // Env vars are process-global, so every scenario runs inside one test.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            for key in [
                "GEMINI_API_KEY",
                "GEMINI_API_URL",
                "GEMINI_MODEL",
                "GEMINI_SYSTEM_PROMPT",
                "GEMINI_PROMPT_FILE",
                "GEMINI_MAX_OUTPUT_TOKENS",
                "GEMINI_TEMPERATURE",
                "GEMINI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(key);
            }
        }

        // Missing API key
        clear_all_gemini_vars();
        match GeminiBrainConfig::from_env() {
            Err(BrainError::Configuration(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "test-env-key");
        std::env::set_var("GEMINI_PROMPT_FILE", "/nonexistent/prompt.md");
        let config = GeminiBrainConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.1));

        // Overrides
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "k");
        std::env::set_var("GEMINI_MODEL", "gemini-1.5-pro");
        std::env::set_var("GEMINI_SYSTEM_PROMPT", "Answer tersely");
        std::env::set_var("GEMINI_MAX_OUTPUT_TOKENS", "512");
        std::env::set_var("GEMINI_TEMPERATURE", "0.3");
        std::env::set_var("GEMINI_TIMEOUT_SECS", "7");
        let config = GeminiBrainConfig::from_env().unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.system_prompt.as_deref(), Some("Answer tersely"));
        assert_eq!(config.max_output_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.timeout, Duration::from_secs(7));

        clear_all_gemini_vars();
    }
}
