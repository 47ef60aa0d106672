//! GeminiBrain implementation using the Generative Language API.

use brain_core::{async_trait, hash_prompt, Brain, BrainError, HistoryMessage};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// A brain that completes prompts with Google's Gemini models.
///
/// The brain itself is stateless: conversation context arrives with each
/// call and is replayed as prior turns ahead of the new prompt.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
    system_prompt_hash: Option<String>,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let system_prompt_hash = config.system_prompt.as_deref().map(hash_prompt);
        if let Some(ref hash) = system_prompt_hash {
            info!("GeminiBrain system prompt fingerprint: {}", hash);
        }

        info!("GeminiBrain initialized with model: {}", config.model);

        Ok(Self {
            client,
            config,
            system_prompt_hash,
        })
    }

    /// Create a GeminiBrain from environment variables.
    ///
    /// See [`GeminiBrainConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(GeminiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    /// Get the system prompt fingerprint, if configured.
    pub fn system_prompt_hash(&self) -> Option<&str> {
        self.system_prompt_hash.as_deref()
    }

    /// Build the request body: history turns, then the new prompt.
    fn build_request(&self, prompt: &str, history: &[HistoryMessage]) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history.iter().map(Content::from_history).collect();
        contents.push(Content::user(prompt));

        GenerateContentRequest {
            contents,
            system_instruction: self.config.system_prompt.as_deref().map(Content::instruction),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BrainError> {
        let url = self.config.endpoint();
        debug!("Sending request to Gemini: {} turn(s)", request.contents.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);
            return Err(BrainError::from_status(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for GeminiBrain {
    async fn complete(
        &self,
        prompt: &str,
        history: &[HistoryMessage],
    ) -> Result<String, BrainError> {
        let request = self.build_request(prompt, history);
        let response = self.generate(&request).await?;

        if let Some(ref usage) = response.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());

        response.first_text().ok_or_else(|| {
            BrainError::ProcessingFailed(format!(
                "No text in response (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ))
        })
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_brain() -> GeminiBrain {
        let config = GeminiBrainConfig::builder()
            .api_key("test-key")
            .system_prompt("You convert things.")
            .build();
        GeminiBrain::new(config).unwrap()
    }

    #[test]
    fn test_brain_name() {
        assert_eq!(test_brain().name(), "GeminiBrain");
    }

    #[test]
    fn test_system_prompt_hash() {
        let brain = test_brain();
        assert_eq!(
            brain.system_prompt_hash(),
            Some(hash_prompt("You convert things.").as_str())
        );
    }

    #[test]
    fn test_build_request_orders_history_first() {
        let brain = test_brain();
        let history = vec![
            HistoryMessage::user("5 miles to km"),
            HistoryMessage::assistant("8.05 km"),
        ];

        let request = brain.build_request("and 10 miles?", &history);

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        assert_eq!(request.contents[2].parts[0].text, "and 10 miles?");
        assert_eq!(request.generation_config.temperature, Some(0.1));
        assert_eq!(request.generation_config.max_output_tokens, Some(1024));
        assert!(request.system_instruction.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = GeminiBrainConfig::builder()
            .api_key("test-key")
            .api_url("http://127.0.0.1:9")
            .timeout(std::time::Duration::from_secs(2))
            .build();
        let brain = GeminiBrain::new(config).unwrap();

        let err = brain.complete("hello", &[]).await.unwrap_err();
        assert!(matches!(err, BrainError::Network(_)));
    }

    #[tokio::test]
    #[ignore] // Requires network and GEMINI_API_KEY
    async fn test_live_completion() {
        dotenvy::dotenv().ok();
        let brain = GeminiBrain::from_env().unwrap();
        let text = brain.complete("Reply with the word ok.", &[]).await.unwrap();
        assert!(!text.is_empty());
    }
}
