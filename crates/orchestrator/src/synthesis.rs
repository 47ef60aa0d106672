//! Final answer synthesis using a brain, with a local fallback.

use std::sync::Arc;

use brain_core::{hash_prompt, Brain, HistoryMessage};
use tracing::{debug, info, trace, warn};

use crate::error::OrchestratorError;
use crate::prompts::load_synthesis_prompt;
use crate::result::ToolOutcome;

/// Prefix for failed results in the local fallback answer.
const FALLBACK_FAILURE_PREFIX: &str = "Sorry, I couldn't complete that:";

/// Turns tool results into a short natural-language answer.
pub struct Synthesizer {
    brain: Arc<dyn Brain>,
    prompt: String,
    prompt_hash: String,
}

impl Synthesizer {
    /// Create a synthesizer whose prompt is resolved by [`load_synthesis_prompt`].
    pub fn new(brain: Arc<dyn Brain>) -> Self {
        Self::with_prompt(brain, load_synthesis_prompt())
    }

    /// Create a synthesizer with an explicit prompt.
    pub fn with_prompt(brain: Arc<dyn Brain>, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let prompt_hash = hash_prompt(&prompt);
        info!("Synthesis prompt fingerprint: {}", prompt_hash);
        Self {
            brain,
            prompt,
            prompt_hash,
        }
    }

    /// Get the synthesis prompt fingerprint.
    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    /// Answer `query` from `outcomes`.
    ///
    /// Falls back to [`fallback_response`] when the brain fails or answers
    /// with nothing.
    pub async fn synthesize(
        &self,
        query: &str,
        outcomes: &[ToolOutcome],
        history: &[HistoryMessage],
    ) -> String {
        match self.try_synthesize(query, outcomes, history).await {
            Ok(text) => {
                debug!("Synthesized response: {} chars", text.len());
                text
            }
            Err(OrchestratorError::Brain(e)) => {
                warn!(error = %e, "SYNTHESIS_BRAIN_ERROR");
                fallback_response(outcomes)
            }
            Err(e) => {
                warn!(error = %e, "SYNTHESIS_FAILED");
                fallback_response(outcomes)
            }
        }
    }

    async fn try_synthesize(
        &self,
        query: &str,
        outcomes: &[ToolOutcome],
        history: &[HistoryMessage],
    ) -> Result<String, OrchestratorError> {
        let input = Self::format_synthesis_input(&self.prompt, query, outcomes)?;
        trace!(input = %input, history_len = history.len(), "SYNTHESIS_INPUT");

        let response = self.brain.complete(&input, history).await?;
        trace!(raw_response = %response, "SYNTHESIS_RAW_RESPONSE");

        let text = response.trim();
        if text.is_empty() {
            return Err(OrchestratorError::SynthesisFailed(
                "empty response".to_string(),
            ));
        }
        Ok(text.to_string())
    }

    /// Format the prompt sent to the brain: instructions, query, then the
    /// tool results as JSON.
    pub fn format_synthesis_input(
        prompt: &str,
        query: &str,
        outcomes: &[ToolOutcome],
    ) -> Result<String, OrchestratorError> {
        let results = serde_json::to_string_pretty(outcomes)
            .map_err(|e| OrchestratorError::SynthesisFailed(format!("serialize results: {}", e)))?;
        Ok(format!(
            "{}\n\nQuery: {}\n\nTool results (JSON):\n{}",
            prompt, query, results
        ))
    }
}

/// Answer without a brain: one line per successful result, using each
/// result's own formatted text.
///
/// When nothing succeeded, each failure's error is reported instead.
pub fn fallback_response(outcomes: &[ToolOutcome]) -> String {
    let lines: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome.result.success)
        .filter_map(|outcome| outcome.result.formatted())
        .collect();

    if !lines.is_empty() {
        return lines.join("\n");
    }

    outcomes
        .iter()
        .filter_map(|outcome| outcome.result.error())
        .map(|error| format!("{} {}", FALLBACK_FAILURE_PREFIX, error))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use conversion_tools::{ConversionResult, ResultDetails};
    use mock_brain::{FailingBrain, ScriptedBrain};

    fn unit_ok() -> ToolOutcome {
        ToolOutcome::new(
            "unit_converter",
            ConversionResult::ok(
                ResultDetails::Unit {
                    value: 5.0,
                    from_unit: "mi".into(),
                    to_unit: "km".into(),
                    category: Some("length".into()),
                    result: Some(8.04672),
                },
                "5 mi = 8.046720 km",
            ),
        )
    }

    fn unit_failed() -> ToolOutcome {
        ToolOutcome::new(
            "unit_converter",
            ConversionResult::failed(
                ResultDetails::Unit {
                    value: 5.0,
                    from_unit: "mi".into(),
                    to_unit: "kg".into(),
                    category: None,
                    result: None,
                },
                "Cannot convert mi (length) to kg (mass): incompatible units",
            ),
        )
    }

    #[test]
    fn test_fallback_joins_successes() {
        let mut second = unit_ok();
        second.result.formatted = Some("3 m = 9.842520 ft".into());

        let text = fallback_response(&[unit_ok(), unit_failed(), second]);
        assert_eq!(text, "5 mi = 8.046720 km\n3 m = 9.842520 ft");
    }

    #[test]
    fn test_fallback_reports_failures() {
        let text = fallback_response(&[unit_failed()]);
        assert_eq!(
            text,
            "Sorry, I couldn't complete that: Cannot convert mi (length) to kg (mass): incompatible units"
        );
    }

    #[test]
    fn test_synthesis_input_contains_results() {
        let input = Synthesizer::format_synthesis_input("PROMPT", "5 mi to km", &[unit_ok()]).unwrap();
        assert!(input.starts_with("PROMPT\n\nQuery: 5 mi to km\n\nTool results (JSON):\n"));
        assert!(input.contains("\"tool\": \"unit_converter\""));
        assert!(input.contains("5 mi = 8.046720 km"));
    }

    #[tokio::test]
    async fn test_synthesize_uses_brain_text() {
        let brain = Arc::new(ScriptedBrain::new(["  5 miles is about 8.05 km.\n"]));
        let synthesizer = Synthesizer::with_prompt(brain, "PROMPT");

        let text = synthesizer.synthesize("5 mi to km", &[unit_ok()], &[]).await;
        assert_eq!(text, "5 miles is about 8.05 km.");
    }

    #[tokio::test]
    async fn test_synthesize_falls_back_on_error() {
        let synthesizer =
            Synthesizer::with_prompt(Arc::new(FailingBrain::unavailable("offline")), "PROMPT");

        let text = synthesizer.synthesize("5 mi to km", &[unit_ok()], &[]).await;
        assert_eq!(text, "5 mi = 8.046720 km");
    }

    #[tokio::test]
    async fn test_synthesize_falls_back_on_blank_answer() {
        let synthesizer = Synthesizer::with_prompt(Arc::new(ScriptedBrain::new(["   "])), "PROMPT");

        let text = synthesizer.synthesize("5 mi to km", &[unit_ok()], &[]).await;
        assert_eq!(text, "5 mi = 8.046720 km");
    }
}
