//! Query classification using a brain, with a keyword fallback.

use std::sync::Arc;

use brain_core::{hash_prompt, Brain, HistoryMessage};
use tracing::{debug, info, trace, warn};

use crate::analysis::{classify_by_keywords, AnalysisSource, QueryAnalysis};
use crate::error::OrchestratorError;
use crate::prompts::load_classifier_prompt;

/// Router that asks a brain which conversion domains a query needs.
///
/// Routing never fails: when the brain errors or its answer holds no usable
/// JSON object, the keyword classifier answers instead.
pub struct Router {
    brain: Arc<dyn Brain>,
    prompt: String,
    prompt_hash: String,
}

impl Router {
    /// Create a router whose prompt is resolved by [`load_classifier_prompt`].
    pub fn new(brain: Arc<dyn Brain>) -> Self {
        Self::with_prompt(brain, load_classifier_prompt())
    }

    /// Create a router with an explicit classifier prompt.
    pub fn with_prompt(brain: Arc<dyn Brain>, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let prompt_hash = hash_prompt(&prompt);
        info!("Classifier prompt fingerprint: {}", prompt_hash);
        Self {
            brain,
            prompt,
            prompt_hash,
        }
    }

    /// Get the classifier prompt fingerprint.
    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    /// Classify a query.
    pub async fn classify(&self, query: &str, history: &[HistoryMessage]) -> QueryAnalysis {
        let input = Self::format_classifier_input(&self.prompt, query);

        trace!(
            query = %query,
            history_len = history.len(),
            brain = %self.brain.name(),
            "CLASSIFY_INPUT"
        );

        match self.brain.complete(&input, history).await {
            Ok(response) => {
                trace!(
                    raw_response = %response,
                    response_len = response.len(),
                    "CLASSIFY_RAW_RESPONSE"
                );
                match Self::parse_analysis(&response) {
                    Ok(analysis) => {
                        debug!(
                            needs_unit = analysis.needs_unit,
                            needs_currency = analysis.needs_currency,
                            needs_date_time = analysis.needs_date_time,
                            "CLASSIFY_PARSED"
                        );
                        analysis
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            raw_response = %response,
                            "CLASSIFY_PARSE_FAILED"
                        );
                        classify_by_keywords(query)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "CLASSIFY_BRAIN_ERROR");
                classify_by_keywords(query)
            }
        }
    }

    /// Format the prompt sent to the brain for one query.
    pub fn format_classifier_input(prompt: &str, query: &str) -> String {
        format!("{}\n\nQuery: {}", prompt, query)
    }

    /// Parse a [`QueryAnalysis`] from the brain's response.
    fn parse_analysis(response: &str) -> Result<QueryAnalysis, OrchestratorError> {
        let json_str = Self::extract_json(response);

        let mut analysis = serde_json::from_str::<QueryAnalysis>(json_str).map_err(|e| {
            OrchestratorError::InvalidAnalysis(format!(
                "parse error: {}, response was: {}",
                e, response
            ))
        })?;
        analysis.source = AnalysisSource::Llm;

        Ok(analysis)
    }

    /// Extract JSON from a response that may contain markdown or other text.
    fn extract_json(response: &str) -> &str {
        let trimmed = response.trim();

        if trimmed.starts_with('{') {
            return Self::extract_balanced_json(trimmed);
        }

        // Markdown code block
        if let Some(start) = trimmed.find("```json") {
            let json_start = start + 7;
            if let Some(end) = trimmed[json_start..].find("```") {
                let extracted = trimmed[json_start..json_start + end].trim();
                return Self::extract_balanced_json(extracted);
            }
        }

        // Generic code block, optional language identifier
        if let Some(start) = trimmed.find("```") {
            let after_backticks = &trimmed[start + 3..];
            let json_start = after_backticks.find('\n').map(|i| i + 1).unwrap_or(0);
            if let Some(end) = after_backticks[json_start..].find("```") {
                let extracted = after_backticks[json_start..json_start + end].trim();
                return Self::extract_balanced_json(extracted);
            }
        }

        // Object embedded in prose
        if let Some(start) = trimmed.find('{') {
            return Self::extract_balanced_json(&trimmed[start..]);
        }

        trimmed
    }

    /// Extract a balanced JSON object from a string that starts with '{'.
    ///
    /// Drops anything after the matching close brace, including stray
    /// trailing braces: `{"a": {}}}` -> `{"a": {}}`.
    fn extract_balanced_json(s: &str) -> &str {
        if !s.starts_with('{') {
            return s;
        }

        let mut depth = 0;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, ch) in s.char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match ch {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return &s[..=i];
                    }
                }
                _ => {}
            }
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::BrainError;
    use mock_brain::{FailingBrain, ScriptedBrain};

    const UNIT_ONLY: &str =
        r#"{"needsUnit": true, "needsCurrency": false, "needsDateTime": false, "reasoning": "Length."}"#;

    #[test]
    fn test_extract_balanced_json_clean() {
        assert_eq!(Router::extract_balanced_json(UNIT_ONLY), UNIT_ONLY);
    }

    #[test]
    fn test_extract_balanced_json_trailing_braces() {
        let input = format!("{}}}}}", UNIT_ONLY);
        assert_eq!(Router::extract_balanced_json(&input), UNIT_ONLY);
    }

    #[test]
    fn test_extract_balanced_json_with_strings() {
        let input = r#"{"reasoning": "braces { inside } text", "nested": {"key": "value"}}"#;
        assert_eq!(Router::extract_balanced_json(input), input);
    }

    #[test]
    fn test_extract_balanced_json_with_escaped_quotes() {
        let input = r#"{"reasoning": "user said \"5 mi\" }", "needsUnit": true}"#;
        assert_eq!(Router::extract_balanced_json(input), input);
    }

    #[test]
    fn test_extract_balanced_json_unbalanced() {
        let input = r#"{"needsUnit": true"#;
        assert_eq!(Router::extract_balanced_json(input), input);
    }

    #[test]
    fn test_extract_json_fenced() {
        let input = format!("```json\n{}\n```", UNIT_ONLY);
        assert_eq!(Router::extract_json(&input), UNIT_ONLY);

        let input = format!("```\n{}\n```", UNIT_ONLY);
        assert_eq!(Router::extract_json(&input), UNIT_ONLY);
    }

    #[test]
    fn test_extract_json_in_prose() {
        let input = format!("Sure! Here is the analysis: {} Hope that helps.", UNIT_ONLY);
        assert_eq!(Router::extract_json(&input), UNIT_ONLY);
    }

    #[test]
    fn test_parse_analysis_marks_llm_source() {
        let input = r#"{"needsUnit": true, "needsCurrency": false, "needsDateTime": false, "source": "keywords"}"#;
        let analysis = Router::parse_analysis(input).unwrap();
        assert!(analysis.needs_unit);
        assert_eq!(analysis.source, AnalysisSource::Llm);
        assert!(analysis.reasoning.is_empty());
    }

    #[test]
    fn test_parse_analysis_rejects_prose() {
        let err = Router::parse_analysis("I think this is about miles.").unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidAnalysis(_)));
    }

    #[test]
    fn test_format_classifier_input() {
        let input = Router::format_classifier_input("PROMPT", "5 mi to km");
        assert_eq!(input, "PROMPT\n\nQuery: 5 mi to km");
    }

    #[tokio::test]
    async fn test_classify_uses_brain_answer() {
        // The brain disagrees with the keywords; the brain wins.
        let brain = Arc::new(ScriptedBrain::new([
            r#"{"needsUnit": false, "needsCurrency": false, "needsDateTime": true, "reasoning": "Time."}"#,
        ]));
        let router = Router::with_prompt(brain.clone(), "PROMPT");

        let analysis = router.classify("5 miles to km", &[]).await;
        assert!(analysis.needs_date_time);
        assert!(!analysis.needs_unit);
        assert_eq!(analysis.source, AnalysisSource::Llm);

        let prompts = brain.prompts().await;
        assert_eq!(prompts, vec!["PROMPT\n\nQuery: 5 miles to km".to_string()]);
    }

    #[tokio::test]
    async fn test_classify_falls_back_on_brain_error() {
        let router = Router::with_prompt(
            Arc::new(FailingBrain::unavailable("offline")),
            "PROMPT",
        );

        let analysis = router.classify("5 miles to km", &[]).await;
        assert!(analysis.needs_unit);
        assert_eq!(analysis.source, AnalysisSource::Keywords);
    }

    #[tokio::test]
    async fn test_classify_falls_back_on_garbage() {
        let brain = Arc::new(ScriptedBrain::default());
        brain.push_response("no idea, sorry").await;
        brain
            .push_error(BrainError::RateLimited("slow down".into()))
            .await;
        let router = Router::with_prompt(brain, "PROMPT");

        let first = router.classify("$20 to yen", &[]).await;
        assert!(first.needs_currency);
        assert_eq!(first.source, AnalysisSource::Keywords);

        let second = router.classify("days until halloween", &[]).await;
        assert!(second.needs_date_time);
        assert_eq!(second.source, AnalysisSource::Keywords);
    }

    #[test]
    fn test_prompt_hash_is_stable() {
        let brain: Arc<dyn Brain> = Arc::new(ScriptedBrain::default());
        let a = Router::with_prompt(brain.clone(), "PROMPT");
        let b = Router::with_prompt(brain, "  PROMPT\n");
        assert_eq!(a.prompt_hash(), b.prompt_hash());
    }
}
