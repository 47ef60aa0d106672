//! Main orchestrator that answers one query end-to-end.

use std::sync::Arc;

use brain_core::Brain;
use conversion_tools::{default_registry, ExchangeRateApi, RateSource, ToolRegistry};
use gemini_brain::GeminiBrain;
use tracing::{debug, error, info};

use crate::error::OrchestratorError;
use crate::result::{ProcessResult, ToolOutcome};
use crate::router::Router;
use crate::session::SessionContext;
use crate::synthesis::Synthesizer;

/// Error reported when no extractor understood the query.
pub const PARSE_FAILURE_ERROR: &str =
    "Could not parse a unit, currency or date/time request from the query";

/// Answer shown alongside [`PARSE_FAILURE_ERROR`].
pub const PARSE_FAILURE_RESPONSE: &str = r#"I couldn't find a conversion in that. Try something like "Convert 5 miles to km", "50 USD to EUR" or "How many days until Christmas?"."#;

/// Answer shown when processing failed outright.
pub const INTERNAL_ERROR_RESPONSE: &str =
    "Something went wrong while answering that. Please try again.";

/// Coordinates classification, tool execution and synthesis.
///
/// The orchestrator:
/// - Classifies the query (brain, falling back to keywords)
/// - Runs each needed tool against the original query in fixed order
/// - Synthesizes a final answer (brain, falling back to formatted lines)
/// - Appends successful exchanges to the session history
pub struct Orchestrator {
    router: Router,
    synthesizer: Synthesizer,
    registry: ToolRegistry,
    session: SessionContext,
}

impl Orchestrator {
    /// Create an orchestrator with the built-in tools.
    ///
    /// The same brain serves classification and synthesis; the currency
    /// tool shares the session's rate cache.
    pub fn new(brain: Arc<dyn Brain>, rates: Arc<dyn RateSource>, session: SessionContext) -> Self {
        let registry = default_registry(rates, session.rate_cache.clone());
        Self::with_parts(
            Router::new(brain.clone()),
            Synthesizer::new(brain),
            registry,
            session,
        )
    }

    /// Create an orchestrator from explicit components.
    pub fn with_parts(
        router: Router,
        synthesizer: Synthesizer,
        registry: ToolRegistry,
        session: SessionContext,
    ) -> Self {
        info!(
            "Orchestrator ready with tools: {}",
            registry.list_tools().join(", ")
        );
        Self {
            router,
            synthesizer,
            registry,
            session,
        }
    }

    /// Create an orchestrator backed by Gemini and the live rate API,
    /// configured from environment variables.
    pub fn from_env(session: SessionContext) -> Result<Self, OrchestratorError> {
        let brain = GeminiBrain::from_env()
            .map_err(|e| OrchestratorError::Config(format!("Gemini brain: {}", e)))?;
        Ok(Self::new(
            Arc::new(brain),
            Arc::new(ExchangeRateApi::from_env()),
            session,
        ))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer a query.
    ///
    /// Always returns a result; internal errors become a failed
    /// [`ProcessResult`] with a user-facing response.
    pub async fn process(&self, query: &str) -> ProcessResult {
        match self.run_pipeline(query.trim()).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, query = %query, "PROCESS_FAILED");
                ProcessResult::failure(None, Vec::new(), INTERNAL_ERROR_RESPONSE, e.to_string())
            }
        }
    }

    async fn run_pipeline(&self, query: &str) -> Result<ProcessResult, OrchestratorError> {
        if query.is_empty() {
            return Ok(ProcessResult::failure(
                None,
                Vec::new(),
                PARSE_FAILURE_RESPONSE,
                PARSE_FAILURE_ERROR,
            ));
        }

        info!("Processing query: {}", query);
        let history = self.session.history.get().await;

        // 1. Classify
        let analysis = self.router.classify(query, &history).await;
        info!(
            source = ?analysis.source,
            domains = ?analysis.domains(),
            "Query classified: {}",
            analysis.reasoning
        );

        // 2. Run needed tools in fixed order, each against the full query
        let mut outcomes = Vec::new();
        for domain in analysis.domains() {
            let tool = self.registry.for_domain(domain).ok_or_else(|| {
                OrchestratorError::ToolFailed(format!("no tool registered for {:?}", domain))
            })?;

            match tool.run(query).await {
                Some(result) => {
                    debug!(
                        tool = %tool.name(),
                        success = result.success,
                        "Tool result: {}",
                        result.formatted().or(result.error()).unwrap_or_default()
                    );
                    outcomes.push(ToolOutcome::new(tool.name(), result));
                }
                None => debug!(tool = %tool.name(), "No intent extracted"),
            }
        }

        if outcomes.is_empty() {
            info!("No tool could parse the query");
            return Ok(ProcessResult::failure(
                Some(analysis),
                outcomes,
                PARSE_FAILURE_RESPONSE,
                PARSE_FAILURE_ERROR,
            ));
        }

        // 3. Synthesize
        let final_response = self.synthesizer.synthesize(query, &outcomes, &history).await;
        let success = outcomes.iter().any(|outcome| outcome.result.success);

        let error = if success {
            self.session.history.add_exchange(query, &final_response).await;
            None
        } else {
            let errors: Vec<&str> = outcomes
                .iter()
                .filter_map(|outcome| outcome.result.error())
                .collect();
            Some(errors.join("; "))
        };

        info!("Final response: {} chars (success: {})", final_response.len(), success);

        Ok(ProcessResult {
            success,
            analysis: Some(analysis),
            tool_results: outcomes,
            final_response,
            error,
        })
    }
}
