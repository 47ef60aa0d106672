//! Tool trait definition.

use async_trait::async_trait;

use crate::extract::{extract_intent, ConversionIntent, Domain};
use crate::result::{ConversionResult, ResultDetails};

/// A domain pipeline the router can dispatch to.
///
/// A tool owns both halves of its domain: extraction turns the raw query
/// into an intent, calculation turns the intent into a result. Calculation
/// never fails past this boundary; errors come back as a failed
/// [`ConversionResult`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// The domain this tool handles.
    fn domain(&self) -> Domain;

    /// Pull this tool's intent out of the raw query.
    fn extract(&self, query: &str) -> Option<ConversionIntent> {
        extract_intent(self.domain(), query)
    }

    /// Execute a fully-specified intent.
    async fn calculate(&self, intent: ConversionIntent) -> ConversionResult;

    /// Extract and calculate. `None` means the query is not for this tool.
    async fn run(&self, query: &str) -> Option<ConversionResult> {
        let intent = self.extract(query)?;
        Some(self.calculate(intent).await)
    }
}

/// Result for an intent handed to the wrong tool.
pub(crate) fn wrong_domain(tool: &str, intent: &ConversionIntent) -> ConversionResult {
    ConversionResult::failed(
        ResultDetails::Unparsed {
            query: format!("{:?}", intent),
        },
        format!("{} cannot handle a {:?} intent", tool, intent.domain()),
    )
}
