//! Result bag returned by the orchestrator.

use conversion_tools::ConversionResult;
use serde::{Deserialize, Serialize};

use crate::analysis::QueryAnalysis;

/// One tool's result for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Registry name of the tool that produced `result`.
    pub tool: String,
    pub result: ConversionResult,
}

impl ToolOutcome {
    pub fn new(tool: impl Into<String>, result: ConversionResult) -> Self {
        Self {
            tool: tool.into(),
            result,
        }
    }
}

/// Everything the presentation layer needs to show an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    pub success: bool,
    /// Absent when the query was blank or processing failed outright.
    pub analysis: Option<QueryAnalysis>,
    pub tool_results: Vec<ToolOutcome>,
    pub final_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResult {
    /// A failed result with a user-facing response and an error.
    pub fn failure(
        analysis: Option<QueryAnalysis>,
        tool_results: Vec<ToolOutcome>,
        final_response: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            analysis,
            tool_results,
            final_response: final_response.into(),
            error: Some(error.into()),
        }
    }

    /// Results whose calculation succeeded.
    pub fn successful_results(&self) -> impl Iterator<Item = &ToolOutcome> {
        self.tool_results.iter().filter(|outcome| outcome.result.success)
    }
}
