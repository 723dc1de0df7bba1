//! Error types for graph analyses.

use depwalk_core::GraphError;

/// Errors from running or rendering an analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The underlying walk refused to run.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for analyses.
pub type Result<T> = std::result::Result<T, AnalysisError>;
