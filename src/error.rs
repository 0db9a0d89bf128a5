//! Error types for stepr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can end a stepr turn
#[derive(Debug, Error)]
pub enum StepError {
    /// Completion provider transport or API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Reply was not a JSON object matching the step schema
    #[error("Malformed step: {0}")]
    MalformedStep(String),

    /// Turn exceeded the configured number of steps
    #[error("Step limit reached: {0} steps without output")]
    StepLimit(usize),

    /// System prompt template error
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for stepr operations
pub type Result<T> = std::result::Result<T, StepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error() {
        let err = StepError::Llm("rate limited".to_string());
        assert_eq!(err.to_string(), "LLM error: rate limited");
    }

    #[test]
    fn test_malformed_step_error() {
        let err = StepError::MalformedStep("expected value at line 1 column 1".to_string());
        assert_eq!(err.to_string(), "Malformed step: expected value at line 1 column 1");
    }

    #[test]
    fn test_step_limit_error() {
        let err = StepError::StepLimit(25);
        assert_eq!(err.to_string(), "Step limit reached: 25 steps without output");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StepError = io_err.into();
        assert!(matches!(err, StepError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: StepError = json_err.into();
        assert!(matches!(err, StepError::Json(_)));
    }
}
