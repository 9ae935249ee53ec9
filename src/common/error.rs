//! Error types for rigid_body_controls

use thiserror::Error;

/// Main error type for planning problems
#[derive(Error, Debug)]
pub enum PlanningError {
    /// Invalid parameter (bounds, step size, thresholds, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The problem could not be set up for solving
    #[error("Setup error: {0}")]
    SetupError(String),
    /// The start state violates the validity checker
    #[error("Invalid start state: {0}")]
    InvalidStartState(String),
    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    VisualizationError(String),
}

impl From<toml::de::Error> for PlanningError {
    fn from(e: toml::de::Error) -> Self {
        PlanningError::ConfigError(e.to_string())
    }
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanningError::SetupError("goal state not set".to_string());
        assert_eq!(format!("{}", err), "Setup error: goal state not set");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlanningError = io_err.into();
        assert!(matches!(err, PlanningError::IoError(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("start = [").unwrap_err();
        let err: PlanningError = toml_err.into();
        assert!(matches!(err, PlanningError::ConfigError(_)));
    }
}
