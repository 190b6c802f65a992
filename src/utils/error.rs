use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("AI service error (status {status}): {message}")]
    AiResponseError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OptimizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OptimizerError::ConfigValidationError { .. }
            | OptimizerError::InvalidConfigValueError { .. }
            | OptimizerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            OptimizerError::ApiError(_) | OptimizerError::AiResponseError { .. } => {
                ErrorCategory::Network
            }
            OptimizerError::CsvError(_)
            | OptimizerError::SerializationError(_)
            | OptimizerError::ProcessingError { .. }
            | OptimizerError::ValidationError { .. } => ErrorCategory::Data,
            OptimizerError::ZipError(_) | OptimizerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OptimizerError::ValidationError { .. } => ErrorSeverity::Low,
            OptimizerError::ApiError(_) | OptimizerError::AiResponseError { .. } => {
                ErrorSeverity::Medium
            }
            OptimizerError::CsvError(_)
            | OptimizerError::SerializationError(_)
            | OptimizerError::ProcessingError { .. }
            | OptimizerError::ConfigValidationError { .. }
            | OptimizerError::InvalidConfigValueError { .. }
            | OptimizerError::MissingConfigError { .. } => ErrorSeverity::High,
            OptimizerError::ZipError(_) | OptimizerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OptimizerError::AiResponseError { status: 400, .. } => {
                "Check the Gemini API key in your configuration (GEMINI_API_KEY)".to_string()
            }
            OptimizerError::AiResponseError { status: 401 | 403, .. } => {
                "Enable the Generative Language API for the project and check the key restrictions"
                    .to_string()
            }
            OptimizerError::AiResponseError { .. } | OptimizerError::ApiError(_) => {
                "Check the network connection and the AI endpoint, then retry".to_string()
            }
            OptimizerError::CsvError(_) => {
                "Make sure the input is a CSV file with a 'text' column".to_string()
            }
            OptimizerError::InvalidConfigValueError { field, .. }
            | OptimizerError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            OptimizerError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            OptimizerError::ValidationError { .. } => {
                "Correct the highlighted field and save again".to_string()
            }
            OptimizerError::ProcessingError { .. } | OptimizerError::SerializationError(_) => {
                "Inspect the input data for malformed rows".to_string()
            }
            OptimizerError::IoError(_) | OptimizerError::ZipError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the AI service: {}", self),
            ErrorCategory::Data => format!("Could not process the order data: {}", self),
            ErrorCategory::System => format!("System error while writing output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_error_suggestions_depend_on_status() {
        let bad_key = OptimizerError::AiResponseError {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert!(bad_key.recovery_suggestion().contains("GEMINI_API_KEY"));
        assert_eq!(bad_key.category(), ErrorCategory::Network);

        let denied = OptimizerError::AiResponseError {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert!(denied.recovery_suggestion().contains("Generative Language API"));
    }

    #[test]
    fn test_validation_errors_are_low_severity() {
        let err = OptimizerError::ValidationError {
            message: "selling price must be greater than 0".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().starts_with("Could not process"));
    }
}
