use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormRefError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown form category: {name}")]
    UnknownCategory { name: String },

    #[error("Invalid form prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("Invalid form number: '{value}'")]
    InvalidFormNumber { value: String },

    #[error("Cannot draw {requested} distinct form numbers, only {capacity} exist")]
    BatchTooLarge { requested: usize, capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormRefError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormRefError::IoError(_) | FormRefError::SerializationError(_) => {
                ErrorCategory::System
            }
            FormRefError::ConfigValidationError { .. }
            | FormRefError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FormRefError::UnknownCategory { .. }
            | FormRefError::InvalidPrefix { .. }
            | FormRefError::InvalidFormNumber { .. }
            | FormRefError::BatchTooLarge { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormRefError::IoError(e) => format!("Could not read or write a file: {}", e),
            FormRefError::UnknownCategory { name } => {
                format!("'{}' is not a known form category", name)
            }
            FormRefError::InvalidFormNumber { value } => {
                format!("'{}' is not a valid form number", value)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormRefError::IoError(_) => "Check that the file exists and is readable",
            FormRefError::SerializationError(_) => "Report this output failure with --verbose logs",
            FormRefError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            FormRefError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the configuration file"
            }
            FormRefError::UnknownCategory { .. } => {
                "Run `form-ref prefixes` to list the registered categories"
            }
            FormRefError::InvalidPrefix { .. } => {
                "Use a short uppercase code without hyphens or spaces, e.g. SF"
            }
            FormRefError::InvalidFormNumber { .. } => {
                "Form numbers are six digits, optionally preceded by a prefix and a hyphen (SF-123456)"
            }
            FormRefError::BatchTooLarge { .. } => "Request fewer numbers or drop --distinct",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormRefError>;
