use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("CMS request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CMS responded with status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Cms,
    Configuration,
    Data,
    NotFound,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::HttpError(_) => ErrorCategory::Network,
            SiteError::StatusError { .. } => ErrorCategory::Cms,
            SiteError::IoError(_)
            | SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::SerializationError(_) | SiteError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            SiteError::NotFound { .. } => ErrorCategory::NotFound,
        }
    }

    /// Short message suitable for an inline form error or CLI output.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::HttpError(_) => "Could not reach the content server".to_string(),
            SiteError::StatusError { status, .. } if *status >= 500 => {
                "The content server is temporarily unavailable".to_string()
            }
            SiteError::StatusError { status, .. } => {
                format!("The content server rejected the request ({})", status)
            }
            SiteError::ValidationError { message } => message.clone(),
            SiteError::NotFound { what } => format!("{} was not found", what),
            other => other.to_string(),
        }
    }

    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network | ErrorCategory::Cms => 2,
            ErrorCategory::Data => 3,
            ErrorCategory::NotFound => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
