use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Places request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Places API returned HTTP {status}")]
    ApiStatusError { status: u16 },

    #[error("Places API returned status {status}: {message}")]
    ProviderStatus { status: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Map has not been initialized")]
    NotInitialized,

    #[error("No live marker with id {id}")]
    MarkerNotFound { id: u64 },

    #[error("Unknown place category: {value}")]
    UnknownCategory { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Provider,
    Configuration,
    Io,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::ApiError(_) | MapError::ApiStatusError { .. } => ErrorCategory::Network,
            MapError::ProviderStatus { .. } | MapError::SerializationError(_) => {
                ErrorCategory::Provider
            }
            MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MapError::IoError(_) => ErrorCategory::Io,
            MapError::NotInitialized
            | MapError::MarkerNotFound { .. }
            | MapError::UnknownCategory { .. } => ErrorCategory::Usage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MapError::ApiError(_) | MapError::ApiStatusError { .. } => {
                "Could not reach the places service".to_string()
            }
            MapError::ProviderStatus { status, .. } => {
                format!("The places service rejected the search ({})", status)
            }
            MapError::SerializationError(_) => {
                "The places service sent a response that could not be read".to_string()
            }
            MapError::IoError(e) => format!("File access failed: {}", e),
            MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            MapError::NotInitialized => "The map is not ready yet".to_string(),
            MapError::MarkerNotFound { id } => format!("Marker {} is not on the map", id),
            MapError::UnknownCategory { value } => {
                format!("'{}' is not a supported place category", value)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MapError::ApiError(_) | MapError::ApiStatusError { .. } => {
                "Check the network connection and the configured endpoint"
            }
            MapError::ProviderStatus { status, .. } if status == "REQUEST_DENIED" => {
                "Check that the API key is valid and the Places API is enabled"
            }
            MapError::ProviderStatus { status, .. } if status == "OVER_QUERY_LIMIT" => {
                "Wait a moment before searching again"
            }
            MapError::ProviderStatus { .. } | MapError::SerializationError(_) => {
                "Try again later"
            }
            MapError::IoError(_) => "Check that the file exists and is readable",
            MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => "Fix the configuration file and run again",
            MapError::NotInitialized => "Initialize the map before searching",
            MapError::MarkerNotFound { .. } => "Pick one of the marker ids currently listed",
            MapError::UnknownCategory { .. } => "Use a place type such as restaurant or hospital",
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
