use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealMindError {
    #[error("HTTP client request failed: {0}")]
    HttpError(#[from] reqwest::Error),

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

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown brand: {brand}")]
    UnknownBrand { brand: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Request,
    Network,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DealMindError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DealMindError::ConfigError { .. }
            | DealMindError::ConfigValidationError { .. }
            | DealMindError::InvalidConfigValueError { .. }
            | DealMindError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DealMindError::InvalidRequest { .. } | DealMindError::UnknownBrand { .. } => {
                ErrorCategory::Request
            }
            DealMindError::HttpError(_) | DealMindError::ServerError { .. } => {
                ErrorCategory::Network
            }
            DealMindError::IoError(_) => ErrorCategory::Io,
            DealMindError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DealMindError::HttpError(_) => {
                "Check that the DealMind server is running and the base URL is correct".to_string()
            }
            DealMindError::IoError(_) => {
                "Check file permissions and that the port is free".to_string()
            }
            DealMindError::SerializationError(_) => {
                "Make sure the payload is valid JSON".to_string()
            }
            DealMindError::ConfigError { .. } | DealMindError::ConfigValidationError { .. } => {
                "Review the TOML configuration file syntax".to_string()
            }
            DealMindError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration or CLI flags", field)
            }
            DealMindError::MissingConfigError { field } => {
                format!("Provide '{}' in the configuration file or as a CLI flag", field)
            }
            DealMindError::InvalidRequest { .. } => {
                "Send a JSON body matching the endpoint's documented shape".to_string()
            }
            DealMindError::UnknownBrand { .. } => {
                "Use one of: apple, samsung, oppo, vivo, xiaomi".to_string()
            }
            DealMindError::ServerError { .. } => "Inspect the server logs".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Request => format!("Request rejected: {}", self),
            ErrorCategory::Network => format!("Could not reach the DealMind API: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Data => format!("Data could not be processed: {}", self),
        }
    }

    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DealMindError>;
