use crate::domain::model::Tier;
use thiserror::Error;

/// 外部服務呼叫失敗（網路、非 2xx、格式錯誤）
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{service} request failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}")]
    Status {
        service: &'static str,
        status: u16,
        body: Option<String>,
    },

    #[error("{service} reported an error: {message}")]
    Remote {
        service: &'static str,
        message: String,
        body: Option<String>,
    },

    #[error("{service} returned a malformed payload: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },
}

impl GatewayError {
    pub fn service(&self) -> &'static str {
        match self {
            GatewayError::Network { service, .. }
            | GatewayError::Status { service, .. }
            | GatewayError::Remote { service, .. }
            | GatewayError::Malformed { service, .. } => *service,
        }
    }

    /// 遠端回傳的錯誤內容（若有）
    pub fn remote_body(&self) -> Option<&str> {
        match self {
            GatewayError::Status { body, .. } | GatewayError::Remote { body, .. } => {
                body.as_deref().filter(|b| !b.trim().is_empty())
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("The {tier} selector is disabled until a {} is selected", .tier.parent_label())]
    InertSelector { tier: Tier },

    #[error("No {tier} named '{value}'")]
    UnknownOption { tier: Tier, value: String },
}

impl SelectorError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SelectorError::IoError(e) => format!("File access failed: {}", e),
            SelectorError::SerializationError(_) => "Could not encode the selection".to_string(),
            SelectorError::ConfigError { message } => format!("Configuration problem: {}", message),
            SelectorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SelectorError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            SelectorError::InertSelector { .. } | SelectorError::UnknownOption { .. } => {
                self.to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SelectorError::IoError(_) => "Check that the file exists and is readable",
            SelectorError::SerializationError(_) => "Try the text output format instead",
            SelectorError::ConfigError { .. }
            | SelectorError::InvalidConfigValueError { .. }
            | SelectorError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            SelectorError::InertSelector { .. } => "Select the parent level first",
            SelectorError::UnknownOption { .. } => "List the available options and copy a name exactly",
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectorError>;
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
