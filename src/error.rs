use sellerdesk_shared::ApiError;
use sellerdesk_subscription::RenewalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Renewal error: {0}")]
    RenewalError(#[from] RenewalError),

    #[error("Not signed in")]
    SignedOut,

    #[error("Session storage error: {0}")]
    SessionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::SessionError(err.to_string())
    }
}

impl AppError {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError(_) => 78,
            AppError::SignedOut | AppError::ApiError(ApiError::Unauthorized) => 77,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
