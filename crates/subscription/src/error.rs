use sellerdesk_shared::ApiError;
use thiserror::Error;

pub const RENEWAL_FAILED_FALLBACK: &str = "Failed to renew subscription. Please try again.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenewalError {
    #[error("renewal prompt is not open")]
    NotOpen,

    #[error("a renewal is already in progress")]
    InFlight,

    #[error("insufficient wallet balance: short by {shortfall:.2}")]
    InsufficientBalance { shortfall: f64 },

    #[error("no plan to renew")]
    MissingPlan,

    #[error("{0}")]
    Api(#[from] ApiError),
}

impl RenewalError {
    /// Text for the blocking alert.
    pub fn user_message(&self) -> String {
        match self {
            RenewalError::Api(e) => e
                .server_message()
                .map(str::to_owned)
                .unwrap_or_else(|| RENEWAL_FAILED_FALLBACK.to_owned()),
            RenewalError::InsufficientBalance { .. } => {
                "Insufficient wallet balance. Please top up your wallet.".to_owned()
            }
            other => other.to_string(),
        }
    }
}
