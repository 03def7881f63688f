pub mod listing_service;
pub mod submission_service;

use crate::external;
use chain_invoice_core::ValidationError;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// errors that stem from validation in core, e.g. a missing wallet or malformed input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// errors from the contract clients or the exporter, carrying the provider's message
    #[error(transparent)]
    ExternalApi(#[from] external::Error),
}

impl Error {
    /// The message shown to the user, `fallback` is used if the error came without one
    pub fn user_message(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_owned()
        } else {
            msg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::contract;

    #[test]
    fn user_message_uses_provider_message() {
        let err = Error::from(external::Error::from(contract::Error::Write(
            "insufficient funds".to_owned(),
        )));
        assert_eq!(err.user_message("fallback"), "insufficient funds");
    }

    #[test]
    fn user_message_falls_back_if_blank() {
        let err = Error::from(external::Error::from(contract::Error::Read(" ".to_owned())));
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn user_message_for_validation() {
        let err = Error::from(ValidationError::WalletNotConnected);
        assert_eq!(err.user_message("fallback"), "wallet not connected");
    }
}
