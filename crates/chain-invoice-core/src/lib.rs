use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod address;
pub mod amount;
pub mod constants;
pub mod export;
pub mod invoice;
pub mod status;
#[cfg(test)]
mod tests;
pub mod timestamp;

pub use address::Address;
pub use amount::NativeAmount;
pub use timestamp::Timestamp;

/// This is needed, so we can have our services be used both in a single threaded (wasm32) and in a
/// multi-threaded (e.g. native tests) environment without issues.
#[cfg(not(target_arch = "wasm32"))]
pub trait ServiceTraitBounds: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait ServiceTraitBounds {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// The user editable fields of an invoice draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Recipient,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Recipient => write!(f, "recipient"),
            Field::Amount => write!(f, "amount"),
        }
    }
}

/// Generic validation error type
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ValidationError {
    /// error returned if no wallet is connected when an action needs an account
    #[error("wallet not connected")]
    WalletNotConnected,

    /// error returned if a required field is empty
    #[error("The field {0} must not be empty")]
    FieldEmpty(Field),

    /// error returned if an address is not a 0x-prefixed 20 byte hex string
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// error returned if an amount can't be parsed as a decimal number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// error returned if an amount is negative
    #[error("The amount must not be negative")]
    NegativeAmount,

    /// error returned if an amount has more fractional digits than the native unit supports
    #[error("The amount must have at most {0} decimal places")]
    TooManyDecimals(u32),

    /// error returned if an amount does not fit into the base unit representation
    #[error("The amount is too large")]
    AmountOverflow,

    /// error returned if a timestamp is out of range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(u64),

    /// error returned if the invoice status of a contract record can't be interpreted
    #[error("Invalid invoice status: {0}")]
    InvalidInvoiceStatus(String),

    /// error returned if the configured export filename pattern is unusable
    #[error("Invalid export filename pattern: {0}")]
    InvalidFilenamePattern(String),
}
