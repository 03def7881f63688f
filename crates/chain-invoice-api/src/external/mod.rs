pub mod contract;
pub mod export;

use thiserror::Error;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from the invoice contract clients, carrying the provider's message
    #[error(transparent)]
    Contract(#[from] contract::Error),

    /// all errors originating from the preview exporter
    #[error(transparent)]
    Export(#[from] export::Error),
}
