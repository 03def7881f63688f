use async_trait::async_trait;
use chain_invoice_core::{
    Address, ServiceTraitBounds,
    invoice::{CreateInvoiceRequest, RawInvoice, TransactionId},
};
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, super::Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// the simulation or submission of a contract write failed, with the provider's message
    #[error("{0}")]
    Write(String),

    /// a contract read failed, with the provider's message
    #[error("{0}")]
    Read(String),

    /// the provider returned something we can't interpret
    #[error("Invalid contract response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
use mockall::automock;

/// State changing calls to the invoice contract, signed by the connected wallet
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InvoiceContractWriteApi: ServiceTraitBounds {
    /// Simulates and sends `createInvoice(recipient, amount)` from `request.account`
    async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<TransactionId>;
}

/// Read-only calls to the invoice contract
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InvoiceContractReadApi: ServiceTraitBounds {
    /// Calls `getInvoices(owner)` and returns the records in contract order
    async fn get_invoices(&self, contract_address: &Address, owner: &str)
    -> Result<Vec<RawInvoice>>;
}

#[cfg(test)]
impl ServiceTraitBounds for MockInvoiceContractWriteApi {}

#[cfg(test)]
impl ServiceTraitBounds for MockInvoiceContractReadApi {}
