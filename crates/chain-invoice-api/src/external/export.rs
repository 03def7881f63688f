use async_trait::async_trait;
use chain_invoice_core::{ServiceTraitBounds, export::ExportRequest};
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, super::Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// the exporter failed to render or save the document
    #[error("Preview export failed: {0}")]
    Export(String),
}

#[cfg(test)]
use mockall::automock;

/// Exporter bound to one rendered preview region, which it turns into a downloadable document
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PreviewExporterApi: ServiceTraitBounds {
    async fn export(&self, request: &ExportRequest) -> Result<()>;
}

#[cfg(test)]
impl ServiceTraitBounds for MockPreviewExporterApi {}
