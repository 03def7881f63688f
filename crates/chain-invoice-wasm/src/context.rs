#![allow(clippy::arc_with_non_send_sync)]
use super::CONTEXT;
use crate::external::{JsContractClient, JsInvoiceContract, JsPreviewExporter};
use chain_invoice_api::{
    Config, WalletContext,
    service::{
        listing_service::{ListingService, ListingServiceApi},
        submission_service::{SubmissionService, SubmissionServiceApi},
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Context {
    pub wallet: Arc<WalletContext>,
    pub submission_service: Arc<dyn SubmissionServiceApi>,
    pub listing_service: Arc<dyn ListingServiceApi>,
    pub preview_exporter: JsPreviewExporter,
}

impl Context {
    pub fn new(
        cfg: &Config,
        contract: JsInvoiceContract,
        preview_exporter: JsPreviewExporter,
    ) -> Self {
        let contract_client = Arc::new(JsContractClient::new(contract, cfg.chain_id));
        // starts disconnected, the app sets the address once the wallet connects
        let wallet = Arc::new(WalletContext::new(None));

        let submission_service = SubmissionService::new(
            contract_client.clone(),
            wallet.clone(),
            cfg.contract_address.clone(),
            cfg.export_options.clone(),
        );
        let listing_service =
            ListingService::new(contract_client, wallet.clone(), cfg.contract_address.clone());

        Self {
            wallet,
            submission_service: Arc::new(submission_service),
            listing_service: Arc::new(listing_service),
            preview_exporter,
        }
    }
}

pub fn get_ctx() -> &'static Context {
    CONTEXT.with(|c| c.borrow().expect("Context is not initialized"))
}
