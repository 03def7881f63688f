use super::{Error, Result};
use crate::{
    WalletContext,
    constants::SUBMISSION_FALLBACK_MESSAGE,
    external::{contract::InvoiceContractWriteApi, export::PreviewExporterApi},
    util::StatusFeed,
};
use async_broadcast::Receiver;
use async_trait::async_trait;
use chain_invoice_core::{
    Address, Field, ServiceTraitBounds, ValidationError,
    export::ExportOptions,
    invoice::{CreateInvoiceRequest, DraftInvoice, TransactionId},
    status::SubmissionStatus,
    timestamp::now_millis,
};
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SubmissionServiceApi: ServiceTraitBounds {
    /// Stores the value for the given field of the draft, without validating it
    fn update_field(&self, field: Field, value: String);

    /// Returns the current draft
    fn draft(&self) -> DraftInvoice;

    /// Returns the current submission status
    fn status(&self) -> SubmissionStatus;

    /// Subscribe to all status transitions
    fn subscribe(&self) -> Receiver<SubmissionStatus>;

    /// Creates the invoice on chain from the current draft and returns the resulting status.
    /// Errors never escape, they end up as `SubmissionStatus::Failed`.
    async fn submit(&self) -> SubmissionStatus;

    /// Exports the preview region the given exporter is bound to, doesn't affect the status
    async fn export_preview(&self, exporter: &dyn PreviewExporterApi) -> Result<()>;
}

struct SubmissionState {
    draft: DraftInvoice,
    status: SubmissionStatus,
}

pub struct SubmissionService {
    write_client: Arc<dyn InvoiceContractWriteApi>,
    wallet: Arc<WalletContext>,
    contract_address: Address,
    export_options: ExportOptions,
    state: Mutex<SubmissionState>,
    status_feed: StatusFeed<SubmissionStatus>,
}

impl SubmissionService {
    pub fn new(
        write_client: Arc<dyn InvoiceContractWriteApi>,
        wallet: Arc<WalletContext>,
        contract_address: Address,
        export_options: ExportOptions,
    ) -> Self {
        Self {
            write_client,
            wallet,
            contract_address,
            export_options,
            state: Mutex::new(SubmissionState {
                draft: DraftInvoice::default(),
                status: SubmissionStatus::Idle,
            }),
            status_feed: StatusFeed::new(),
        }
    }

    /// Checks the preconditions and moves to pending, returns the request to send together with
    /// the submitted draft, or the status to return right away
    fn begin(
        &self,
    ) -> std::result::Result<(CreateInvoiceRequest, DraftInvoice), SubmissionStatus> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.status.is_pending() {
            warn!("Invoice submission already in progress - ignoring submit");
            return Err(state.status.clone());
        }
        let prepared = self.prepare(&state.draft);
        let status = match prepared {
            Ok(ref request) => {
                debug!(
                    "Submitting invoice to {} for {} from {}",
                    request.recipient, request.amount, request.account
                );
                SubmissionStatus::Pending
            }
            Err(ref e) => {
                warn!("Invoice submission rejected: {e}");
                SubmissionStatus::Failed(e.user_message(SUBMISSION_FALLBACK_MESSAGE))
            }
        };
        state.status = status.clone();
        self.status_feed.publish(status.clone());
        prepared
            .map(|request| (request, state.draft.clone()))
            .map_err(|_| status)
    }

    fn prepare(&self, draft: &DraftInvoice) -> Result<CreateInvoiceRequest> {
        let account = self
            .wallet
            .current_address()
            .ok_or(Error::Validation(ValidationError::WalletNotConnected))?;
        let payload = draft.to_payload()?;
        Ok(CreateInvoiceRequest {
            contract_address: self.contract_address.clone(),
            account,
            recipient: payload.recipient,
            amount: payload.amount,
        })
    }

    /// Applies the result of the write, the draft is only reset if it wasn't edited meanwhile
    fn finish(
        &self,
        result: Result<TransactionId>,
        submitted: DraftInvoice,
    ) -> SubmissionStatus {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let status = match result {
            Ok(tx_id) => {
                info!("Created invoice in transaction {tx_id}");
                if state.draft == submitted {
                    state.draft = DraftInvoice::default();
                } else {
                    debug!("Draft was edited during submission - keeping it");
                }
                SubmissionStatus::Succeeded(tx_id)
            }
            Err(e) => {
                error!("Could not create invoice: {e}");
                SubmissionStatus::Failed(e.user_message(SUBMISSION_FALLBACK_MESSAGE))
            }
        };
        state.status = status.clone();
        self.status_feed.publish(status.clone());
        status
    }
}

impl ServiceTraitBounds for SubmissionService {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SubmissionServiceApi for SubmissionService {
    fn update_field(&self, field: Field, value: String) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .draft
            .update_field(field, value);
    }

    fn draft(&self) -> DraftInvoice {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .draft
            .clone()
    }

    fn status(&self) -> SubmissionStatus {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .status
            .clone()
    }

    fn subscribe(&self) -> Receiver<SubmissionStatus> {
        self.status_feed.subscribe()
    }

    async fn submit(&self) -> SubmissionStatus {
        let (request, submitted) = match self.begin() {
            Ok(prepared) => prepared,
            Err(status) => return status,
        };
        let result = self
            .write_client
            .create_invoice(&request)
            .await
            .map_err(Error::from);
        self.finish(result, submitted)
    }

    async fn export_preview(&self, exporter: &dyn PreviewExporterApi) -> Result<()> {
        let request = self.export_options.request_at(now_millis());
        info!("Exporting invoice preview as {}", request.filename);
        if let Err(e) = exporter.export(&request).await {
            warn!("Could not export invoice preview: {e}");
            return Err(e.into());
        }
        Ok(())
    }
}
