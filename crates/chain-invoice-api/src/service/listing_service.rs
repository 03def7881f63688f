use super::Result;
use crate::{
    WalletContext, constants::LISTING_FALLBACK_MESSAGE, external::contract::InvoiceContractReadApi,
    util::StatusFeed,
};
use async_broadcast::Receiver;
use async_trait::async_trait;
use chain_invoice_core::{
    Address, ServiceTraitBounds, ValidationError, invoice::InvoiceRecord, status::ListingStatus,
};
use log::{debug, error, info};
use std::sync::{Arc, Mutex};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ListingServiceApi: ServiceTraitBounds {
    /// Returns the current listing status
    fn status(&self) -> ListingStatus;

    /// Subscribe to all status transitions
    fn subscribe(&self) -> Receiver<ListingStatus>;

    /// Loads all invoices of the given wallet, replacing the current list.
    /// Only the latest refresh is applied, results of older, still running ones are discarded.
    /// Returns the status after the refresh.
    async fn refresh(&self, wallet_address: Option<String>) -> ListingStatus;

    /// Refreshes for the currently connected wallet
    async fn refresh_current(&self) -> ListingStatus;
}

struct ListingState {
    /// incremented with every refresh, results are only applied for the latest one
    epoch: u64,
    status: ListingStatus,
}

pub struct ListingService {
    read_client: Arc<dyn InvoiceContractReadApi>,
    wallet: Arc<WalletContext>,
    contract_address: Address,
    state: Mutex<ListingState>,
    status_feed: StatusFeed<ListingStatus>,
}

impl ListingService {
    pub fn new(
        read_client: Arc<dyn InvoiceContractReadApi>,
        wallet: Arc<WalletContext>,
        contract_address: Address,
    ) -> Self {
        Self {
            read_client,
            wallet,
            contract_address,
            state: Mutex::new(ListingState {
                epoch: 0,
                status: ListingStatus::NoWallet,
            }),
            status_feed: StatusFeed::new(),
        }
    }

    /// Starts a new epoch, returns it together with the owner to fetch for, if there is one
    fn begin(&self, wallet_address: Option<String>) -> (u64, Option<String>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.epoch += 1;
        state.status = match wallet_address {
            Some(_) => ListingStatus::Loading,
            None => ListingStatus::NoWallet,
        };
        self.status_feed.publish(state.status.clone());
        (state.epoch, wallet_address)
    }

    async fn fetch(&self, owner: &str) -> Result<Vec<InvoiceRecord>> {
        let raw = self
            .read_client
            .get_invoices(&self.contract_address, owner)
            .await?;
        let records = raw
            .into_iter()
            .map(InvoiceRecord::try_from)
            .collect::<std::result::Result<Vec<_>, ValidationError>>()?;
        Ok(records)
    }

    fn apply(&self, epoch: u64, status: ListingStatus) -> ListingStatus {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.epoch != epoch {
            debug!(
                "Discarding stale invoice list of refresh {epoch}, latest is {}",
                state.epoch
            );
            return state.status.clone();
        }
        state.status = status;
        self.status_feed.publish(state.status.clone());
        state.status.clone()
    }
}

impl ServiceTraitBounds for ListingService {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ListingServiceApi for ListingService {
    fn status(&self) -> ListingStatus {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .status
            .clone()
    }

    fn subscribe(&self) -> Receiver<ListingStatus> {
        self.status_feed.subscribe()
    }

    async fn refresh(&self, wallet_address: Option<String>) -> ListingStatus {
        let (epoch, owner) = self.begin(wallet_address);
        let owner = match owner {
            Some(owner) => owner,
            None => {
                debug!("No wallet connected - not loading invoices");
                return ListingStatus::NoWallet;
            }
        };

        let status = match self.fetch(&owner).await {
            Ok(records) => {
                info!("Loaded {} invoices for {owner}", records.len());
                ListingStatus::Loaded(records)
            }
            Err(e) => {
                error!("Could not load invoices for {owner}: {e}");
                ListingStatus::Failed(e.user_message(LISTING_FALLBACK_MESSAGE))
            }
        };
        self.apply(epoch, status)
    }

    async fn refresh_current(&self) -> ListingStatus {
        self.refresh(self.wallet.current_address()).await
    }
}
