use crate::util::StatusFeed;
use async_broadcast::Receiver;
use log::info;
use std::sync::Mutex;

/// Holds the account of the connected wallet.
///
/// The wallet provider owns the connection and pushes every change in here via
/// [`WalletContext::set_address`], the services only read the current value or subscribe to
/// changes.
pub struct WalletContext {
    current: Mutex<Option<String>>,
    changes: StatusFeed<Option<String>>,
}

impl WalletContext {
    pub fn new(address: Option<String>) -> Self {
        Self {
            current: Mutex::new(normalize(address)),
            changes: StatusFeed::new(),
        }
    }

    pub fn current_address(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Sets the connected account, `None` or a blank address means disconnected.
    /// Subscribers are only notified if the address actually changed, returns whether it did.
    pub fn set_address(&self, address: Option<String>) -> bool {
        let address = normalize(address);
        {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            if *current == address {
                return false;
            }
            current.clone_from(&address);
        }
        match address {
            Some(ref a) => info!("Wallet connected with account {a}"),
            None => info!("Wallet disconnected"),
        }
        self.changes.publish(address);
        true
    }

    /// Stream of distinct wallet addresses, starting with the next change
    pub fn subscribe(&self) -> Receiver<Option<String>> {
        self.changes.subscribe()
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new(None)
    }
}

fn normalize(address: Option<String>) -> Option<String> {
    address
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
}
