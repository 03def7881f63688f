use anyhow::{Result, anyhow};
use chain_invoice_core::{
    Address,
    constants::{DEFAULT_CHAIN_ID, INVOICE_CONTRACT_ADDRESS},
    export::ExportOptions,
};
use std::{str::FromStr, sync::OnceLock};

pub mod constants;
pub mod external;
pub mod service;
#[cfg(test)]
mod tests;
pub mod util;
pub mod wallet;

pub use wallet::WalletContext;

#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the chain the invoice contract lives on
    pub chain_id: u64,
    /// The invoice contract both the submission and the listing talk to
    pub contract_address: Address,
    pub export_options: ExportOptions,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn new(
        chain_id: Option<u64>,
        contract_address: Option<&str>,
        export_options: Option<ExportOptions>,
    ) -> Result<Self> {
        let contract_address =
            Address::from_str(contract_address.unwrap_or(INVOICE_CONTRACT_ADDRESS))
                .map_err(|e| anyhow!("Invalid invoice contract address: {e}"))?;
        let export_options = export_options.unwrap_or_default();
        export_options
            .validate()
            .map_err(|e| anyhow!("Invalid export options: {e}"))?;
        Ok(Self {
            chain_id: chain_id.unwrap_or(DEFAULT_CHAIN_ID),
            contract_address,
            export_options,
        })
    }
}

pub fn init(conf: Config) -> Result<()> {
    CONFIG
        .set(conf)
        .map_err(|e| anyhow!("Could not initialize Invoice API: {e:?}"))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Invoice API is not initialized")
}
