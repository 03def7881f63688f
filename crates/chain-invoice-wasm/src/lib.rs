#![allow(clippy::arc_with_non_send_sync)]
use chain_invoice_api::Config as ApiConfig;
use serde::{Deserialize, Serialize};
use tsify::Tsify;
use wasm_bindgen::prelude::*;

use crate::data::ExportOptionsWeb;
use crate::error::{JsErrorData, WasmError};

// the JS backed clients only exist in the browser
#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
mod context;
mod data;
mod error;
#[cfg(target_arch = "wasm32")]
mod external;

#[derive(Tsify, Debug, Clone, Deserialize)]
#[tsify(from_wasm_abi)]
pub struct Config {
    pub log_level: Option<String>,
    pub chain_id: Option<u64>,
    pub contract_address: Option<String>,
    pub export: Option<ExportOptionsWeb>,
}

impl Config {
    fn log_level(&self) -> log::LevelFilter {
        match self.log_level {
            Some(ref log_level) => match log_level.as_str() {
                "info" => log::LevelFilter::Info,
                "debug" => log::LevelFilter::Debug,
                "warn" => log::LevelFilter::Warn,
                "error" => log::LevelFilter::Error,
                "trace" => log::LevelFilter::Trace,
                _ => log::LevelFilter::Info,
            },
            None => log::LevelFilter::Info,
        }
    }

    fn to_api_config(&self) -> Result<ApiConfig> {
        let export_options = self.export.clone().map(|e| e.into());
        let cfg = ApiConfig::new(
            self.chain_id,
            self.contract_address.as_deref(),
            export_options,
        )?;
        Ok(cfg)
    }
}

pub type Result<T> = std::result::Result<T, error::WasmError>;

/// Result type for the TypeScript API
/// export type TSResult<T> = { Success: T } | { Error: JsErrorData };
/// To check if it's an error, just check `TSResult.Error` if it's not set, it's a `TSResult.Success`
/// even if `TSResult.Success` has `undefined` as a value.
#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub enum TSResult<T> {
    Success(T),
    Error(JsErrorData),
}

impl<T> TSResult<T>
where
    T: Serialize,
{
    pub fn err(e: WasmError) -> Self {
        TSResult::Error(JsErrorData::from(e))
    }

    pub fn to_js(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).expect("can serialize TSResult")
    }

    pub fn res_to_js(res: Result<T>) -> JsValue {
        match res {
            Ok(v) => Self::Success(v).to_js(),
            Err(e) => Self::err(e).to_js(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static CONTEXT: std::cell::RefCell<Option<&'static context::Context>> = const { std::cell::RefCell::new(None) } ;
}

/// Initializes the API with the wallet library's contract client and the PDF exporter.
/// Afterwards the invoice listing follows the address set via `Api.wallet().set_address`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn initialize_api(
    #[wasm_bindgen(unchecked_param_type = "Config")] cfg: JsValue,
    contract_client: external::JsInvoiceContract,
    preview_exporter: external::JsPreviewExporter,
) -> Result<()> {
    use context::{Context, get_ctx};
    use log::{debug, info};

    // init config and API
    let config: Config = serde_wasm_bindgen::from_value(cfg)?;

    // init logging
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let log_level = config.log_level();
    // only log from our own crates
    fern::Dispatch::new()
        .level(log::LevelFilter::Off)
        .level_for("chain_invoice_wasm", log_level)
        .level_for("chain_invoice_api", log_level)
        .level_for("chain_invoice_core", log_level)
        .chain(fern::Output::call(console_log::log))
        .apply()
        .map_err(|e| WasmError::Init(anyhow::anyhow!("can't initialize logging: {e}")))?;

    let api_config = config.to_api_config()?;
    chain_invoice_api::init(api_config.clone())?;
    info!("Initialized WASM API {}", api::general::VERSION);
    info!(
        "Invoice contract {} on chain {}",
        api_config.contract_address, api_config.chain_id
    );
    debug!("Config: {api_config:?}");

    // init context as static reference
    let ctx = Context::new(&api_config, contract_client, preview_exporter);
    CONTEXT.with(|context| {
        let mut context_ref = context.borrow_mut();
        if context_ref.is_none() {
            let leaked: &'static Context = Box::leak(Box::new(ctx)); // leak to get a static ref
            *context_ref = Some(leaked);
        }
    });

    // follow the connected wallet with the invoice listing
    wasm_bindgen_futures::spawn_local(async move {
        let ctx = get_ctx();
        let mut changes = ctx.wallet.subscribe();
        let mut last = ctx.wallet.current_address();
        spawn_listing_refresh(last.clone());
        loop {
            let address = match changes.recv().await {
                Ok(address) => address,
                Err(async_broadcast::RecvError::Overflowed(skipped)) => {
                    debug!("Skipped {skipped} wallet changes");
                    ctx.wallet.current_address()
                }
                Err(async_broadcast::RecvError::Closed) => break,
            };
            if address != last {
                last.clone_from(&address);
                spawn_listing_refresh(address);
            }
        }
        info!("Stopped following wallet changes");
    });
    Ok(())
}

/// Every refresh runs on its own, the listing service only applies the latest one
#[cfg(target_arch = "wasm32")]
fn spawn_listing_refresh(address: Option<String>) {
    wasm_bindgen_futures::spawn_local(async move {
        context::get_ctx().listing_service.refresh(address).await;
    });
}
