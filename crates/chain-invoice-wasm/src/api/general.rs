use super::Result;
use chain_invoice_api::get_config;
use chain_invoice_core::constants::{NATIVE_DECIMALS, NATIVE_SYMBOL};
use wasm_bindgen::prelude::*;

use crate::{TSResult, context::get_ctx, data::StatusResponse};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[wasm_bindgen]
pub struct General;

#[wasm_bindgen]
impl General {
    #[wasm_bindgen]
    pub fn new() -> Self {
        General
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<StatusResponse>")]
    pub async fn status(&self) -> JsValue {
        let res: Result<StatusResponse> = async {
            let cfg = get_config();
            Ok(StatusResponse {
                version: VERSION.to_owned(),
                chain_id: cfg.chain_id,
                contract_address: cfg.contract_address.to_string(),
                native_symbol: NATIVE_SYMBOL.to_owned(),
                native_decimals: NATIVE_DECIMALS,
                wallet_connected: get_ctx().wallet.current_address().is_some(),
            })
        }
        .await;
        TSResult::res_to_js(res)
    }
}
