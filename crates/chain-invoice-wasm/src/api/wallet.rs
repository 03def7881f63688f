use super::Result;
use crate::{TSResult, context::get_ctx};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Wallet;

#[wasm_bindgen]
impl Wallet {
    #[wasm_bindgen]
    pub fn new() -> Self {
        Wallet
    }

    /// Called by the app whenever the wallet provider connects, switches accounts or
    /// disconnects (`undefined`). The listing follows on its own.
    #[wasm_bindgen(unchecked_return_type = "TSResult<boolean>")]
    pub fn set_address(&self, address: Option<String>) -> JsValue {
        let res: Result<bool> = Ok(get_ctx().wallet.set_address(address));
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<string | undefined>")]
    pub fn current_address(&self) -> JsValue {
        let res: Result<Option<String>> = Ok(get_ctx().wallet.current_address());
        TSResult::res_to_js(res)
    }
}
