use super::Result;
use crate::{TSResult, context::get_ctx, data::invoice::ListingStatusWeb};
use async_broadcast::RecvError;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Listing;

#[wasm_bindgen]
impl Listing {
    #[wasm_bindgen]
    pub fn new() -> Self {
        Listing
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<ListingStatusWeb>")]
    pub fn status(&self) -> JsValue {
        let res: Result<ListingStatusWeb> = Ok(get_ctx().listing_service.status().into());
        TSResult::res_to_js(res)
    }

    /// Reloads the invoices of the connected wallet
    #[wasm_bindgen(unchecked_return_type = "TSResult<ListingStatusWeb>")]
    pub async fn refresh(&self) -> JsValue {
        let res: Result<ListingStatusWeb> = async {
            let status = get_ctx().listing_service.refresh_current().await;
            Ok(status.into())
        }
        .await;
        TSResult::res_to_js(res)
    }

    /// Calls `callback` with every new `ListingStatusWeb`
    #[wasm_bindgen]
    pub async fn subscribe(&self, callback: js_sys::Function) {
        wasm_bindgen_futures::spawn_local(async move {
            info!("Subscribed to listing status");
            let mut receiver = get_ctx().listing_service.subscribe();
            loop {
                let status = match receiver.recv().await {
                    Ok(status) => status,
                    Err(RecvError::Overflowed(skipped)) => {
                        warn!("Listing subscriber missed {skipped} status updates");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                match serde_wasm_bindgen::to_value(&ListingStatusWeb::from(status)) {
                    Ok(event) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &event) {
                            error!("Error while sending listing status: {e:?}");
                        }
                    }
                    Err(e) => {
                        error!("Error while serializing listing status: {e}");
                    }
                }
            }
        });
    }
}
