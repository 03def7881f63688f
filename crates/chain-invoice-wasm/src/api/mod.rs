use super::Result;
use wasm_bindgen::prelude::*;

pub mod general;
pub mod listing;
pub mod submission;
pub mod wallet;

#[wasm_bindgen]
pub struct Api;

#[wasm_bindgen]
impl Api {
    #[wasm_bindgen]
    pub fn general() -> general::General {
        general::General::new()
    }

    #[wasm_bindgen]
    pub fn wallet() -> wallet::Wallet {
        wallet::Wallet::new()
    }

    #[wasm_bindgen]
    pub fn submission() -> submission::Submission {
        submission::Submission::new()
    }

    #[wasm_bindgen]
    pub fn listing() -> listing::Listing {
        listing::Listing::new()
    }
}
