use crate::data::invoice::CreateInvoiceCallWeb;
use async_trait::async_trait;
use chain_invoice_api::external::{
    contract::{self, InvoiceContractReadApi, InvoiceContractWriteApi},
    export::{self, PreviewExporterApi},
};
use chain_invoice_core::{
    Address, ServiceTraitBounds,
    export::ExportRequest,
    invoice::{CreateInvoiceRequest, RawInvoice, TransactionId},
};
use log::debug;
use serde::Serialize;
use wasm_bindgen::{JsCast, prelude::*};

#[wasm_bindgen(typescript_custom_section)]
const TS_CLIENT_INTERFACES: &'static str = r#"
/**
 * Contract access through the wallet library, e.g. viem's simulateContract/writeContract/readContract.
 * Rejected promises should carry a `shortMessage` or `message`, which is shown to the user.
 */
export interface InvoiceContract {
  /** Simulates and sends createInvoice(recipient, BigInt(call.amount)), resolves to the transaction hash */
  createInvoice(call: CreateInvoiceCallWeb): Promise<string>;
  /** Calls getInvoices(owner), amounts and timestamps may be bigints */
  getInvoices(contractAddress: string, owner: string): Promise<{
    id: bigint | number | string;
    amount: bigint | number | string;
    recipient: string;
    status: boolean | number | string;
    timestamp: bigint | number | string;
  }[]>;
}

/** Renders an element into a downloadable document, e.g. html2pdf().set(options).from(element).save() */
export interface PreviewExporter {
  exportPdf(element: HTMLElement, options: any): Promise<void>;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "InvoiceContract")]
    #[derive(Debug, Clone)]
    pub type JsInvoiceContract;

    #[wasm_bindgen(method, catch, js_name = createInvoice)]
    async fn create_invoice(this: &JsInvoiceContract, call: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getInvoices)]
    async fn get_invoices(
        this: &JsInvoiceContract,
        contract_address: String,
        owner: String,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(typescript_type = "PreviewExporter")]
    #[derive(Debug, Clone)]
    pub type JsPreviewExporter;

    #[wasm_bindgen(method, catch, js_name = exportPdf)]
    async fn export_pdf(
        this: &JsPreviewExporter,
        element: JsValue,
        options: JsValue,
    ) -> Result<JsValue, JsValue>;
}

/// Invoice contract client backed by the wallet library on the JS side
#[derive(Debug, Clone)]
pub struct JsContractClient {
    contract: JsInvoiceContract,
    chain_id: u64,
}

impl JsContractClient {
    pub fn new(contract: JsInvoiceContract, chain_id: u64) -> Self {
        Self { contract, chain_id }
    }
}

impl ServiceTraitBounds for JsContractClient {}

#[async_trait(?Send)]
impl InvoiceContractWriteApi for JsContractClient {
    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> contract::Result<TransactionId> {
        let call = to_js_value(&CreateInvoiceCallWeb::new(request, self.chain_id))
            .map_err(|e| contract::Error::Write(e.to_string()))?;
        let res = self
            .contract
            .create_invoice(call)
            .await
            .map_err(|e| contract::Error::Write(js_error_message(&e)))?;
        let tx_id = res.as_string().ok_or_else(|| {
            contract::Error::InvalidResponse(format!("expected a transaction hash, got {res:?}"))
        })?;
        debug!("Sent createInvoice in transaction {tx_id}");
        Ok(TransactionId::new(tx_id))
    }
}

#[async_trait(?Send)]
impl InvoiceContractReadApi for JsContractClient {
    async fn get_invoices(
        &self,
        contract_address: &Address,
        owner: &str,
    ) -> contract::Result<Vec<RawInvoice>> {
        let res = self
            .contract
            .get_invoices(contract_address.to_string(), owner.to_owned())
            .await
            .map_err(|e| contract::Error::Read(js_error_message(&e)))?;
        let normalized = stringify_bigints(&res)
            .map_err(|e| contract::Error::InvalidResponse(js_error_message(&e)))?;
        let invoices: Vec<RawInvoice> = serde_wasm_bindgen::from_value(normalized)
            .map_err(|e| contract::Error::InvalidResponse(e.to_string()))?;
        Ok(invoices)
    }
}

/// Exports one preview element with the JS exporter
#[derive(Debug, Clone)]
pub struct PreviewRegionExporter {
    exporter: JsPreviewExporter,
    region: JsValue,
}

impl PreviewRegionExporter {
    pub fn new(exporter: JsPreviewExporter, region: JsValue) -> Self {
        Self { exporter, region }
    }
}

impl ServiceTraitBounds for PreviewRegionExporter {}

#[async_trait(?Send)]
impl PreviewExporterApi for PreviewRegionExporter {
    async fn export(&self, request: &ExportRequest) -> export::Result<()> {
        if self.region.is_null() || self.region.is_undefined() {
            return Err(export::Error::Export("no preview to export".to_owned()).into());
        }
        let options = to_js_value(&request.to_exporter_options())
            .map_err(|e| export::Error::Export(e.to_string()))?;
        self.exporter
            .export_pdf(self.region.clone(), options)
            .await
            .map_err(|e| export::Error::Export(js_error_message(&e)))?;
        Ok(())
    }
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Wallet libraries put a readable reason into `shortMessage`, the full one into `message`
fn js_error_message(err: &JsValue) -> String {
    if err.is_object() {
        for key in ["shortMessage", "message"] {
            let msg = js_sys::Reflect::get(err, &JsValue::from_str(key))
                .ok()
                .and_then(|msg| msg.as_string())
                .filter(|msg| !msg.trim().is_empty());
            if let Some(msg) = msg {
                return msg;
            }
        }
    }
    err.as_string().unwrap_or_default()
}

/// Contract reads return uint256 values as bigints, which serde can't take directly
fn stringify_bigints(value: &JsValue) -> Result<JsValue, JsValue> {
    if value.is_bigint() {
        let big: &js_sys::BigInt = value.unchecked_ref();
        return Ok(big.to_string(10)?.into());
    }
    if js_sys::Array::is_array(value) {
        let arr: &js_sys::Array = value.unchecked_ref();
        let res = js_sys::Array::new();
        for v in arr.iter() {
            res.push(&stringify_bigints(&v)?);
        }
        return Ok(res.into());
    }
    if value.is_object() {
        let res = js_sys::Object::new();
        for key in js_sys::Reflect::own_keys(value)?.iter() {
            let prop = js_sys::Reflect::get(value, &key)?;
            if !js_sys::Reflect::set(&res, &key, &stringify_bigints(&prop)?)? {
                return Err(JsValue::from_str(&format!("could not copy property {key:?}")));
            }
        }
        return Ok(res.into());
    }
    Ok(value.clone())
}
