use super::Result;
use crate::{
    TSResult,
    context::get_ctx,
    data::invoice::{DraftInvoiceWeb, FieldWeb, SubmissionStatusWeb},
    external::PreviewRegionExporter,
};
use async_broadcast::RecvError;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Submission;

#[wasm_bindgen]
impl Submission {
    #[wasm_bindgen]
    pub fn new() -> Self {
        Submission
    }

    /// Sets one field of the draft, returns the updated draft
    #[wasm_bindgen(unchecked_return_type = "TSResult<DraftInvoiceWeb>")]
    pub fn update_field(
        &self,
        #[wasm_bindgen(unchecked_param_type = "FieldWeb")] field: JsValue,
        value: String,
    ) -> JsValue {
        let res: Result<DraftInvoiceWeb> = (|| {
            let field: FieldWeb = serde_wasm_bindgen::from_value(field)?;
            let submission_service = &get_ctx().submission_service;
            submission_service.update_field(field.into(), value);
            Ok(submission_service.draft().into())
        })();
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<DraftInvoiceWeb>")]
    pub fn draft(&self) -> JsValue {
        let res: Result<DraftInvoiceWeb> = Ok(get_ctx().submission_service.draft().into());
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<SubmissionStatusWeb>")]
    pub fn status(&self) -> JsValue {
        let res: Result<SubmissionStatusWeb> = Ok(get_ctx().submission_service.status().into());
        TSResult::res_to_js(res)
    }

    /// Submits the draft, failures are reported in the returned status
    #[wasm_bindgen(unchecked_return_type = "TSResult<SubmissionStatusWeb>")]
    pub async fn submit(&self) -> JsValue {
        let res: Result<SubmissionStatusWeb> = async {
            let status = get_ctx().submission_service.submit().await;
            Ok(status.into())
        }
        .await;
        TSResult::res_to_js(res)
    }

    /// Exports the rendered preview `element` as a document
    #[wasm_bindgen(unchecked_return_type = "TSResult<void>")]
    pub async fn export_preview(
        &self,
        #[wasm_bindgen(unchecked_param_type = "HTMLElement")] element: JsValue,
    ) -> JsValue {
        let res: Result<()> = async {
            let ctx = get_ctx();
            let exporter = PreviewRegionExporter::new(ctx.preview_exporter.clone(), element);
            ctx.submission_service.export_preview(&exporter).await?;
            Ok(())
        }
        .await;
        TSResult::res_to_js(res)
    }

    /// Calls `callback` with every new `SubmissionStatusWeb`
    #[wasm_bindgen]
    pub async fn subscribe(&self, callback: js_sys::Function) {
        wasm_bindgen_futures::spawn_local(async move {
            info!("Subscribed to submission status");
            let mut receiver = get_ctx().submission_service.subscribe();
            loop {
                let status = match receiver.recv().await {
                    Ok(status) => status,
                    Err(RecvError::Overflowed(skipped)) => {
                        warn!("Submission subscriber missed {skipped} status updates");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                match serde_wasm_bindgen::to_value(&SubmissionStatusWeb::from(status)) {
                    Ok(event) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &event) {
                            error!("Error while sending submission status: {e:?}");
                        }
                    }
                    Err(e) => {
                        error!("Error while serializing submission status: {e}");
                    }
                }
            }
        });
    }
}
