use chain_invoice_api::external::{
    self, contract::Error as ContractError, export::Error as ExportError,
};
use chain_invoice_api::service::Error as ServiceError;
use chain_invoice_core::ValidationError;
use log::error;
use serde::Serialize;
use thiserror::Error;
use tsify::Tsify;
use wasm_bindgen::prelude::*;

#[derive(Debug, Error)]
pub enum WasmError {
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("wasm serialization error: {0}")]
    WasmSerialization(#[from] serde_wasm_bindgen::Error),

    #[error("api init error: {0}")]
    Init(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Tsify, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[tsify(into_wasm_abi)]
enum JsErrorType {
    WalletNotConnected,
    FieldEmpty,
    InvalidAddress,
    InvalidAmount,
    NegativeAmount,
    TooManyDecimals,
    AmountOverflow,
    InvalidTimestamp,
    InvalidInvoiceStatus,
    InvalidFilenamePattern,
    // external
    ContractWrite,
    ContractRead,
    ContractResponse,
    Export,
    // general
    Serialization,
    Init,
}

#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub struct JsErrorData {
    error: JsErrorType,
    message: String,
    code: u16,
}

impl From<WasmError> for JsValue {
    fn from(error: WasmError) -> JsValue {
        serde_wasm_bindgen::to_value(&JsErrorData::from(error)).expect("can serialize error")
    }
}

impl From<WasmError> for JsErrorData {
    fn from(error: WasmError) -> JsErrorData {
        error!("{error}");
        match error {
            WasmError::Service(e) => match e {
                ServiceError::Validation(e) => validation_error_data(e),
                ServiceError::ExternalApi(e) => external_error_data(e),
            },
            WasmError::Validation(e) => validation_error_data(e),
            WasmError::WasmSerialization(e) => err_500(e, JsErrorType::Serialization),
            WasmError::Init(e) => err_500(e, JsErrorType::Init),
        }
    }
}

fn external_error_data(e: external::Error) -> JsErrorData {
    match e {
        external::Error::Contract(e) => match e {
            ContractError::Write(_) => err_500(e, JsErrorType::ContractWrite),
            ContractError::Read(_) => err_500(e, JsErrorType::ContractRead),
            ContractError::InvalidResponse(_) => err_500(e, JsErrorType::ContractResponse),
        },
        external::Error::Export(e) => match e {
            ExportError::Export(_) => err_500(e, JsErrorType::Export),
        },
    }
}

fn validation_error_data(e: ValidationError) -> JsErrorData {
    match e {
        ValidationError::WalletNotConnected => err_400(e, JsErrorType::WalletNotConnected),
        ValidationError::FieldEmpty(_) => err_400(e, JsErrorType::FieldEmpty),
        ValidationError::InvalidAddress(_) => err_400(e, JsErrorType::InvalidAddress),
        ValidationError::InvalidAmount(_) => err_400(e, JsErrorType::InvalidAmount),
        ValidationError::NegativeAmount => err_400(e, JsErrorType::NegativeAmount),
        ValidationError::TooManyDecimals(_) => err_400(e, JsErrorType::TooManyDecimals),
        ValidationError::AmountOverflow => err_400(e, JsErrorType::AmountOverflow),
        ValidationError::InvalidTimestamp(_) => err_400(e, JsErrorType::InvalidTimestamp),
        ValidationError::InvalidInvoiceStatus(_) => {
            err_400(e, JsErrorType::InvalidInvoiceStatus)
        }
        ValidationError::InvalidFilenamePattern(_) => {
            err_400(e, JsErrorType::InvalidFilenamePattern)
        }
    }
}

fn err_400<E: ToString>(e: E, t: JsErrorType) -> JsErrorData {
    JsErrorData {
        error: t,
        message: e.to_string(),
        code: 400,
    }
}

fn err_500<E: ToString>(e: E, t: JsErrorType) -> JsErrorData {
    JsErrorData {
        error: t,
        message: e.to_string(),
        code: 500,
    }
}
