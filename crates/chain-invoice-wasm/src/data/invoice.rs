use chain_invoice_core::{
    Field,
    invoice::{CreateInvoiceRequest, DraftInvoice, InvoiceRecord},
    status::{ListingStatus, SubmissionStatus},
};
use serde::{Deserialize, Serialize};
use tsify::Tsify;
use wasm_bindgen::prelude::*;

#[derive(Tsify, Debug, Copy, Clone, Serialize, Deserialize)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum FieldWeb {
    Recipient,
    Amount,
}

impl From<FieldWeb> for Field {
    fn from(val: FieldWeb) -> Self {
        match val {
            FieldWeb::Recipient => Field::Recipient,
            FieldWeb::Amount => Field::Amount,
        }
    }
}

#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub struct DraftInvoiceWeb {
    pub recipient_address: String,
    pub amount: String,
}

impl From<DraftInvoice> for DraftInvoiceWeb {
    fn from(val: DraftInvoice) -> Self {
        DraftInvoiceWeb {
            recipient_address: val.recipient_address,
            amount: val.amount,
        }
    }
}

#[derive(Tsify, Debug, Clone, PartialEq, Serialize)]
#[tsify(into_wasm_abi)]
#[serde(tag = "state")]
pub enum SubmissionStatusWeb {
    Idle,
    Pending,
    Succeeded { tx_id: String },
    Failed { message: String },
}

impl From<SubmissionStatus> for SubmissionStatusWeb {
    fn from(val: SubmissionStatus) -> Self {
        match val {
            SubmissionStatus::Idle => SubmissionStatusWeb::Idle,
            SubmissionStatus::Pending => SubmissionStatusWeb::Pending,
            SubmissionStatus::Succeeded(tx_id) => SubmissionStatusWeb::Succeeded {
                tx_id: tx_id.to_string(),
            },
            SubmissionStatus::Failed(message) => SubmissionStatusWeb::Failed { message },
        }
    }
}

#[derive(Tsify, Debug, Clone, PartialEq, Serialize)]
#[tsify(into_wasm_abi)]
pub struct InvoiceRecordWeb {
    pub id: u64,
    pub amount: String,
    pub recipient_address: String,
    pub paid: bool,
    pub status_label: String,
    pub created_at_millis: u64,
    pub created_at: String,
}

impl From<InvoiceRecord> for InvoiceRecordWeb {
    fn from(val: InvoiceRecord) -> Self {
        InvoiceRecordWeb {
            status_label: val.status_label().to_owned(),
            created_at: val.created_at(),
            id: val.id,
            amount: val.amount_decimal,
            recipient_address: val.recipient_address,
            paid: val.paid,
            created_at_millis: val.created_at_millis,
        }
    }
}

#[derive(Tsify, Debug, Clone, PartialEq, Serialize)]
#[tsify(into_wasm_abi)]
#[serde(tag = "state")]
pub enum ListingStatusWeb {
    NoWallet,
    Loading,
    Loaded { invoices: Vec<InvoiceRecordWeb> },
    Failed { message: String },
}

impl From<ListingStatus> for ListingStatusWeb {
    fn from(val: ListingStatus) -> Self {
        match val {
            ListingStatus::NoWallet => ListingStatusWeb::NoWallet,
            ListingStatus::Loading => ListingStatusWeb::Loading,
            ListingStatus::Loaded(records) => ListingStatusWeb::Loaded {
                invoices: records.into_iter().map(|r| r.into()).collect(),
            },
            ListingStatus::Failed(message) => ListingStatusWeb::Failed { message },
        }
    }
}

/// The `createInvoice(recipient, amount)` call handed to the wallet library,
/// `amount` is in base units and has to be passed on as a `bigint`
#[derive(Tsify, Debug, Clone, PartialEq, Serialize)]
#[tsify(into_wasm_abi)]
pub struct CreateInvoiceCallWeb {
    pub contract_address: String,
    pub chain_id: u64,
    pub account: String,
    pub recipient: String,
    pub amount: String,
}

impl CreateInvoiceCallWeb {
    pub fn new(request: &CreateInvoiceRequest, chain_id: u64) -> Self {
        CreateInvoiceCallWeb {
            contract_address: request.contract_address.to_string(),
            chain_id,
            account: request.account.clone(),
            recipient: request.recipient.to_string(),
            amount: request.amount.base_units().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_invoice_core::{Address, NativeAmount, invoice::TransactionId};
    use std::str::FromStr;

    fn record() -> InvoiceRecord {
        InvoiceRecord {
            id: 7,
            amount_decimal: "1.5".to_owned(),
            recipient_address: "0xDEF".to_owned(),
            paid: false,
            created_at_millis: 1700000000000,
        }
    }

    #[test]
    fn invoice_record_web() {
        let web = InvoiceRecordWeb::from(record());
        assert_eq!(web.id, 7);
        assert_eq!(web.amount, "1.5");
        assert_eq!(web.status_label, "Pending");
        assert_eq!(web.created_at, "2023-11-14T22:13:20Z");
        assert_eq!(web.created_at_millis, 1700000000000);
    }

    #[test]
    fn status_serialization_is_tagged() {
        let status: SubmissionStatusWeb =
            SubmissionStatus::Succeeded(TransactionId::new("0xabc")).into();
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({ "state": "Succeeded", "tx_id": "0xabc" })
        );

        let status: ListingStatusWeb = ListingStatus::Loaded(vec![record()]).into();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "Loaded");
        assert_eq!(json["invoices"][0]["status_label"], "Pending");

        let status: ListingStatusWeb = ListingStatus::NoWallet.into();
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({ "state": "NoWallet" })
        );
    }

    #[test]
    fn create_invoice_call_uses_base_units() {
        let request = CreateInvoiceRequest {
            contract_address: Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3")
                .unwrap(),
            account: "0xABC".to_owned(),
            recipient: Address::from_str("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap(),
            amount: NativeAmount::from_decimal_str("0.5").unwrap(),
        };
        let call = CreateInvoiceCallWeb::new(&request, 97);
        assert_eq!(call.amount, "500000000000000000");
        assert_eq!(call.account, "0xABC");
        assert_eq!(call.chain_id, 97);
        assert_eq!(
            call.recipient,
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        );
    }
}
