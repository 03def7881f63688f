use crate::{
    Address, Field, NativeAmount, Timestamp, Validate, ValidationError,
    constants::NATIVE_DECIMALS,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

const STATUS_LABEL_PAID: &str = "paid";
const STATUS_LABEL_PENDING: &str = "pending";
const STATUS_LABEL_UNPAID: &str = "unpaid";

/// The invoice as it is being typed into the submission form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInvoice {
    pub recipient_address: String,
    pub amount: String,
}

impl DraftInvoice {
    pub fn update_field(&mut self, field: Field, value: String) {
        match field {
            Field::Recipient => self.recipient_address = value,
            Field::Amount => self.amount = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipient_address.is_empty() && self.amount.is_empty()
    }

    /// Validates the draft and converts it into the payload of a contract write
    pub fn to_payload(&self) -> Result<InvoicePayload, ValidationError> {
        self.validate()?;
        Ok(InvoicePayload {
            recipient: Address::from_str(&self.recipient_address)?,
            amount: NativeAmount::from_decimal_str(&self.amount)?,
        })
    }
}

impl Validate for DraftInvoice {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.recipient_address.trim().is_empty() {
            return Err(ValidationError::FieldEmpty(Field::Recipient));
        }
        if self.amount.trim().is_empty() {
            return Err(ValidationError::FieldEmpty(Field::Amount));
        }
        Ok(())
    }
}

/// The validated content of a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePayload {
    pub recipient: Address,
    pub amount: NativeAmount,
}

/// Everything the contract write client needs to send `createInvoice(recipient, amount)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInvoiceRequest {
    pub contract_address: Address,
    /// The sending account, i.e. the connected wallet
    pub account: String,
    pub recipient: Address,
    pub amount: NativeAmount,
}

/// Identifier (hash) of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The paid flag of a contract record, which may come as a bool, a numeric flag or a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInvoiceStatus {
    Bool(bool),
    Flag(u64),
    Label(String),
}

impl RawInvoiceStatus {
    pub fn is_paid(&self) -> Result<bool, ValidationError> {
        match self {
            RawInvoiceStatus::Bool(paid) => Ok(*paid),
            RawInvoiceStatus::Flag(flag) => Ok(*flag != 0),
            RawInvoiceStatus::Label(label) => {
                let label = label.trim().to_ascii_lowercase();
                match label.as_str() {
                    STATUS_LABEL_PAID | "true" | "1" => Ok(true),
                    STATUS_LABEL_PENDING | STATUS_LABEL_UNPAID | "false" | "0" => Ok(false),
                    _ => Err(ValidationError::InvalidInvoiceStatus(label)),
                }
            }
        }
    }
}

/// An invoice as returned by `getInvoices(owner)`, in the contract's native encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInvoice {
    #[serde(deserialize_with = "deserialize_u64")]
    pub id: u64,
    /// base units
    pub amount: NativeAmount,
    pub recipient: String,
    pub status: RawInvoiceStatus,
    /// seconds
    #[serde(deserialize_with = "deserialize_u64")]
    pub timestamp: u64,
}

/// A normalized invoice, as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    pub id: u64,
    pub amount_decimal: String,
    pub recipient_address: String,
    pub paid: bool,
    pub created_at_millis: u64,
}

impl InvoiceRecord {
    pub fn status_label(&self) -> &'static str {
        if self.paid { "Paid" } else { "Pending" }
    }

    /// Creation date for display, it's valid, since the record was created from a checked timestamp
    pub fn created_at(&self) -> String {
        Timestamp::new(self.created_at_millis / crate::constants::MILLIS_PER_SECOND)
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default()
    }
}

impl TryFrom<RawInvoice> for InvoiceRecord {
    type Error = ValidationError;

    fn try_from(raw: RawInvoice) -> Result<Self, Self::Error> {
        let created = Timestamp::new(raw.timestamp)?;
        Ok(Self {
            id: raw.id,
            amount_decimal: raw.amount.to_decimal_string(),
            recipient_address: raw.recipient,
            paid: raw.status.is_paid()?,
            created_at_millis: created.as_millis(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// Deserializes a non-negative integer from either a number or a decimal string
pub fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n as u128),
        NumberOrString::Text(s) => s.trim().parse::<u128>().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid integer {s}, expected base units with {NATIVE_DECIMALS} decimals"
            ))
        }),
    }
}

fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tests::{raw_invoice_test, valid_address};
    use rstest::rstest;

    #[test]
    fn update_field_only_stores() {
        let mut draft = DraftInvoice::default();
        draft.update_field(Field::Recipient, "not an address".to_owned());
        draft.update_field(Field::Amount, "abc".to_owned());
        assert_eq!(draft.recipient_address, "not an address");
        assert_eq!(draft.amount, "abc");
    }

    #[rstest]
    #[case::no_recipient(DraftInvoice { recipient_address: "".into(), amount: "1".into() }, ValidationError::FieldEmpty(Field::Recipient))]
    #[case::blank_recipient(DraftInvoice { recipient_address: "  ".into(), amount: "1".into() }, ValidationError::FieldEmpty(Field::Recipient))]
    #[case::no_amount(DraftInvoice { recipient_address: valid_address(), amount: "".into() }, ValidationError::FieldEmpty(Field::Amount))]
    #[case::invalid_recipient(DraftInvoice { recipient_address: "0xDEF".into(), amount: "1".into() }, ValidationError::InvalidAddress("0xDEF".into()))]
    #[case::negative_amount(DraftInvoice { recipient_address: valid_address(), amount: "-2".into() }, ValidationError::NegativeAmount)]
    fn draft_payload_errors(#[case] draft: DraftInvoice, #[case] expected: ValidationError) {
        assert_eq!(draft.to_payload(), Err(expected));
    }

    #[test]
    fn draft_payload_converts_amount() {
        let draft = DraftInvoice {
            recipient_address: valid_address(),
            amount: "1.5".to_owned(),
        };
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.recipient.as_str(), valid_address());
        assert_eq!(payload.amount.base_units(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn record_from_raw() {
        let record = InvoiceRecord::try_from(raw_invoice_test()).unwrap();
        assert_eq!(
            record,
            InvoiceRecord {
                id: 1,
                amount_decimal: "1".to_owned(),
                recipient_address: "0xDEF".to_owned(),
                paid: true,
                created_at_millis: 1700000000000,
            }
        );
        assert_eq!(record.status_label(), "Paid");
        assert_eq!(record.created_at(), "2023-11-14T22:13:20Z");
    }

    #[rstest]
    #[case::bool_true(RawInvoiceStatus::Bool(true), true)]
    #[case::bool_false(RawInvoiceStatus::Bool(false), false)]
    #[case::flag_one(RawInvoiceStatus::Flag(1), true)]
    #[case::flag_zero(RawInvoiceStatus::Flag(0), false)]
    #[case::label_paid(RawInvoiceStatus::Label("Paid".into()), true)]
    #[case::label_pending(RawInvoiceStatus::Label("Pending".into()), false)]
    fn status_to_paid(#[case] status: RawInvoiceStatus, #[case] expected: bool) {
        assert_eq!(status.is_paid(), Ok(expected));
    }

    #[test]
    fn unknown_status_label_is_an_error() {
        assert_eq!(
            RawInvoiceStatus::Label("Overdue".into()).is_paid(),
            Err(ValidationError::InvalidInvoiceStatus("overdue".into()))
        );
    }

    #[test]
    fn raw_invoice_from_json() {
        let raw: RawInvoice = serde_json::from_str(
            r#"{"id":"1","amount":"1000000000000000000","recipient":"0xDEF","status":true,"timestamp":1700000000}"#,
        )
        .unwrap();
        assert_eq!(raw, raw_invoice_test());

        let raw: RawInvoice = serde_json::from_str(
            r#"{"id":2,"amount":1000,"recipient":"0x123...","status":"Pending","timestamp":"1700000000"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, 2);
        assert_eq!(raw.amount.base_units(), 1000);
        assert_eq!(raw.status, RawInvoiceStatus::Label("Pending".into()));
    }

    #[test]
    fn raw_invoice_with_bad_amount_fails() {
        let res = serde_json::from_str::<RawInvoice>(
            r#"{"id":1,"amount":"-5","recipient":"0xDEF","status":true,"timestamp":1}"#,
        );
        assert!(res.is_err());
    }
}
