use crate::invoice::{InvoiceRecord, TransactionId};
use serde::Serialize;

/// State of the invoice submission screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(TransactionId),
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// State of the invoice listing screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub enum ListingStatus {
    #[default]
    NoWallet,
    Loading,
    Loaded(Vec<InvoiceRecord>),
    Failed(String),
}

impl ListingStatus {
    pub fn records(&self) -> &[InvoiceRecord] {
        match self {
            ListingStatus::Loaded(records) => records,
            _ => &[],
        }
    }
}
