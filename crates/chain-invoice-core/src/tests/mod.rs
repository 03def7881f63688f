#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use crate::{
        NativeAmount,
        invoice::{RawInvoice, RawInvoiceStatus},
    };

    pub fn valid_address() -> String {
        "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_owned()
    }

    pub fn raw_invoice_test() -> RawInvoice {
        RawInvoice {
            id: 1,
            amount: NativeAmount::from_base_units(1_000_000_000_000_000_000),
            recipient: "0xDEF".to_owned(),
            status: RawInvoiceStatus::Bool(true),
            timestamp: 1700000000,
        }
    }
}
