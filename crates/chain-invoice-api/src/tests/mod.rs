#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use crate::external::contract::{
        self, InvoiceContractReadApi, InvoiceContractWriteApi, Result,
    };
    use async_trait::async_trait;
    use chain_invoice_core::{
        Address, NativeAmount, ServiceTraitBounds,
        invoice::{CreateInvoiceRequest, RawInvoice, RawInvoiceStatus, TransactionId},
    };
    use std::{collections::HashMap, str::FromStr, sync::Mutex};
    use tokio::sync::oneshot;

    pub fn contract_address_test() -> Address {
        Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap()
    }

    pub fn recipient_test() -> String {
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_owned()
    }

    pub fn wallet_test() -> String {
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned()
    }

    pub fn tx_id_test() -> TransactionId {
        TransactionId::new("0x2c1f0f2e6f0bfa6a8d0f4f6c9f3e8d5a1b2c3d4e5f60718293a4b5c6d7e8f901")
    }

    pub fn raw_invoice(id: u64, recipient: &str, base_units: u128, paid: bool) -> RawInvoice {
        RawInvoice {
            id,
            amount: NativeAmount::from_base_units(base_units),
            recipient: recipient.to_owned(),
            status: RawInvoiceStatus::Bool(paid),
            timestamp: 1700000000 + id,
        }
    }

    /// Read client whose responses are released by the test, per owner
    #[derive(Default)]
    pub struct GatedReadClient {
        gates: Mutex<HashMap<String, oneshot::Receiver<Vec<RawInvoice>>>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl GatedReadClient {
        pub fn gate(&self, owner: &str) -> oneshot::Sender<Vec<RawInvoice>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(owner.to_owned(), rx);
            tx
        }
    }

    impl ServiceTraitBounds for GatedReadClient {}

    #[async_trait]
    impl InvoiceContractReadApi for GatedReadClient {
        async fn get_invoices(
            &self,
            _contract_address: &Address,
            owner: &str,
        ) -> Result<Vec<RawInvoice>> {
            self.calls.lock().unwrap().push(owner.to_owned());
            let gate = self.gates.lock().unwrap().remove(owner);
            match gate {
                Some(rx) => rx
                    .await
                    .map_err(|_| contract::Error::Read("gate dropped".to_owned()).into()),
                None => Err(contract::Error::Read(format!("no gate for {owner}")).into()),
            }
        }
    }

    /// Write client that only finishes once the test releases it
    #[derive(Default)]
    pub struct GatedWriteClient {
        gate: Mutex<Option<oneshot::Receiver<TransactionId>>>,
        pub calls: Mutex<Vec<CreateInvoiceRequest>>,
    }

    impl GatedWriteClient {
        pub fn gate(&self) -> oneshot::Sender<TransactionId> {
            let (tx, rx) = oneshot::channel();
            *self.gate.lock().unwrap() = Some(rx);
            tx
        }
    }

    impl ServiceTraitBounds for GatedWriteClient {}

    #[async_trait]
    impl InvoiceContractWriteApi for GatedWriteClient {
        async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<TransactionId> {
            self.calls.lock().unwrap().push(request.clone());
            let gate = self.gate.lock().unwrap().take();
            match gate {
                Some(rx) => rx
                    .await
                    .map_err(|_| contract::Error::Write("gate dropped".to_owned()).into()),
                None => Err(contract::Error::Write("no gate".to_owned()).into()),
            }
        }
    }
}
