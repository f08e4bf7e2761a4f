use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::domain::{OperatorId, Transaction};
use crate::ledger_actor::{DailySummary, LedgerError};
use crate::messages::LedgerRequest;

/// Client for the ledger service.
#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
}

impl LedgerClient {
    pub fn new(sender: mpsc::Sender<LedgerRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), LedgerError> {
        debug!("Sending request");
        self.sender
            .send(LedgerRequest::Shutdown)
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(LedgerClient => fn append(transaction: Transaction) -> usize as LedgerRequest::Append, Error = LedgerError);
client_method!(LedgerClient => fn summary() -> DailySummary as LedgerRequest::Summary, Error = LedgerError);
client_method!(LedgerClient => fn transactions() -> Vec<Transaction> as LedgerRequest::Transactions, Error = LedgerError);
client_method!(LedgerClient => fn reset_day(admin: OperatorId) -> usize as LedgerRequest::ResetDay, Error = LedgerError);
