use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use crate::clients::LedgerClient;
use crate::domain::money::format_rupiah;
use crate::domain::{OperatorId, Transaction};
use crate::ledger_actor::{daily_summary, DailySummary, LedgerError};
use crate::messages::{LedgerRequest, ServiceResponse};

// =============================================================================
// LEDGER SERVICE
// =============================================================================

/// Owns the day's transactions. Appends, summaries and resets are processed one message
/// at a time, so concurrent checkouts can never lose an entry.
pub struct LedgerService {
    receiver: mpsc::Receiver<LedgerRequest>,
    transactions: Vec<Transaction>,
}

impl LedgerService {
    pub fn new(buffer_size: usize) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            transactions: Vec::new(),
        };
        let client = LedgerClient::new(sender);
        (service, client)
    }

    #[instrument(name = "ledger_service", skip(self))]
    pub async fn run(mut self) {
        info!("LedgerService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Append { transaction, respond_to } => {
                    self.handle_append(transaction, respond_to);
                }
                LedgerRequest::Summary { respond_to } => {
                    self.handle_summary(respond_to);
                }
                LedgerRequest::Transactions { respond_to } => {
                    let _ = respond_to.send(Ok(self.transactions.clone()));
                }
                LedgerRequest::ResetDay { admin, respond_to } => {
                    self.handle_reset_day(admin, respond_to);
                }
                LedgerRequest::Shutdown => {
                    info!("LedgerService shutting down");
                    break;
                }
            }
        }
        info!(transactions = self.transactions.len(), "LedgerService stopped");
    }

    #[instrument(fields(customer = %transaction.customer_name, operator = transaction.operator), skip(self, transaction, respond_to))]
    fn handle_append(&mut self, transaction: Transaction, respond_to: ServiceResponse<usize, LedgerError>) {
        info!(
            total = %format_rupiah(transaction.total),
            method = %transaction.payment_method,
            "Transaction saved"
        );
        self.transactions.push(transaction);
        let _ = respond_to.send(Ok(self.transactions.len()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_summary(&self, respond_to: ServiceResponse<DailySummary, LedgerError>) {
        debug!(transactions = self.transactions.len(), "Building daily summary");
        let _ = respond_to.send(Ok(daily_summary(&self.transactions)));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_reset_day(&mut self, admin: OperatorId, respond_to: ServiceResponse<usize, LedgerError>) {
        let dropped = self.transactions.len();
        self.transactions.clear();
        info!(admin, dropped, "Daily data reset");
        let _ = respond_to.send(Ok(dropped));
    }
}
