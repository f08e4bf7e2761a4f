use tokio::sync::oneshot;
use crate::domain::{OperatorId, Transaction};
use crate::ledger_actor::{DailySummary, LedgerError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enum for the ledger service. Each variant includes parameters
/// and a oneshot channel for responses.
#[derive(Debug)]
pub enum LedgerRequest {
    /// Records a completed sale; answers with the ledger length afterwards.
    Append {
        transaction: Transaction,
        respond_to: ServiceResponse<usize, LedgerError>,
    },
    Summary {
        respond_to: ServiceResponse<DailySummary, LedgerError>,
    },
    Transactions {
        respond_to: ServiceResponse<Vec<Transaction>, LedgerError>,
    },
    /// Clears the whole day; answers with how many transactions were dropped.
    ResetDay {
        admin: OperatorId,
        respond_to: ServiceResponse<usize, LedgerError>,
    },
    Shutdown,
}
