use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
