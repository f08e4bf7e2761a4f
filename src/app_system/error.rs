use thiserror::Error;
use crate::app_system::ConfigError;
use crate::channel::ChannelError;
use crate::domain::OperatorId;
use crate::ledger_actor::LedgerError;
use crate::session_actor::SessionError;

/// Errors surfaced at the handler boundary. None of them stops the process.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("Unauthorized operator: {0}")]
    Unauthorized(OperatorId),
    #[error("Render failure: {0}")]
    RenderFailure(ChannelError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
