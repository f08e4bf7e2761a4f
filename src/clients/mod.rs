//! Handles for talking to the actors. Each client is cheap to clone.

#[macro_use]
mod macros;
pub mod ledger_client;
pub mod session_client;

pub use ledger_client::LedgerClient;
pub use session_client::SessionClient;
