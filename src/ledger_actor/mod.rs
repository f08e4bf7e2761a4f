//! The day's sales ledger: an append-only list owned by a single actor.

pub mod error;
pub mod report;
pub mod service;

pub use error::*;
pub use report::*;
pub use service::*;
