//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod kasir_system;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use kasir_system::*;
pub use self::tracing::setup_tracing;
