//! Inbound event handling.

pub mod dispatcher;
pub mod gate;

pub use dispatcher::*;
