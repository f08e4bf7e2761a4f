//! Per-operator session handling: events, the transition table and the store entity.

mod actions;
pub mod entity;
pub mod error;
pub mod machine;

pub use actions::*;
pub use error::*;
