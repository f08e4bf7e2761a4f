use crate::domain::{InsufficientPayment, View};
use thiserror::Error;

/// Which guard of the transition table did not hold.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardFailure {
    #[error("{event} is not accepted in view {view}")]
    WrongView { view: View, event: &'static str },
    #[error("customer name is empty")]
    EmptyName,
    #[error("customer name is longer than {max} characters")]
    NameTooLong { max: usize },
    #[error("unknown menu item: {0}")]
    UnknownItem(String),
    #[error("item is not in the cart: {0}")]
    NotInCart(String),
    #[error("cart is empty")]
    EmptyCart,
    #[error("unrecognized action: {0}")]
    UnknownAction(String),
}

/// Errors that can occur while driving a session.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Invalid guard: {0}")]
    InvalidGuard(#[from] GuardFailure),
    #[error(transparent)]
    InsufficientPayment(#[from] InsufficientPayment),
    #[error("Invalid cash amount: {0}")]
    InvalidAmount(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
