use crate::domain::{Cart, OperatorId, PaymentMethod};
use rust_decimal::Decimal;
use std::fmt;

/// The screen an operator is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Welcome,
    AwaitingName,
    Menu,
    Checkout,
    AwaitingCashAmount,
    Receipt,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Welcome => "welcome",
            View::AwaitingName => "awaiting_name",
            View::Menu => "menu",
            View::Checkout => "checkout",
            View::AwaitingCashAmount => "awaiting_cash_amount",
            View::Receipt => "receipt",
        };
        f.write_str(name)
    }
}

/// How far a reset goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Ready for the next customer's name.
    NextCustomer,
    /// Back to the welcome screen.
    EndSession,
}

/// In-progress transaction state of one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub operator: OperatorId,
    pub view: View,
    pub customer_name: Option<String>,
    pub cart: Cart,
    pub payment_method: Option<PaymentMethod>,
    pub cash_received: Option<Decimal>,
    /// Bumped on every committed transition.
    pub version: u64,
}

impl Session {
    pub fn new(operator: OperatorId) -> Self {
        Self {
            operator,
            view: View::Welcome,
            customer_name: None,
            cart: Cart::default(),
            payment_method: None,
            cash_received: None,
            version: 0,
        }
    }

    /// Clears cart, customer and payment fields. The version is left alone.
    pub fn reset(&mut self, kind: ResetKind) {
        self.customer_name = None;
        self.cart = Cart::default();
        self.clear_payment();
        self.view = match kind {
            ResetKind::NextCustomer => View::AwaitingName,
            ResetKind::EndSession => View::Welcome,
        };
    }

    pub fn clear_payment(&mut self) {
        self.payment_method = None;
        self.cash_received = None;
    }
}
