use crate::domain::{CartLine, OperatorId};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMethod {
    Cash,
    /// Display-only confirmation; no settlement happens behind it.
    Qris,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Qris => write!(f, "QRIS"),
        }
    }
}

/// A completed sale as recorded in the daily ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub operator: OperatorId,
    pub customer_name: String,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub cash_received: Option<Decimal>,
    pub change: Option<Decimal>,
    pub timestamp: DateTime<Local>,
}
