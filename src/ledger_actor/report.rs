use crate::domain::{PaymentMethod, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Aggregate view of the day's sales.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySummary {
    pub total_revenue: Decimal,
    pub transaction_count: usize,
    pub by_payment_method: BTreeMap<PaymentMethod, Decimal>,
    /// Units sold per item name.
    pub items_sold: BTreeMap<String, u32>,
}

impl DailySummary {
    pub fn revenue_for(&self, method: PaymentMethod) -> Decimal {
        self.by_payment_method.get(&method).copied().unwrap_or(Decimal::ZERO)
    }
}

pub fn daily_summary(ledger: &[Transaction]) -> DailySummary {
    ledger.iter().fold(DailySummary::default(), |mut summary, tx| {
        summary.total_revenue += tx.total;
        summary.transaction_count += 1;
        *summary.by_payment_method.entry(tx.payment_method).or_insert(Decimal::ZERO) += tx.total;
        for line in &tx.lines {
            *summary.items_sold.entry(line.item.name.clone()).or_insert(0) += line.quantity;
        }
        summary
    })
}
