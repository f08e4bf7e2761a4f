//! Cart arithmetic.
//!
//! Every function here is pure: carts go in, new carts or amounts come out. Nothing in this
//! module knows about sessions or messaging.

use crate::domain::MenuItem;
use rust_decimal::Decimal;
use thiserror::Error;

/// A menu item with how many of it the customer ordered. Never stored with quantity 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// Lines in insertion order, at most one line per menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item.id == item_id)
            .map_or(0, |line| line.quantity)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Insufficient payment: total {total}, received {received}")]
pub struct InsufficientPayment {
    pub total: Decimal,
    pub received: Decimal,
}

impl InsufficientPayment {
    pub fn shortfall(&self) -> Decimal {
        self.total - self.received
    }
}

/// Adds one unit of `item`, appending a new line if the item is not in the cart yet.
pub fn add_item(cart: &Cart, item: &MenuItem) -> Cart {
    let mut next = cart.clone();
    match next.lines.iter_mut().find(|line| line.item.id == item.id) {
        Some(line) => line.quantity += 1,
        None => next.lines.push(CartLine {
            item: item.clone(),
            quantity: 1,
        }),
    }
    next
}

/// Removes one unit of `item`; the line disappears when it reaches zero.
/// Removing an item that is not in the cart returns the cart unchanged.
pub fn remove_item(cart: &Cart, item: &MenuItem) -> Cart {
    let mut next = cart.clone();
    if let Some(pos) = next.lines.iter().position(|line| line.item.id == item.id) {
        if next.lines[pos].quantity <= 1 {
            next.lines.remove(pos);
        } else {
            next.lines[pos].quantity -= 1;
        }
    }
    next
}

pub fn subtotal(cart: &Cart) -> Decimal {
    cart.lines.iter().map(CartLine::line_total).sum()
}

pub fn change(total: Decimal, cash_received: Decimal) -> Result<Decimal, InsufficientPayment> {
    if cash_received < total {
        return Err(InsufficientPayment {
            total,
            received: cash_received,
        });
    }
    Ok(cash_received - total)
}
