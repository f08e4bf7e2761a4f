//! The session state machine.
//!
//! [`step`] is a pure function from (session, event) to a [`Transition`]. A rejected event
//! leaves the session exactly as it was and asks for the current view to be shown again.

use crate::domain::cart;
use crate::domain::money::parse_cash_amount;
use crate::domain::{Catalog, PaymentMethod, ResetKind, Session, Transaction, View};
use crate::session_actor::{Adjust, GuardFailure, Outcome, Screen, SessionCommand, SessionError, SessionEvent, Transition};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tracing::debug;

pub const MAX_NAME_CHARS: usize = 50;

pub fn step(current: &Session, catalog: &Catalog, command: SessionCommand) -> Transition {
    let SessionCommand { event, at } = command;
    let mut next = current.clone();
    match apply(&mut next, catalog, event, at) {
        Ok((screen, outcome)) => {
            if matches!(outcome, Outcome::Moved | Outcome::Completed(_)) {
                next.version += 1;
            }
            Transition {
                before: current.clone(),
                after: next,
                screen,
                outcome,
            }
        }
        Err(error) => {
            debug!(operator = current.operator, view = %current.view, %error, "Event rejected");
            Transition {
                before: current.clone(),
                after: current.clone(),
                screen: Screen::for_view(current.view),
                outcome: Outcome::Rejected(error),
            }
        }
    }
}

fn moved(screen: Screen) -> (Screen, Outcome) {
    (screen, Outcome::Moved)
}

fn apply(
    session: &mut Session,
    catalog: &Catalog,
    event: SessionEvent,
    at: DateTime<Local>,
) -> Result<(Screen, Outcome), SessionError> {
    use SessionEvent as E;

    match (session.view, event) {
        (_, E::Reset(kind)) => {
            session.reset(kind);
            Ok(moved(Screen::for_view(session.view)))
        }
        (view, E::Refresh) => Ok((Screen::for_view(view), Outcome::Unchanged)),

        (View::Welcome, E::StartSession) => {
            session.reset(ResetKind::NextCustomer);
            Ok(moved(Screen::NamePrompt))
        }

        (View::AwaitingName, E::TextReceived(text)) => {
            session.customer_name = Some(validate_name(&text)?);
            session.view = View::Menu;
            Ok(moved(Screen::Menu))
        }

        (View::Menu, E::SelectItem(id)) | (View::Menu, E::AdjustQty(id, Adjust::Increase)) => {
            let item = catalog.get(&id).ok_or(GuardFailure::UnknownItem(id.clone()))?;
            session.cart = cart::add_item(&session.cart, item);
            Ok(moved(Screen::Menu))
        }
        (View::Menu, E::AdjustQty(id, Adjust::Decrease)) => {
            let item = session
                .cart
                .lines()
                .iter()
                .find(|line| line.item.id == id)
                .map(|line| line.item.clone())
                .ok_or(GuardFailure::NotInCart(id))?;
            session.cart = cart::remove_item(&session.cart, &item);
            Ok(moved(Screen::Menu))
        }
        (View::Menu, E::Checkout) => {
            if session.cart.is_empty() {
                return Err(GuardFailure::EmptyCart.into());
            }
            session.view = View::Checkout;
            Ok(moved(Screen::Checkout))
        }

        (View::Checkout, E::BackToMenu) => {
            session.view = View::Menu;
            Ok(moved(Screen::Menu))
        }
        (View::Checkout, E::ChoosePayment(PaymentMethod::Cash)) => {
            session.payment_method = Some(PaymentMethod::Cash);
            session.view = View::AwaitingCashAmount;
            Ok(moved(Screen::CashPrompt))
        }
        (View::Checkout, E::ChoosePayment(PaymentMethod::Qris)) => {
            let transaction = settle(session, PaymentMethod::Qris, None, at)?;
            Ok((Screen::Receipt(transaction.clone()), Outcome::Completed(transaction)))
        }

        (View::AwaitingCashAmount, E::TextReceived(text)) => {
            let cash = parse_cash_amount(&text).ok_or_else(|| SessionError::InvalidAmount(text.trim().to_string()))?;
            let transaction = settle(session, PaymentMethod::Cash, Some(cash), at)?;
            Ok((Screen::Receipt(transaction.clone()), Outcome::Completed(transaction)))
        }
        (View::AwaitingCashAmount, E::BackToCheckout) => {
            session.clear_payment();
            session.view = View::Checkout;
            Ok(moved(Screen::Checkout))
        }

        (View::Receipt, E::NewCustomer) => {
            session.reset(ResetKind::NextCustomer);
            Ok(moved(Screen::NamePrompt))
        }
        (View::Receipt, E::AddMoreItems) => {
            // Nothing to add more to: behave like a new customer.
            if session.cart.is_empty() {
                session.reset(ResetKind::NextCustomer);
                return Ok(moved(Screen::NamePrompt));
            }
            session.clear_payment();
            session.view = View::Menu;
            Ok(moved(Screen::Menu))
        }
        (View::Receipt, E::EndSession) => {
            session.reset(ResetKind::EndSession);
            Ok(moved(Screen::Welcome))
        }

        (view, event) => Err(GuardFailure::WrongView { view, event: event.name() }.into()),
    }
}

fn validate_name(text: &str) -> Result<String, GuardFailure> {
    let name = text.trim();
    if name.is_empty() {
        return Err(GuardFailure::EmptyName);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(GuardFailure::NameTooLong { max: MAX_NAME_CHARS });
    }
    Ok(name.to_string())
}

/// Closes the sale: computes change for cash and moves the session to Receipt.
fn settle(
    session: &mut Session,
    method: PaymentMethod,
    cash_received: Option<Decimal>,
    at: DateTime<Local>,
) -> Result<Transaction, SessionError> {
    let total = cart::subtotal(&session.cart);
    let change = cash_received
        .map(|cash| cart::change(total, cash))
        .transpose()?;

    session.payment_method = Some(method);
    session.cash_received = cash_received;
    session.view = View::Receipt;

    Ok(Transaction {
        operator: session.operator,
        customer_name: session.customer_name.clone().unwrap_or_default(),
        lines: session.cart.lines().to_vec(),
        total,
        payment_method: method,
        cash_received,
        change,
        timestamp: at,
    })
}
