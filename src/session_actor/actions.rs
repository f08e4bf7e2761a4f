use crate::domain::{PaymentMethod, ResetKind, Session, Transaction, View};
use crate::session_actor::SessionError;
use chrono::{DateTime, Local};

/// Direction of a quantity adjustment on an existing cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Increase,
    Decrease,
}

/// Everything an operator can do to their session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Reset from any view. `/start` maps to `Reset(EndSession)`.
    Reset(ResetKind),
    StartSession,
    TextReceived(String),
    SelectItem(String),
    AdjustQty(String, Adjust),
    Checkout,
    BackToMenu,
    ChoosePayment(PaymentMethod),
    BackToCheckout,
    NewCustomer,
    AddMoreItems,
    EndSession,
    /// Re-render the current view without changing anything.
    Refresh,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Reset(_) => "Reset",
            SessionEvent::StartSession => "StartSession",
            SessionEvent::TextReceived(_) => "TextReceived",
            SessionEvent::SelectItem(_) => "SelectItem",
            SessionEvent::AdjustQty(..) => "AdjustQty",
            SessionEvent::Checkout => "Checkout",
            SessionEvent::BackToMenu => "BackToMenu",
            SessionEvent::ChoosePayment(_) => "ChoosePayment",
            SessionEvent::BackToCheckout => "BackToCheckout",
            SessionEvent::NewCustomer => "NewCustomer",
            SessionEvent::AddMoreItems => "AddMoreItems",
            SessionEvent::EndSession => "EndSession",
            SessionEvent::Refresh => "Refresh",
        }
    }
}

/// An event stamped with the moment it was received.
#[derive(Debug, Clone)]
pub struct SessionCommand {
    pub event: SessionEvent,
    pub at: DateTime<Local>,
}

impl SessionCommand {
    pub fn now(event: SessionEvent) -> Self {
        Self { event, at: Local::now() }
    }
}

/// What the operator should see after a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Welcome,
    NamePrompt,
    Menu,
    Checkout,
    CashPrompt,
    Receipt(Transaction),
    NextAction,
}

impl Screen {
    /// The screen that re-renders `view` as it is.
    pub fn for_view(view: View) -> Self {
        match view {
            View::Welcome => Screen::Welcome,
            View::AwaitingName => Screen::NamePrompt,
            View::Menu => Screen::Menu,
            View::Checkout => Screen::Checkout,
            View::AwaitingCashAmount => Screen::CashPrompt,
            View::Receipt => Screen::NextAction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The session moved (possibly to the same view with new data).
    Moved,
    /// The session reached Receipt; the transaction still has to be recorded.
    Completed(Transaction),
    /// Nothing changed, the current view is shown again.
    Unchanged,
    /// The event was refused; nothing changed.
    Rejected(SessionError),
}

/// Result of applying one event: the session before and after plus what to show.
#[derive(Debug, Clone)]
pub struct Transition {
    pub before: Session,
    pub after: Session,
    pub screen: Screen,
    pub outcome: Outcome,
}

impl Transition {
    pub fn committed(&self) -> bool {
        matches!(self.outcome, Outcome::Moved | Outcome::Completed(_))
    }
}
