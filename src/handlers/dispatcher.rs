use std::sync::Arc;
use std::time::{Duration, Instant};
use dashmap::DashMap;
use tracing::{debug, error, info, instrument, warn};
use crate::app_system::AppError;
use crate::channel::{ChannelError, ChatChannel, Inbound, MessageRef, Outbound};
use crate::clients::{LedgerClient, SessionClient};
use crate::domain::{Catalog, OperatorId, ResetKind, Role, Roster};
use crate::handlers::gate::OperatorGates;
use crate::session_actor::{Adjust, GuardFailure, Outcome, SessionCommand, SessionEvent, Transition};
use crate::ui::{render, Reply};
use crate::ui::CallbackAction;

/// How long a "reset the day?" prompt stays confirmable.
const RESET_CONFIRM_WINDOW: Duration = Duration::from_secs(120);

/// Admin-only screens. They read or clear the ledger and never touch a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Panel,
    ViewDailySummary,
    ResetPrompt,
    ResetDay,
}

/// Where an inbound event goes after the role check.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Restart,
    Session(SessionEvent),
    Admin(AdminAction),
    Unknown(String),
}

pub fn route(inbound: &Inbound) -> Route {
    match inbound {
        Inbound::Command { name, .. } => match name.as_str() {
            "start" => Route::Restart,
            "admin" => Route::Admin(AdminAction::Panel),
            "rekap" | "summary" => Route::Admin(AdminAction::ViewDailySummary),
            "reset" => Route::Admin(AdminAction::ResetPrompt),
            other => Route::Unknown(format!("/{other}")),
        },
        Inbound::Text { content, .. } => Route::Session(SessionEvent::TextReceived(content.clone())),
        Inbound::ButtonPress { data, .. } => match data.parse::<CallbackAction>() {
            Ok(action) => route_button(action),
            Err(_) => Route::Unknown(data.clone()),
        },
    }
}

fn route_button(action: CallbackAction) -> Route {
    let event = match action {
        CallbackAction::StartSession => SessionEvent::StartSession,
        CallbackAction::Add(id) => SessionEvent::SelectItem(id),
        CallbackAction::Increase(id) => SessionEvent::AdjustQty(id, Adjust::Increase),
        CallbackAction::Decrease(id) => SessionEvent::AdjustQty(id, Adjust::Decrease),
        CallbackAction::Checkout => SessionEvent::Checkout,
        CallbackAction::BackToMenu => SessionEvent::BackToMenu,
        CallbackAction::Pay(method) => SessionEvent::ChoosePayment(method),
        CallbackAction::BackToCheckout => SessionEvent::BackToCheckout,
        CallbackAction::NewCustomer => SessionEvent::NewCustomer,
        CallbackAction::AddMoreItems => SessionEvent::AddMoreItems,
        CallbackAction::EndSession => SessionEvent::EndSession,
        CallbackAction::Refresh => SessionEvent::Refresh,
        CallbackAction::AdminPanel => return Route::Admin(AdminAction::Panel),
        CallbackAction::AdminSummary => return Route::Admin(AdminAction::ViewDailySummary),
        CallbackAction::AdminReset => return Route::Admin(AdminAction::ResetPrompt),
        CallbackAction::AdminResetConfirm => return Route::Admin(AdminAction::ResetDay),
    };
    Route::Session(event)
}

/// Entry point for every inbound event.
///
/// Flow: role check, per-operator turn, session transition, render and deliver, then record
/// the sale if the transition completed one. If the first reply cannot be delivered the
/// session is put back the way it was so the operator can press the same button again.
pub struct Dispatcher {
    roster: Roster,
    catalog: Arc<Catalog>,
    sessions: SessionClient,
    ledger: LedgerClient,
    channel: Arc<dyn ChatChannel>,
    gates: OperatorGates,
    /// Admins who were shown the reset prompt, and when.
    pending_resets: DashMap<OperatorId, Instant>,
}

impl Dispatcher {
    pub fn new(
        roster: Roster,
        catalog: Arc<Catalog>,
        sessions: SessionClient,
        ledger: LedgerClient,
        channel: Arc<dyn ChatChannel>,
    ) -> Self {
        Self {
            roster,
            catalog,
            sessions,
            ledger,
            channel,
            gates: OperatorGates::default(),
            pending_resets: DashMap::new(),
        }
    }

    pub fn sessions(&self) -> &SessionClient {
        &self.sessions
    }

    pub fn ledger(&self) -> &LedgerClient {
        &self.ledger
    }

    #[instrument(skip(self, inbound), fields(operator = inbound.operator()))]
    pub async fn handle(&self, inbound: Inbound) -> Result<Outcome, AppError> {
        let operator = inbound.operator();
        let origin = inbound.origin();

        let Some(role) = self.roster.role_of(operator) else {
            warn!("Unauthorized access attempt");
            return Err(self.refuse(operator).await);
        };

        let gate = self.gates.gate(operator);
        let _turn = gate.lock().await;

        match route(&inbound) {
            Route::Admin(action) => self.handle_admin(operator, role, origin, action).await,
            Route::Restart => {
                let transition = self.sessions.reset(operator, ResetKind::EndSession).await?;
                self.finish(operator, role, origin, transition).await
            }
            Route::Session(event) => {
                let transition = self.sessions.apply(operator, SessionCommand::now(event)).await?;
                self.finish(operator, role, origin, transition).await
            }
            Route::Unknown(data) => {
                debug!(%data, "Unrecognized input");
                let mut transition = self.sessions.apply(operator, SessionCommand::now(SessionEvent::Refresh)).await?;
                transition.outcome = Outcome::Rejected(GuardFailure::UnknownAction(data).into());
                self.finish(operator, role, origin, transition).await
            }
        }
    }

    /// Renders and delivers a transition. The first reply is the commit point: once it is on
    /// screen a completed sale is recorded, and a failed follow-up message is only logged.
    async fn finish(
        &self,
        operator: OperatorId,
        role: Role,
        origin: Option<MessageRef>,
        transition: Transition,
    ) -> Result<Outcome, AppError> {
        let mut replies = render::render_transition(&transition, role, &self.catalog).into_iter();
        let first: Vec<Reply> = replies.next().into_iter().collect();
        if let Err(failure) = self.deliver(operator, origin, first).await {
            error!(error = %failure, "Failed to render view");
            if transition.committed() {
                let restored = self
                    .sessions
                    .restore(transition.before.clone(), transition.after.version)
                    .await?;
                debug!(restored, "Session rolled back after render failure");
            }
            if let Err(e) = self.deliver(operator, None, vec![render::generic_error()]).await {
                debug!(error = %e, "Could not report the render failure either");
            }
            return Err(AppError::RenderFailure(failure));
        }

        if let Outcome::Completed(transaction) = &transition.outcome {
            self.ledger.append(transaction.clone()).await?;
        }
        if let Err(e) = self.deliver(operator, None, replies.collect()).await {
            error!(error = %e, "Failed to send follow-up message");
        }
        Ok(transition.outcome)
    }

    async fn handle_admin(
        &self,
        operator: OperatorId,
        role: Role,
        origin: Option<MessageRef>,
        action: AdminAction,
    ) -> Result<Outcome, AppError> {
        if !role.is_admin() {
            warn!(?action, "Admin action refused");
            return Err(self.refuse(operator).await);
        }

        let reply = match action {
            AdminAction::Panel => {
                self.pending_resets.remove(&operator);
                render::admin_panel()
            }
            AdminAction::ViewDailySummary => render::daily_summary(&self.ledger.summary().await?),
            AdminAction::ResetPrompt => {
                self.pending_resets.insert(operator, Instant::now());
                render::reset_prompt()
            }
            AdminAction::ResetDay => match self.pending_resets.remove(&operator) {
                Some((_, asked)) if asked.elapsed() <= RESET_CONFIRM_WINDOW => {
                    let dropped = self.ledger.reset_day(operator).await?;
                    info!(admin = operator, dropped, "Ledger reset by admin");
                    render::reset_done(dropped)
                }
                _ => {
                    warn!(admin = operator, "Reset confirmation without a live prompt, asking again");
                    self.pending_resets.insert(operator, Instant::now());
                    render::reset_prompt()
                }
            },
        };

        self.deliver(operator, origin, vec![reply]).await.map_err(|failure| {
            error!(error = %failure, "Failed to render admin view");
            AppError::RenderFailure(failure)
        })?;
        Ok(Outcome::Unchanged)
    }

    /// Tells the operator access is denied. Unknown operators and cashiers poking at admin
    /// actions get the same message.
    async fn refuse(&self, operator: OperatorId) -> AppError {
        if let Err(e) = self.deliver(operator, None, vec![render::unauthorized()]).await {
            debug!(error = %e, "Could not deliver access denied message");
        }
        AppError::Unauthorized(operator)
    }

    /// The first reply replaces the message whose button was pressed; the rest are new messages.
    async fn deliver(
        &self,
        operator: OperatorId,
        origin: Option<MessageRef>,
        replies: Vec<Reply>,
    ) -> Result<(), ChannelError> {
        for (index, Reply { text, keyboard }) in replies.into_iter().enumerate() {
            let effect = match origin {
                Some(message) if index == 0 => Outbound::EditMessage { operator, message, text, keyboard },
                _ => Outbound::SendMessage { operator, text, keyboard },
            };
            match self.channel.deliver(effect).await {
                Ok(()) => {}
                Err(ChannelError::NotModified) => debug!("Message not modified, skipping edit"),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;

    fn press(data: &str) -> Inbound {
        Inbound::ButtonPress { data: data.into(), operator: 1, message: 1 }
    }

    #[test]
    fn test_routing() {
        assert_eq!(route(&Inbound::Command { name: "start".into(), operator: 1 }), Route::Restart);
        assert_eq!(
            route(&Inbound::Command { name: "rekap".into(), operator: 1 }),
            Route::Admin(AdminAction::ViewDailySummary)
        );
        assert_eq!(
            route(&Inbound::Command { name: "help".into(), operator: 1 }),
            Route::Unknown("/help".into())
        );
        assert_eq!(
            route(&Inbound::Text { content: "Budi".into(), operator: 1 }),
            Route::Session(SessionEvent::TextReceived("Budi".into()))
        );
        assert_eq!(route(&press("pay:qris")), Route::Session(SessionEvent::ChoosePayment(PaymentMethod::Qris)));
        assert_eq!(
            route(&press("dec:og")),
            Route::Session(SessionEvent::AdjustQty("og".into(), Adjust::Decrease))
        );
        assert_eq!(route(&press("adm:reset_ok")), Route::Admin(AdminAction::ResetDay));
        assert_eq!(route(&press("bogus")), Route::Unknown("bogus".into()));
    }
}
