use std::sync::Arc;

use crate::actor_framework::Entity;
use crate::domain::{Catalog, OperatorId, Session};
use super::actions::{SessionCommand, Transition};
use super::machine::step;

impl Entity for Session {
    type Id = OperatorId;
    type Context = Arc<Catalog>;
    type Action = SessionCommand;
    type ActionResult = Transition;

    fn id(&self) -> &OperatorId { &self.operator }

    /// A first-time operator starts on the welcome screen.
    fn fresh(id: OperatorId) -> Self {
        Session::new(id)
    }

    fn version(&self) -> u64 {
        self.version
    }

    /// Runs one event through the state machine and keeps the result if it was committed.
    ///
    /// Rejections and refreshes leave the stored session untouched.
    fn handle_action(&mut self, catalog: &Arc<Catalog>, command: SessionCommand) -> Transition {
        let transition = step(self, catalog, command);
        if transition.committed() {
            *self = transition.after.clone();
        }
        transition
    }
}
