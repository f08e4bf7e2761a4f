use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{OperatorId, ResetKind, Session};
use crate::session_actor::{SessionCommand, SessionError, SessionEvent, Transition};

/// Client for the session store.
///
/// Every call is a single request to the store actor, so each read-modify-write on an
/// operator's session happens as one step.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
}

impl_basic_client!(SessionClient, Session, SessionError, session);

impl SessionClient {
    #[instrument(skip(self, command), fields(event = command.event.name()))]
    pub async fn apply(&self, operator: OperatorId, command: SessionCommand) -> Result<Transition, SessionError> {
        debug!("Sending request");
        self.inner
            .perform_action(operator, command)
            .await
            .map_err(|e| SessionError::ActorCommunicationError(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn reset(&self, operator: OperatorId, kind: ResetKind) -> Result<Transition, SessionError> {
        self.apply(operator, SessionCommand::now(SessionEvent::Reset(kind))).await
    }

    /// Puts `snapshot` back unless the session moved past `expected_version` meanwhile.
    #[instrument(skip(self, snapshot), fields(operator = snapshot.operator))]
    pub async fn restore(&self, snapshot: Session, expected_version: u64) -> Result<bool, SessionError> {
        debug!("Sending request");
        self.inner
            .restore(snapshot, expected_version)
            .await
            .map_err(|e| SessionError::ActorCommunicationError(e.to_string()))
    }
}
