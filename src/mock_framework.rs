//! # Mock Framework
//!
//! Utilities for testing clients and handlers in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_action`] or [`expect_restore`] to assert behavior.
//! [`RecordingChannel`] stands in for the chat transport and keeps every effect it is asked
//! to deliver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use crate::channel::{ChannelError, ChatChannel, Outbound};

/// Creates a mock client and a receiver for asserting requests.
///
/// Instead of spinning up a `ResourceActor`, the client sends to a channel the test controls,
/// so the test decides what the "actor" answers.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetOrCreate request
pub async fn expect_get_or_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, oneshot::Sender<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GetOrCreate { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, oneshot::Sender<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Restore request
pub async fn expect_restore<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T, u64, oneshot::Sender<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Restore { snapshot, expected_version, respond_to }) => Some((snapshot, expected_version, respond_to)),
        _ => None,
    }
}

/// Chat channel that records deliveries and can be told to fail them.
#[derive(Default)]
pub struct RecordingChannel {
    effects: Mutex<Vec<Outbound>>,
    failing: AtomicBool,
    /// Every delivery answers with this error, without recording, while set.
    rejection: Mutex<Option<ChannelError>>,
    /// Deliveries still allowed to succeed before a single failure.
    fail_once_after: Mutex<Option<usize>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> Vec<Outbound> {
        self.effects.lock().unwrap().clone()
    }

    /// Returns and forgets everything delivered so far.
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.effects.lock().unwrap())
    }

    pub fn last(&self) -> Option<Outbound> {
        self.effects.lock().unwrap().last().cloned()
    }

    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Lets `successes` deliveries through, fails the next one, then works again.
    pub fn fail_once_after(&self, successes: usize) {
        *self.fail_once_after.lock().unwrap() = Some(successes);
    }

    pub fn reject_with(&self, rejection: Option<ChannelError>) {
        *self.rejection.lock().unwrap() = rejection;
    }

    fn should_fail_now(&self) -> bool {
        let mut countdown = self.fail_once_after.lock().unwrap();
        match *countdown {
            Some(0) => {
                *countdown = None;
                true
            }
            Some(n) => {
                *countdown = Some(n - 1);
                false
            }
            None => false,
        }
    }
}

#[async_trait]
impl ChatChannel for RecordingChannel {
    async fn deliver(&self, effect: Outbound) -> Result<(), ChannelError> {
        if let Some(rejection) = self.rejection.lock().unwrap().clone() {
            return Err(rejection);
        }
        if self.failing.load(Ordering::SeqCst) || self.should_fail_now() {
            return Err(ChannelError::Delivery("channel unavailable".to_string()));
        }
        self.effects.lock().unwrap().push(effect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::SessionClient;
    use crate::domain::{Catalog, ResetKind, Session, View};
    use crate::session_actor::{Outcome, SessionEvent};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Session>(10);
        let client = SessionClient::new(inner);

        let reset_task = tokio::spawn(async move { client.reset(7, ResetKind::NextCustomer).await });

        let (operator, command, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(operator, 7);
        assert_eq!(command.event, SessionEvent::Reset(ResetKind::NextCustomer));

        // Answer the way the store would.
        let mut session = Session::fresh(operator);
        let transition = session.handle_action(&std::sync::Arc::new(Catalog::matcha_bar()), command);
        responder.send(transition).unwrap();

        let transition = reset_task.await.unwrap().unwrap();
        assert_eq!(transition.after.view, View::AwaitingName);
        assert_eq!(transition.outcome, Outcome::Moved);
    }

    #[tokio::test]
    async fn test_get_or_create_goes_to_the_store() {
        let (inner, mut receiver) = create_mock_client::<Session>(10);
        let client = SessionClient::new(inner);

        let lookup_task = tokio::spawn(async move { client.get_or_create_session(5).await });

        let (operator, responder) = expect_get_or_create(&mut receiver).await.expect("Expected GetOrCreate request");
        assert_eq!(operator, 5);
        responder.send(Session::fresh(operator)).unwrap();

        let session = lookup_task.await.unwrap().unwrap();
        assert_eq!(session, Session::new(5));
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let (inner, mut receiver) = create_mock_client::<Session>(10);
        let client = SessionClient::new(inner);

        let restore_task = tokio::spawn(async move { client.restore(Session::new(3), 4).await });

        let (snapshot, expected_version, responder) = expect_restore(&mut receiver).await.expect("Expected Restore request");
        assert_eq!(snapshot.operator, 3);
        assert_eq!(expected_version, 4);
        responder.send(false).unwrap();

        assert_eq!(restore_task.await.unwrap(), Ok(false));
    }

    #[tokio::test]
    async fn test_recording_channel_can_fail() {
        let channel = RecordingChannel::new();
        let effect = Outbound::SendMessage { operator: 1, text: "hi".into(), keyboard: None };

        channel.deliver(effect.clone()).await.unwrap();
        channel.fail_deliveries(true);
        assert!(channel.deliver(effect.clone()).await.is_err());
        assert_eq!(channel.take(), vec![effect]);
        assert!(channel.effects().is_empty());
    }

    #[tokio::test]
    async fn test_recording_channel_fails_once_after_n() {
        let channel = RecordingChannel::new();
        let effect = Outbound::SendMessage { operator: 1, text: "hi".into(), keyboard: None };
        channel.fail_once_after(1);

        assert!(channel.deliver(effect.clone()).await.is_ok());
        assert!(channel.deliver(effect.clone()).await.is_err());
        assert!(channel.deliver(effect.clone()).await.is_ok());
        assert_eq!(channel.effects().len(), 2);

        channel.reject_with(Some(ChannelError::NotModified));
        assert_eq!(channel.deliver(effect).await, Err(ChannelError::NotModified));
        assert_eq!(channel.effects().len(), 2);
    }
}
