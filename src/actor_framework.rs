use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Keyed entities with lazy creation and actions)
// =============================================================================

/// Trait that any keyed entity must implement to be managed by ResourceActor.
///
/// Entities are created lazily: the first request that touches an unknown id gets a
/// fresh entity from [`Entity::fresh`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    /// Read-only data shared by every entity of this kind (e.g. the menu).
    type Context: Send + Sync + 'static;
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the initial entity for an id seen for the first time
    fn fresh(id: Self::Id) -> Self;

    /// Monotonic revision, used to guard restores
    fn version(&self) -> u64;

    /// Handle a domain-specific action as one read-modify-write step
    fn handle_action(&mut self, context: &Self::Context, action: Self::Action) -> Self::ActionResult;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    GetOrCreate {
        id: T::Id,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    /// Put `snapshot` back, but only if nothing was committed after `expected_version`.
    Restore {
        snapshot: T,
        expected_version: u64,
        respond_to: Response<bool>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    context: T::Context,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, context: T::Context) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            context,
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::GetOrCreate { id, respond_to } => {
                    let item = self.entry(id).clone();
                    let _ = respond_to.send(item);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(item);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let context = &self.context;
                    let item = self.store.entry(id.clone()).or_insert_with(|| {
                        debug!(%id, "Creating entity on first action");
                        T::fresh(id)
                    });
                    let result = item.handle_action(context, action);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Restore { snapshot, expected_version, respond_to } => {
                    let restored = match self.store.get_mut(snapshot.id()) {
                        Some(current) if current.version() == expected_version => {
                            *current = snapshot;
                            true
                        }
                        Some(current) => {
                            debug!(id = %current.id(), current = current.version(), expected_version, "Skipping stale restore");
                            false
                        }
                        None => false,
                    };
                    let _ = respond_to.send(restored);
                }
            }
        }
        info!("Actor stopped");
    }

    fn entry(&mut self, id: T::Id) -> &mut T {
        self.store.entry(id.clone()).or_insert_with(|| T::fresh(id))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn get_or_create(&self, id: T::Id) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::GetOrCreate { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Action { id, action, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn restore(&self, snapshot: T, expected_version: u64) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Restore { snapshot, expected_version, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
