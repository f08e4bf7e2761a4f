use std::sync::Arc;
use tracing::{error, info};
use crate::actor_framework::ResourceActor;
use crate::app_system::Config;
use crate::channel::ChatChannel;
use crate::clients::{LedgerClient, SessionClient};
use crate::domain::{Catalog, Session};
use crate::handlers::Dispatcher;
use crate::ledger_actor::LedgerService;

/// The running bot: session store, ledger and the dispatcher wired to a chat channel.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct KasirSystem {
    pub dispatcher: Dispatcher,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl KasirSystem {
    pub fn start(config: &Config, catalog: Catalog, channel: Arc<dyn ChatChannel>) -> Self {
        let catalog = Arc::new(catalog);

        // 1. Session store, one entry per operator, created on first contact
        let (session_actor, session_resource_client) =
            ResourceActor::<Session>::new(config.actor_buffer, Arc::clone(&catalog));
        let sessions = SessionClient::new(session_resource_client);
        let session_handle = tokio::spawn(session_actor.run());

        // 2. Ledger of the day's sales
        let (ledger_service, ledger) = LedgerService::new(config.actor_buffer);
        let ledger_handle = tokio::spawn(ledger_service.run());

        info!(items = catalog.items().len(), "Kasir system started");
        let dispatcher = Dispatcher::new(config.roster(), catalog, sessions, ledger, channel);

        Self {
            dispatcher,
            handles: vec![session_handle, ledger_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let ledger: LedgerClient = self.dispatcher.ledger().clone();

        // The session store stops once every client is gone; the ledger needs an explicit signal.
        drop(self.dispatcher);
        if let Err(e) = ledger.shutdown().await {
            error!(error = %e, "Ledger already stopped");
        }
        drop(ledger);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
