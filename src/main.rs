mod domain;
mod clients;
mod messages;
mod channel;
mod ui;
mod handlers;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod session_actor;
mod ledger_actor;

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, Config, KasirSystem};
use crate::channel::console::ConsoleChannel;
use crate::domain::Catalog;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::from_env();
    setup_tracing(config.as_ref().map(|c| c.log_level.as_str()).unwrap_or("info"));
    let config = config.map_err(AppError::from).map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;

    if config.roster().is_empty() {
        warn!("No ADMIN_IDS or CASHIER_IDS configured, every operator will be refused");
    }
    let Some(operator) = config.console_operator() else {
        return Err("Set ADMIN_IDS, CASHIER_IDS or CONSOLE_OPERATOR_ID to use the console".to_string());
    };

    info!(operator, "Starting kasir bot on the console");

    let console = Arc::new(ConsoleChannel::new());
    let system = KasirSystem::start(&config, Catalog::matcha_bar(), console.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        };
        let Some(inbound) = console.parse_line(&line, operator) else {
            continue;
        };

        let span = tracing::info_span!("update", operator = inbound.operator());
        let result = system.dispatcher.handle(inbound).instrument(span).await;
        match result {
            Ok(outcome) => debug!(?outcome, "Update handled"),
            Err(e) => error!(error = %e, "Update failed"),
        }
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
