use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use crate::services::SessionRegistry;

/// Resolves on Ctrl+C
///
/// Admin sessions only hold state that is already persisted or reported as
/// failed, so nothing is flushed here.
pub async fn listen_for_shutdown(sessions: Arc<SessionRegistry>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let open = sessions.open_sessions();
    if open > 0 {
        info!("Dropping {} open admin sessions", open);
    }
}
