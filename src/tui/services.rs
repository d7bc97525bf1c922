use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::video::{HttpVideoGenerator, Submitter, VideoGenerator};

use super::events::{AppEvent, Notification};

/// Centralized handle to the backend the views talk to.
///
/// Created once at startup, then passed by ref to the views.
pub struct Services {
    pub config: AppConfig,
    pub submitter: Submitter,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(
        config: AppConfig,
        generator: Arc<dyn VideoGenerator>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            submitter: Submitter::new(generator),
            event_tx,
        }
    }

    /// Wire the HTTP generator against the configured endpoint.
    pub fn init(config: AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        log::info!(
            "Video service endpoint: {} (variant {:?})",
            config.api.endpoint,
            config.api.variant
        );
        let generator = Arc::new(HttpVideoGenerator::new(config.api.endpoint.clone()));
        Self::new(config, generator, event_tx)
    }

    /// Queue a toast; dropped silently once the loop has shut down.
    pub fn notify(&self, notification: Notification) {
        let _ = self.event_tx.send(AppEvent::Notification(notification));
    }
}
