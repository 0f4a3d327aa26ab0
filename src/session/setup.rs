//! Session setup and initialization

use crate::api::ApiClient;
use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::fetcher::{DataFetcher, EventSender, FetchUpdate};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Session data for the TUI, headless and one-shot modes
pub struct SessionData {
    /// Activity events from the fetcher
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sequenced fetch outcomes
    pub update_receiver: mpsc::Receiver<FetchUpdate>,
    /// Shutdown sender to stop background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    pub fetcher: DataFetcher,
    pub environment: Environment,
    pub refresh_interval: Duration,
}

/// Sets up a session against the backend described by `settings`.
///
/// Builds the HTTP client, the event and update channels, and the fetcher
/// that feeds them.
pub fn setup_session(settings: &Settings) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(settings.base_url())?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (update_sender, update_receiver) = mpsc::channel::<FetchUpdate>(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let fetcher = DataFetcher::new(
        Arc::new(client),
        update_sender,
        EventSender::new(event_sender),
    );

    Ok(SessionData {
        event_receiver,
        update_receiver,
        shutdown_sender,
        fetcher,
        environment: settings.environment,
        refresh_interval: settings.refresh_interval,
    })
}
