//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::fetcher::{DataFetcher, FetchUpdate};
use crate::scheduler::RefreshScheduler;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use log::debug;
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Lines moved per PgUp/PgDn in the JSON pane.
const JSON_SCROLL_STEP: u16 = 10;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub refresh_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval: Duration) -> Self {
        Self {
            with_background_color,
            refresh_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying commits and controls.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives activity events from the fetcher.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Receives sequenced fetch outcomes.
    update_receiver: mpsc::Receiver<FetchUpdate>,

    fetcher: DataFetcher,

    /// Auto-refresh timer; present only while the dashboard is mounted.
    scheduler: Option<RefreshScheduler>,

    /// Issue one track-now as soon as the dashboard mounts.
    track_on_start: bool,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        fetcher: DataFetcher,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        update_receiver: mpsc::Receiver<FetchUpdate>,
        track_on_start: bool,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            update_receiver,
            fetcher,
            scheduler: None,
            track_on_start,
            ui_config,
        }
    }

    /// Switches to the dashboard and starts its refresh timer.
    fn mount_dashboard(&mut self) {
        let state = DashboardState::new(
            self.environment,
            self.fetcher.base_url(),
            Instant::now(),
            self.ui_config.clone(),
        );
        self.current_screen = Screen::Dashboard(Box::new(state));

        let fetcher = self.fetcher.clone();
        self.scheduler = Some(RefreshScheduler::start(
            self.ui_config.refresh_interval,
            move || {
                let fetcher = fetcher.clone();
                tokio::spawn(async move { fetcher.auto_refresh().await });
            },
        ));

        if self.track_on_start {
            spawn_track_now(&self.fetcher);
        }
    }

    /// Stops the refresh timer.
    fn unmount(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            debug!(
                "stopping refresh timer (period {}s)",
                scheduler.period().as_secs()
            );
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return;
        };

        match code {
            KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Enter => {
                if !state.loading() {
                    spawn_track_now(&self.fetcher);
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if !state.loading() {
                    let fetcher = self.fetcher.clone();
                    tokio::spawn(async move { fetcher.fetch_commits().await });
                }
            }
            KeyCode::Char('j') | KeyCode::Char('J') => state.toggle_json(),
            KeyCode::Down => state.select_next(),
            KeyCode::Up => state.select_previous(),
            KeyCode::PageDown => state.scroll_json_down(JSON_SCROLL_STEP),
            KeyCode::PageUp => state.scroll_json_up(JSON_SCROLL_STEP),
            _ => {}
        }
    }
}

fn spawn_track_now(fetcher: &DataFetcher) {
    let fetcher = fetcher.clone();
    tokio::spawn(async move { fetcher.track_now().await });
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        while let Ok(update) = app.update_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.apply_update(update);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.mount_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    app.unmount();
                    return Ok(());
                }

                // Any key press will skip the splash screen
                if matches!(app.current_screen, Screen::Splash) {
                    app.mount_dashboard();
                } else {
                    app.handle_dashboard_key(key.code);
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCommitApi;
    use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
    use crate::fetcher::EventSender;
    use std::sync::Arc;

    fn app(api: MockCommitApi) -> App {
        let (update_tx, update_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let fetcher = DataFetcher::new(Arc::new(api), update_tx, EventSender::new(event_tx));
        App::new(
            Environment::Development,
            fetcher,
            event_rx,
            update_rx,
            false,
            UIConfig::new(false, Duration::from_secs(30)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_refresh_timer() {
        let mut api = MockCommitApi::new();
        api.expect_base_url()
            .return_const("http://localhost:8000".to_string());
        api.expect_track_now().never();
        let mut app = app(api);

        app.mount_dashboard();
        assert!(matches!(app.current_screen, Screen::Dashboard(_)));
        assert!(app.scheduler.is_some());

        app.unmount();
        assert!(app.scheduler.is_none());

        tokio::time::advance(Duration::from_secs(90)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(app.update_receiver.try_recv().is_err());
    }
}

