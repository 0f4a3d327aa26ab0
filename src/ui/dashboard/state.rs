//! Dashboard state management
//!
//! The dashboard state is owned by the UI loop and only changes through the
//! methods in this module and in `updaters`.

use crate::commit::{Commit, CommitKey};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::ui::app::UIConfig;

use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Numbers shown in the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_commits: u64,
}

impl Stats {
    /// The backend does not report a separate processed count yet, so this
    /// mirrors the total on purpose.
    pub fn ai_processed(&self) -> u64 {
        self.total_commits
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment profile the dashboard talks to.
    pub environment: Environment,
    /// Resolved API base URL.
    pub base_url: String,
    /// When the dashboard was mounted; also anchors the refresh countdown.
    pub start_time: Instant,
    /// Period of the auto-refresh timer.
    pub refresh_interval: Duration,
    /// Whether to paint a background color
    pub with_background_color: bool,
    /// IANA name of the zone dates are rendered in.
    pub time_zone: String,

    /// Commits from the most recently applied response.
    pub commits: Vec<Commit>,
    pub stats: Stats,
    /// Raw `json_data` passthrough from the same response as `commits`.
    pub json_data: Value,
    pub show_json: bool,
    /// User-facing error banner text.
    pub error: Option<String>,
    pub data_source: String,
    /// Free-form status message the backend attached to the last response.
    pub backend_message: Option<String>,
    pub last_updated: Option<String>,

    /// Index into `commits` of the card being shown.
    pub selected: usize,
    pub json_scroll: u16,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,

    /// Number of track-now requests started but not finished.
    in_flight: usize,
    /// Highest sequence number whose outcome has been applied.
    last_applied_seq: u64,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        base_url: String,
        start_time: Instant,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            base_url,
            start_time,
            refresh_interval: ui_config.refresh_interval,
            with_background_color: ui_config.with_background_color,
            time_zone: iana_time_zone::get_timezone().unwrap_or_else(|_| "Local".to_string()),
            commits: Vec::new(),
            stats: Stats::default(),
            json_data: Value::Object(Map::new()),
            show_json: false,
            error: None,
            data_source: String::new(),
            backend_message: None,
            last_updated: None,
            selected: 0,
            json_scroll: 0,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            in_flight: 0,
            last_applied_seq: 0,
        }
    }

    /// True while any track-now request is outstanding.
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(super) fn set_in_flight(&mut self, in_flight: usize) {
        self.in_flight = in_flight;
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    pub(super) fn set_last_applied_seq(&mut self, seq: u64) {
        self.last_applied_seq = seq;
    }

    pub fn selected_commit(&self) -> Option<&Commit> {
        self.commits.get(self.selected)
    }

    pub fn selected_key(&self) -> Option<&CommitKey> {
        self.selected_commit().map(|commit| &commit.key)
    }

    /// Time left until the next automatic refresh.
    pub fn next_refresh_in(&self) -> Duration {
        let period = self.refresh_interval.as_millis().max(1);
        let elapsed = self.start_time.elapsed().as_millis();
        let remaining = period - (elapsed % period);
        Duration::from_millis(remaining as u64)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
