//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from fetch updates,
//! activity events and key presses.

use super::state::{DashboardState, Stats};

use crate::fetcher::{FetchUpdate, Snapshot};
use log::debug;

impl DashboardState {
    /// Advance the animation tick and move queued events into the activity log.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Apply one message from the data fetcher.
    ///
    /// Outcomes whose sequence number is not newer than the last applied one
    /// are dropped, so a slow older response never overwrites a newer one.
    pub fn apply_update(&mut self, update: FetchUpdate) {
        match update {
            FetchUpdate::Started { .. } => {
                self.error = None;
                self.set_in_flight(self.in_flight() + 1);
            }
            FetchUpdate::Loaded { seq, snapshot } => {
                self.finish_request();
                if self.is_stale(seq) {
                    return;
                }
                self.set_last_applied_seq(seq);
                self.error = None;
                self.apply_snapshot(snapshot);
            }
            FetchUpdate::Failed { seq, message } => {
                self.finish_request();
                if self.is_stale(seq) {
                    return;
                }
                self.set_last_applied_seq(seq);
                self.error = Some(message.to_string());
            }
            FetchUpdate::IngestFailed { message } => {
                self.error = Some(message.to_string());
            }
        }
    }

    fn finish_request(&mut self) {
        self.set_in_flight(self.in_flight().saturating_sub(1));
    }

    fn is_stale(&self, seq: u64) -> bool {
        if seq <= self.last_applied_seq() {
            debug!(
                "discarding response #{} (already applied #{})",
                seq,
                self.last_applied_seq()
            );
            return true;
        }
        false
    }

    /// Replace everything the previous response contributed in one step.
    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let previous_key = self.selected_key().cloned();

        self.commits = snapshot.commits;
        self.json_data = snapshot.json_data;
        self.stats = Stats {
            total_commits: snapshot.total_commits,
        };
        self.data_source = snapshot.source;
        self.backend_message = snapshot.message;
        self.last_updated = snapshot.last_updated;

        self.selected = match previous_key {
            Some(key) => match self.commits.iter().position(|c| c.key == key) {
                Some(idx) => idx,
                None => {
                    debug!("selected commit {} left the list", key.as_str());
                    0
                }
            },
            None => 0,
        };
        self.json_scroll = 0;
    }

    pub fn toggle_json(&mut self) {
        self.show_json = !self.show_json;
        self.json_scroll = 0;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.commits.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn scroll_json_down(&mut self, lines: u16) {
        if self.show_json {
            self.json_scroll = self.json_scroll.saturating_add(lines);
        }
    }

    pub fn scroll_json_up(&mut self, lines: u16) {
        if self.show_json {
            self.json_scroll = self.json_scroll.saturating_sub(lines);
        }
    }
}
