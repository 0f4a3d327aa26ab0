//! Data fetching with sequenced updates
//!
//! The fetcher never touches dashboard state directly. It reports progress as
//! [`FetchUpdate`] messages tagged with a monotonically increasing sequence
//! number, and the owner of the state decides which of them to apply.

use crate::api::CommitApi;
use crate::api::types::TrackNowResponse;
use crate::commit::Commit;
use crate::consts::cli_consts::messages;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use log::{error, info};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Everything a single successful track-now response contributes to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub commits: Vec<Commit>,
    pub json_data: Value,
    pub total_commits: u64,
    pub source: String,
    pub message: Option<String>,
    pub last_updated: Option<String>,
}

impl From<TrackNowResponse> for Snapshot {
    fn from(response: TrackNowResponse) -> Self {
        Self {
            commits: response
                .commits
                .unwrap_or_default()
                .into_iter()
                .map(Commit::from)
                .collect(),
            json_data: response.json_data.unwrap_or(Value::Null),
            total_commits: response.total_commits.unwrap_or(0),
            source: response.source.unwrap_or_else(|| "unknown".to_string()),
            message: response.message,
            last_updated: response.last_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchUpdate {
    /// A track-now request was issued.
    Started { seq: u64 },
    /// The request with this sequence number returned data.
    Loaded { seq: u64, snapshot: Snapshot },
    /// The request with this sequence number failed; `message` is user-facing.
    Failed { seq: u64, message: &'static str },
    /// The ingest request failed; `message` is user-facing.
    IngestFailed { message: &'static str },
}

impl FetchUpdate {
    /// Whether this update closes a previously started track-now request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchUpdate::Loaded { .. } | FetchUpdate::Failed { .. })
    }
}

/// Common event sending utilities for the fetcher
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_fetch_event(&self, message: String, event_type: EventType, level: LogLevel) {
        self.send_event(Event::fetcher_with_level(message, event_type, level))
            .await;
    }

    pub async fn send_ingest_event(&self, message: String, event_type: EventType, level: LogLevel) {
        self.send_event(Event::ingester_with_level(message, event_type, level))
            .await;
    }
}

/// Issues backend calls and reports their outcome as [`FetchUpdate`]s.
#[derive(Clone)]
pub struct DataFetcher {
    api: Arc<dyn CommitApi>,
    sequence: Arc<AtomicU64>,
    updates: mpsc::Sender<FetchUpdate>,
    events: EventSender,
    classifier: ErrorClassifier,
}

impl DataFetcher {
    pub fn new(
        api: Arc<dyn CommitApi>,
        updates: mpsc::Sender<FetchUpdate>,
        events: EventSender,
    ) -> Self {
        Self {
            api,
            sequence: Arc::new(AtomicU64::new(0)),
            updates,
            events,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn base_url(&self) -> String {
        self.api.base_url()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn send_update(&self, update: FetchUpdate) {
        // A closed channel means the dashboard is gone; the update is moot.
        let _ = self.updates.send(update).await;
    }

    /// Reads the commit list. Always emits `Started` followed by exactly one
    /// `Loaded` or `Failed` carrying the same sequence number.
    pub async fn track_now(&self) {
        let seq = self.next_sequence();
        self.send_update(FetchUpdate::Started { seq }).await;
        self.events
            .send_fetch_event(
                format!("Requesting commits from {}", self.api.base_url()),
                EventType::Refresh,
                LogLevel::Debug,
            )
            .await;

        let update = match self.api.track_now().await {
            Ok(response) if response.success => {
                let snapshot = Snapshot::from(response);
                self.events
                    .send_fetch_event(
                        format!(
                            "Loaded {} commits (source: {})",
                            snapshot.commits.len(),
                            snapshot.source
                        ),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                FetchUpdate::Loaded { seq, snapshot }
            }
            Ok(response) => {
                let detail = response
                    .message
                    .unwrap_or_else(|| "no details".to_string());
                self.events
                    .send_fetch_event(
                        format!("{}: {}", messages::TRACK_FAILED, detail),
                        EventType::Error,
                        LogLevel::Warn,
                    )
                    .await;
                FetchUpdate::Failed {
                    seq,
                    message: messages::TRACK_FAILED,
                }
            }
            Err(e) => {
                error!("track-now request failed: {}", e);
                self.events
                    .send_fetch_event(
                        format!("{}: {}", messages::CONNECT_FAILED, e),
                        EventType::Error,
                        self.classifier.classify(&e),
                    )
                    .await;
                FetchUpdate::Failed {
                    seq,
                    message: messages::CONNECT_FAILED,
                }
            }
        };
        self.send_update(update).await;
    }

    /// Timer-driven [`DataFetcher::track_now`], recorded as a scheduler event.
    pub async fn auto_refresh(&self) {
        self.events
            .send_event(Event::scheduler("Auto-refresh".to_string()))
            .await;
        self.track_now().await;
    }

    /// Asks the backend to ingest new commits, then re-reads the list.
    pub async fn fetch_commits(&self) {
        self.events
            .send_ingest_event(
                "Requesting new commits from GitHub".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        match self.api.fetch_commits().await {
            Ok(response) if response.success => {
                self.events
                    .send_ingest_event(
                        response
                            .message
                            .unwrap_or_else(|| "New commits ingested".to_string()),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.track_now().await;
            }
            Ok(response) => {
                let detail = response
                    .message
                    .unwrap_or_else(|| "backend reported no success".to_string());
                info!("fetch-commits declined: {}", detail);
                self.events
                    .send_ingest_event(detail, EventType::Waiting, LogLevel::Info)
                    .await;
            }
            Err(e) => {
                error!("fetch-commits request failed: {}", e);
                self.events
                    .send_ingest_event(
                        format!("{}: {}", messages::INGEST_FAILED, e),
                        EventType::Error,
                        self.classifier.classify(&e),
                    )
                    .await;
                self.send_update(FetchUpdate::IngestFailed {
                    message: messages::INGEST_FAILED,
                })
                .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCommitApi;
    use crate::api::error::ApiError;
    use crate::api::types::FetchCommitsResponse;
    use crate::consts::cli_consts::EVENT_QUEUE_SIZE;

    fn success_response(count: usize) -> TrackNowResponse {
        let commits: Vec<Value> = (0..count)
            .map(|i| serde_json::json!({"hash_key": format!("key-{}", i), "message": "msg"}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "success": true,
            "commits": commits,
            "json_data": {"commits": count},
            "total_commits": count,
        }))
        .unwrap()
    }

    fn fetcher_with(
        api: MockCommitApi,
    ) -> (
        DataFetcher,
        mpsc::Receiver<FetchUpdate>,
        mpsc::Receiver<Event>,
    ) {
        let (update_tx, update_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let fetcher = DataFetcher::new(Arc::new(api), update_tx, EventSender::new(event_tx));
        (fetcher, update_rx, event_rx)
    }

    fn drain(rx: &mut mpsc::Receiver<FetchUpdate>) -> Vec<FetchUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }
        updates
    }

    fn base_url_mock() -> MockCommitApi {
        let mut api = MockCommitApi::new();
        api.expect_base_url()
            .return_const("http://localhost:8000".to_string());
        api
    }

    #[tokio::test]
    async fn test_successful_track_now_emits_started_then_loaded() {
        let mut api = base_url_mock();
        api.expect_track_now()
            .times(1)
            .returning(|| Ok(success_response(3)));
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.track_now().await;

        let updates = drain(&mut updates);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], FetchUpdate::Started { seq: 1 });
        match &updates[1] {
            FetchUpdate::Loaded { seq, snapshot } => {
                assert_eq!(*seq, 1);
                assert_eq!(snapshot.commits.len(), 3);
                assert_eq!(snapshot.total_commits, 3);
                assert_eq!(snapshot.source, "unknown");
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_reported_failure_uses_retrieve_message() {
        let mut api = base_url_mock();
        api.expect_track_now()
            .returning(|| Ok(TrackNowResponse::default()));
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.track_now().await;

        let updates = drain(&mut updates);
        assert_eq!(
            updates.last(),
            Some(&FetchUpdate::Failed {
                seq: 1,
                message: "Failed to retrieve data"
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_uses_connect_message() {
        let mut api = base_url_mock();
        api.expect_track_now().returning(|| {
            Err(ApiError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            })
        });
        let (fetcher, mut updates, mut events) = fetcher_with(api);

        fetcher.track_now().await;

        let updates = drain(&mut updates);
        assert_eq!(
            updates.last(),
            Some(&FetchUpdate::Failed {
                seq: 1,
                message: "Error connecting to server"
            })
        );

        let mut logged_error = false;
        while let Ok(event) = events.try_recv() {
            if event.event_type == EventType::Error {
                assert_eq!(event.log_level, LogLevel::Warn);
                logged_error = true;
            }
        }
        assert!(logged_error, "transport failure should reach the activity log");
    }

    #[tokio::test]
    async fn test_sequence_numbers_increase_per_request() {
        let mut api = base_url_mock();
        api.expect_track_now()
            .times(2)
            .returning(|| Ok(success_response(1)));
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.track_now().await;
        fetcher.clone().track_now().await;

        let started: Vec<u64> = drain(&mut updates)
            .into_iter()
            .filter_map(|u| match u {
                FetchUpdate::Started { seq } => Some(seq),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_commits_success_rereads_the_list() {
        let mut api = base_url_mock();
        api.expect_fetch_commits().times(1).returning(|| {
            Ok(FetchCommitsResponse {
                success: true,
                message: None,
            })
        });
        api.expect_track_now()
            .times(1)
            .returning(|| Ok(success_response(2)));
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.fetch_commits().await;

        let updates = drain(&mut updates);
        assert!(matches!(updates[0], FetchUpdate::Started { .. }));
        assert!(matches!(updates[1], FetchUpdate::Loaded { .. }));
    }

    #[tokio::test]
    async fn test_fetch_commits_declined_does_not_reread() {
        let mut api = base_url_mock();
        api.expect_fetch_commits()
            .returning(|| Ok(FetchCommitsResponse::default()));
        api.expect_track_now().never();
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.fetch_commits().await;

        assert!(drain(&mut updates).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_commits_transport_failure_reports_ingest_error() {
        let mut api = base_url_mock();
        api.expect_fetch_commits().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });
        api.expect_track_now().never();
        let (fetcher, mut updates, _events) = fetcher_with(api);

        fetcher.fetch_commits().await;

        assert_eq!(
            drain(&mut updates),
            vec![FetchUpdate::IngestFailed {
                message: "Error fetching commits"
            }]
        );
    }

    #[tokio::test]
    async fn test_auto_refresh_logs_scheduler_event_then_tracks() {
        let mut api = base_url_mock();
        api.expect_track_now()
            .times(1)
            .returning(|| Ok(success_response(1)));
        let (fetcher, mut updates, mut events) = fetcher_with(api);

        fetcher.auto_refresh().await;

        let first = events.try_recv().unwrap();
        assert_eq!(first.worker, crate::events::Worker::Scheduler);
        assert_eq!(drain(&mut updates).len(), 2);
    }

    #[tokio::test]
    async fn test_closed_channel_is_a_no_op() {
        let mut api = base_url_mock();
        api.expect_track_now()
            .returning(|| Ok(success_response(1)));
        let (fetcher, updates, events) = fetcher_with(api);
        drop(updates);
        drop(events);

        // Must complete without panicking after the dashboard is gone.
        fetcher.track_now().await;
    }
}
