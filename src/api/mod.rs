use crate::api::error::ApiError;
use crate::api::types::{FetchCommitsResponse, TrackNowResponse};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommitApi: Send + Sync {
    /// Absolute base URL requests are issued against.
    fn base_url(&self) -> String;

    /// Reads the current commit list with its annotations.
    async fn track_now(&self) -> Result<TrackNowResponse, ApiError>;

    /// Asks the backend to ingest new commits. Returns no commit data.
    async fn fetch_commits(&self) -> Result<FetchCommitsResponse, ApiError>;
}
