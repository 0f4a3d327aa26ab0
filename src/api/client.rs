//! Commit Tracker API Client
//!
//! Thin JSON client for the backend gateway's `track-now` and `fetch-commits` endpoints.

use crate::api::CommitApi;
use crate::api::error::ApiError;
use crate::api::types::{FetchCommitsResponse, TrackNowResponse};
use crate::consts::cli_consts::http;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("commit-tracker/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::decode_response(response).await
    }

    async fn post_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::decode_response(response).await
    }
}

#[async_trait::async_trait]
impl CommitApi for ApiClient {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn track_now(&self) -> Result<TrackNowResponse, ApiError> {
        self.get_request("track-now").await
    }

    async fn fetch_commits(&self) -> Result<FetchCommitsResponse, ApiError> {
        self.post_request("fetch-commits").await
    }
}


#[cfg(test)]
/// These are ignored by default since they require a running backend.
mod live_backend_tests {
    use super::*;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend on localhost:8000.
    async fn test_track_now() {
        let client = ApiClient::new(Environment::Development.api_base_url()).unwrap();
        match client.track_now().await {
            Ok(response) => println!(
                "success={} commits={}",
                response.success,
                response.commits.map(|c| c.len()).unwrap_or(0)
            ),
            Err(e) => panic!("Failed to track now: {}", e),
        }
    }
}
