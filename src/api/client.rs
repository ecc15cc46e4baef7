//! HTTP client for the admin data-access API.
//!
//! Fetches organizational lists, narrower on-demand child lists, and
//! attendance snapshots. Requests carry a JWT bearer token issued by the
//! surrounding application; authentication itself lives outside the core.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{AttendanceRecord, District, Group, OldGroup, Region, State, YhsfRecord};

use super::{ApiError, DataProvider};

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the admin REST API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let mut request = self.client.get(&url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(ApiError::NetworkError)
    }

    pub async fn fetch_states(&self) -> Result<Vec<State>, ApiError> {
        self.get("/states").await
    }

    /// Full attendance-record snapshot for one year.
    pub async fn fetch_attendance(&self, year: i32) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get(&format!("/attendance?year={}", year)).await
    }

    /// YHSF weekly snapshot for one year.
    pub async fn fetch_yhsf(&self, year: i32) -> Result<Vec<YhsfRecord>, ApiError> {
        self.get(&format!("/yhsf?year={}", year)).await
    }
}

impl DataProvider for ApiClient {
    async fn regions_by_state(&self, state_id: i64) -> Result<Vec<Region>, ApiError> {
        self.get(&format!("/states/{}/regions", state_id)).await
    }

    async fn old_groups_by_region(&self, region_id: i64) -> Result<Vec<OldGroup>, ApiError> {
        self.get(&format!("/regions/{}/old-groups", region_id)).await
    }

    async fn groups_by_old_group(&self, old_group_id: i64) -> Result<Vec<Group>, ApiError> {
        self.get(&format!("/old-groups/{}/groups", old_group_id)).await
    }

    async fn districts_by_group(&self, group_id: i64) -> Result<Vec<District>, ApiError> {
        self.get(&format!("/groups/{}/districts", group_id)).await
    }
}
