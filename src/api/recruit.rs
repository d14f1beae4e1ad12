// SPDX-License-Identifier: MPL-2.0

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct RecruitClient {
    client: reqwest::Client,
    base_url: String,
}

/// A job posting applications are filed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A hiring stage, e.g. "screening" or "offer".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub position: u32,
    /// Stages sharing a group accept each other's applications.
    #[serde(default)]
    pub group: Option<String>,
}

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_id: i64,
    pub job_title: String,
    pub stage: String,
    /// Order inside the stage, lowest first.
    pub position: u32,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Body of a stage change request.
#[derive(Debug, Clone, Serialize)]
pub struct StageUpdate<'a> {
    pub stage: &'a str,
    pub position: usize,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RecruitClient {
    /// Create a new client. An empty token sends no Authorization header.
    pub fn new(base_url: &str, auth_token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if !auth_token.is_empty() {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", auth_token))
                .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Turns transport errors and non-2xx statuses into `ApiError`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, %body, "recruitment API request failed");
            return Err(ApiError::RequestFailed { status, body });
        }

        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Check that the server answers.
    pub async fn health(&self) -> Result<(), ApiError> {
        self.send(self.client.get(self.url("/health"))).await?;
        Ok(())
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobPosting>, ApiError> {
        self.get_json(&self.url("/jobs")).await
    }

    /// Stages in pipeline order.
    pub async fn list_stages(&self) -> Result<Vec<Stage>, ApiError> {
        let mut stages: Vec<Stage> = self.get_json(&self.url("/stages")).await?;
        stages.sort_by_key(|stage| stage.position);
        Ok(stages)
    }

    /// Applications, optionally restricted to one job.
    pub async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<Application>, ApiError> {
        let url = match job_id {
            Some(id) => format!("{}?job_id={}", self.url("/applications"), id),
            None => self.url("/applications"),
        };
        self.get_json(&url).await
    }

    /// Move an application to `stage` at `position`.
    pub async fn move_application(
        &self,
        application_id: i64,
        stage: &str,
        position: usize,
    ) -> Result<Application, ApiError> {
        let url = self.url(&format!("/applications/{}/stage", application_id));
        let body = StageUpdate { stage, position };

        tracing::info!(application_id, stage, position, "updating application stage");

        let response = self.send(self.client.patch(&url).json(&body)).await?;
        response
            .json::<Application>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
