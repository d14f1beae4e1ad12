// SPDX-License-Identifier: MPL-2.0

//! Async helper functions for the Stageboard application.
//! These functions wrap recruitment API calls for use in `cosmic::task::future`.

use crate::api::{Application, JobPosting, RecruitClient, Stage};
use futures_util::future;

/// Stages and applications fetched together for one board.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub stages: Vec<Stage>,
    pub applications: Vec<Application>,
}

fn client(url: &str, token: &str) -> Result<RecruitClient, String> {
    RecruitClient::new(url, token).map_err(|e| e.to_string())
}

/// Test connection to the recruitment server
pub async fn test_connection(url: &str, token: &str) -> Result<(), String> {
    client(url, token)?.health().await.map_err(|e| e.to_string())
}

/// Fetch job postings for the job filter
pub async fn fetch_jobs(url: &str, token: &str) -> Result<Vec<JobPosting>, String> {
    client(url, token)?.list_jobs().await.map_err(|e| e.to_string())
}

/// Fetch stages and applications for the board
pub async fn fetch_board(url: &str, token: &str, job_id: Option<i64>) -> Result<BoardSnapshot, String> {
    let client = client(url, token)?;
    let (stages, applications) =
        future::try_join(client.list_stages(), client.list_applications(job_id))
            .await
            .map_err(|e| e.to_string())?;

    tracing::debug!(
        stages = stages.len(),
        applications = applications.len(),
        ?job_id,
        "board fetched"
    );

    Ok(BoardSnapshot {
        stages,
        applications,
    })
}

/// Persist an application's new stage and position
pub async fn persist_move(
    url: &str,
    token: &str,
    application_id: i64,
    stage: &str,
    position: usize,
) -> Result<Application, String> {
    client(url, token)?
        .move_application(application_id, stage, position)
        .await
        .map_err(|e| e.to_string())
}
