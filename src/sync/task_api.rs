use serde::Deserialize;

use super::{ApiError, ensure_success};
use crate::adapt::TaskRecord;

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    success: bool,
    #[serde(default)]
    results: Vec<TaskRecord>,
}

#[derive(Clone)]
pub struct TaskApiClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl TaskApiClient {
    pub fn new(base_url: String, auth_token: String) -> Self {
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, ApiError> {
        let url = format!("{}/tasks", self.base_url);
        tracing::info!("Fetching tasks");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        let response = ensure_success(response, "tasks").await?;

        let body: TaskListResponse = response.json().await?;
        if !body.success {
            tracing::error!("Task endpoint reported failure");
            return Err(ApiError::RequestError(
                "Task endpoint reported failure".to_string(),
            ));
        }

        tracing::info!("Fetched {} tasks", body.results.len());
        Ok(body.results)
    }
}
