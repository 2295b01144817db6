use serde::Deserialize;

use super::{ApiError, ensure_success};
use crate::adapt::LeaveRecord;

#[derive(Debug, Deserialize)]
struct LeaveListResponse {
    status: String,
    #[serde(default)]
    data: Vec<LeaveRecord>,
}

#[derive(Clone)]
pub struct LeaveApiClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl LeaveApiClient {
    pub fn new(base_url: String, auth_token: String) -> Self {
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_leaves(
        &self,
        doctor_id: i64,
        clinic_id: i64,
    ) -> Result<Vec<LeaveRecord>, ApiError> {
        let url = format!("{}/leaves", self.base_url);
        tracing::info!("Fetching leaves for clinic {}", clinic_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .query(&[
                ("doctor_id", doctor_id.to_string()),
                ("clinic_id", clinic_id.to_string()),
            ])
            .send()
            .await?;
        let response = ensure_success(response, "leaves").await?;

        let body: LeaveListResponse = response.json().await?;
        if body.status != "success" {
            tracing::error!("Leave endpoint reported status '{}'", body.status);
            return Err(ApiError::RequestError(format!(
                "Leave endpoint reported status '{}'",
                body.status
            )));
        }

        tracing::info!(
            "Fetched {} leaves for clinic {}",
            body.data.len(),
            clinic_id
        );
        Ok(body.data)
    }
}
