use serde::Deserialize;

use super::{ApiError, ensure_success};
use crate::adapt::HolidayRecord;

#[derive(Debug, Deserialize)]
struct HolidayListResponse {
    status: String,
    #[serde(default)]
    data: Vec<HolidayRecord>,
}

#[derive(Clone)]
pub struct HolidayApiClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl HolidayApiClient {
    pub fn new(base_url: String, auth_token: String) -> Self {
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_holidays(&self, clinic_id: i64) -> Result<Vec<HolidayRecord>, ApiError> {
        let url = format!("{}/holidays", self.base_url);
        tracing::info!("Fetching holidays for clinic {}", clinic_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .query(&[
                ("clinic_id", clinic_id.to_string()),
                ("is_active", "true".to_string()),
            ])
            .send()
            .await?;
        let response = ensure_success(response, "holidays").await?;

        let body: HolidayListResponse = response.json().await?;
        if body.status != "success" {
            tracing::error!("Holiday endpoint reported status '{}'", body.status);
            return Err(ApiError::RequestError(format!(
                "Holiday endpoint reported status '{}'",
                body.status
            )));
        }

        tracing::info!(
            "Fetched {} holidays for clinic {}",
            body.data.len(),
            clinic_id
        );
        Ok(body.data)
    }
}
