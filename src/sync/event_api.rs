use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, ensure_success};
use crate::adapt::EventRecord;
use crate::calendar::{EventCategory, category_to_backend};

#[derive(Debug, Deserialize)]
struct EventListResponse {
    status: String,
    #[serde(default)]
    data: EventListData,
}

#[derive(Debug, Default, Deserialize)]
struct EventListData {
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventCreateResponse {
    status: String,
    data: EventRecord,
}

/// User-entered fields for a new or edited ad-hoc calendar entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub category: EventCategory,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub reminder_minutes: Option<i64>,
}

#[derive(Debug, Serialize)]
struct EventPayloadBody {
    title: String,
    category: &'static str,
    start_datetime: String,
    end_datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    is_blocking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminder_minutes: Option<i64>,
}

impl EventPayloadBody {
    fn from_draft(draft: &EventDraft) -> Result<Self, ApiError> {
        let Some((category, is_blocking)) = category_to_backend(draft.category) else {
            return Err(ApiError::RequestError(format!(
                "Category {:?} cannot be written to the events backend",
                draft.category
            )));
        };
        Ok(Self {
            title: draft.title.clone(),
            category,
            start_datetime: draft.start.to_rfc3339(),
            end_datetime: draft.end.to_rfc3339(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            is_blocking,
            reminder_minutes: draft.reminder_minutes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreatedEventInfo {
    pub id: i64,
}

#[async_trait]
pub trait EventsApi {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, ApiError>;

    async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEventInfo, ApiError>;

    async fn update_event(&self, event_id: i64, draft: &EventDraft) -> Result<(), ApiError>;

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct EventApiClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl EventApiClient {
    pub fn new(base_url: String, auth_token: String) -> Self {
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EventsApi for EventApiClient {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, ApiError> {
        let url = format!("{}/events", self.base_url);
        tracing::info!("Fetching calendar events");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .query(&[("is_active", "true"), ("page_size", "100")])
            .send()
            .await?;
        let response = ensure_success(response, "events").await?;

        let body: EventListResponse = response.json().await?;
        if body.status != "success" {
            tracing::error!("Event endpoint reported status '{}'", body.status);
            return Err(ApiError::RequestError(format!(
                "Event endpoint reported status '{}'",
                body.status
            )));
        }

        tracing::info!("Fetched {} calendar events", body.data.events.len());
        Ok(body.data.events)
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEventInfo, ApiError> {
        let url = format!("{}/events", self.base_url);
        let payload = EventPayloadBody::from_draft(draft)?;

        tracing::info!("Creating event: {} on {}", draft.title, draft.start);
        tracing::debug!("POST {} with payload: {:?}", url, payload);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&payload)
            .send()
            .await?;
        let response = ensure_success(response, "events").await?;

        let body: EventCreateResponse = response.json().await?;
        if body.status != "success" {
            return Err(ApiError::RequestError(format!(
                "Event creation reported status '{}'",
                body.status
            )));
        }

        tracing::info!("Event created with id {}", body.data.id);
        Ok(CreatedEventInfo { id: body.data.id })
    }

    async fn update_event(&self, event_id: i64, draft: &EventDraft) -> Result<(), ApiError> {
        let url = format!("{}/events/{}", self.base_url, event_id);
        let payload = EventPayloadBody::from_draft(draft)?;

        tracing::info!("Updating event {}: {}", event_id, draft.title);
        tracing::debug!("PUT {} with payload: {:?}", url, payload);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.auth_token)
            .json(&payload)
            .send()
            .await?;
        ensure_success(response, "events").await?;

        tracing::info!("Event {} updated", event_id);
        Ok(())
    }

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/events/{}", self.base_url, event_id);
        tracing::info!("Deleting event {}", event_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        ensure_success(response, "events").await?;

        Ok(())
    }
}
