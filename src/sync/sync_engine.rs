use crate::adapt::{generic, holiday, leave, task};
use crate::aggregate::dedup_by_key;
use crate::calendar::CanonicalEvent;
use crate::storage::config::Config;

use super::ApiError;
use super::event_api::{CreatedEventInfo, EventApiClient, EventDraft, EventsApi};
use super::holiday_api::HolidayApiClient;
use super::leave_api::LeaveApiClient;
use super::task_api::TaskApiClient;

/// Owns the per-source clients and turns raw fetch results into
/// canonical events. Per-clinic leave and holiday fetches fan out
/// concurrently; a failed clinic contributes an empty list instead of
/// aborting the refresh cycle. Expired-session errors are the one
/// exception: they propagate for the session layer to handle.
pub struct SyncEngine {
    config: Config,
    tasks: TaskApiClient,
    leaves: LeaveApiClient,
    holidays: HolidayApiClient,
    events: EventApiClient,
}

impl SyncEngine {
    pub fn new(config: Config) -> Self {
        let base_url = config.api.base_url.clone();
        let token = config.api.auth_token.clone();
        Self {
            tasks: TaskApiClient::new(base_url.clone(), token.clone()),
            leaves: LeaveApiClient::new(base_url.clone(), token.clone()),
            holidays: HolidayApiClient::new(base_url.clone(), token.clone()),
            events: EventApiClient::new(base_url, token),
            config,
        }
    }

    pub async fn refresh_tasks(&self) -> Result<Vec<CanonicalEvent>, ApiError> {
        let records = self.tasks.fetch_tasks().await?;
        Ok(records.iter().filter_map(task::adapt).collect())
    }

    pub async fn refresh_leaves(&self) -> Result<Vec<CanonicalEvent>, ApiError> {
        let doctor_id = self.config.clinics.doctor_id;
        let mut handles = Vec::new();
        for &clinic_id in &self.config.clinics.clinic_ids {
            let client = self.leaves.clone();
            handles.push((
                clinic_id,
                tokio::spawn(async move { client.fetch_leaves(doctor_id, clinic_id).await }),
            ));
        }

        let mut raw = Vec::new();
        for (clinic_id, handle) in handles {
            match handle.await {
                Ok(Ok(records)) => raw.extend(records),
                Ok(Err(ApiError::AuthenticationFailed)) => {
                    return Err(ApiError::AuthenticationFailed);
                }
                Ok(Err(err)) => {
                    tracing::warn!("Leave fetch failed for clinic {}: {}", clinic_id, err);
                }
                Err(err) => {
                    tracing::warn!("Leave fetch for clinic {} aborted: {}", clinic_id, err);
                }
            }
        }

        // Overlapping clinics can return the same leave row.
        let raw = dedup_by_key(raw, |record| record.id);
        Ok(raw.iter().filter_map(leave::adapt).collect())
    }

    pub async fn refresh_holidays(&self) -> Result<Vec<CanonicalEvent>, ApiError> {
        let mut handles = Vec::new();
        for &clinic_id in &self.config.clinics.clinic_ids {
            let client = self.holidays.clone();
            handles.push((
                clinic_id,
                tokio::spawn(async move { client.fetch_holidays(clinic_id).await }),
            ));
        }

        let mut raw = Vec::new();
        for (clinic_id, handle) in handles {
            match handle.await {
                Ok(Ok(records)) => raw.extend(records),
                Ok(Err(ApiError::AuthenticationFailed)) => {
                    return Err(ApiError::AuthenticationFailed);
                }
                Ok(Err(err)) => {
                    tracing::warn!("Holiday fetch failed for clinic {}: {}", clinic_id, err);
                }
                Err(err) => {
                    tracing::warn!("Holiday fetch for clinic {} aborted: {}", clinic_id, err);
                }
            }
        }

        let raw = dedup_by_key(raw, |record| record.id);
        Ok(raw.iter().filter_map(holiday::adapt).collect())
    }

    pub async fn refresh_events(&self) -> Result<Vec<CanonicalEvent>, ApiError> {
        let records = self.events.fetch_events().await?;
        Ok(records.iter().filter_map(generic::adapt).collect())
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEventInfo, ApiError> {
        self.events.create_event(draft).await
    }

    pub async fn update_event(&self, event_id: i64, draft: &EventDraft) -> Result<(), ApiError> {
        self.events.update_event(event_id, draft).await
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        self.events.delete_event(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, clinic_ids: Vec<i64>) -> Config {
        let mut config = Config::default();
        config.api.base_url = server.uri();
        config.clinics.doctor_id = 17;
        config.clinics.clinic_ids = clinic_ids;
        config
    }

    fn leave_body(id: i64) -> serde_json::Value {
        json!({
            "status": "success",
            "data": [
                {"id": id, "start_date": "2024-06-10", "end_date": "2024-06-10",
                 "leave_type": "sick", "approved": true}
            ]
        })
    }

    #[tokio::test]
    async fn leave_refresh_fans_out_over_clinics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .and(query_param("clinic_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leave_body(5)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .and(query_param("clinic_id", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leave_body(6)))
            .mount(&server)
            .await;

        let engine = SyncEngine::new(config_for(&server, vec![1, 2]));
        let mut leaves = engine.refresh_leaves().await.unwrap();
        leaves.sort_by(|a, b| a.id.cmp(&b.id));

        let ids: Vec<&str> = leaves.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["leave-5", "leave-6"]);
    }

    #[tokio::test]
    async fn duplicate_rows_across_clinics_adapt_once() {
        let server = MockServer::start().await;
        // Both clinics return the same leave row.
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leave_body(5)))
            .mount(&server)
            .await;

        let engine = SyncEngine::new(config_for(&server, vec![1, 2]));
        let leaves = engine.refresh_leaves().await.unwrap();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].id, "leave-5");
    }

    #[tokio::test]
    async fn failed_clinic_contributes_an_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .and(query_param("clinic_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leave_body(5)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .and(query_param("clinic_id", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let engine = SyncEngine::new(config_for(&server, vec![1, 2]));
        let leaves = engine.refresh_leaves().await.unwrap();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].id, "leave-5");
    }

    #[tokio::test]
    async fn expired_session_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let engine = SyncEngine::new(config_for(&server, vec![1]));
        assert!(matches!(
            engine.refresh_leaves().await,
            Err(ApiError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn malformed_rows_are_dropped_during_adaptation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "results": [
                    {"id": 1, "title": "Has due date", "dueDate": "2024-06-10T14:00:00Z"},
                    {"id": 2, "title": "No due date"}
                ]
            })))
            .mount(&server)
            .await;

        let engine = SyncEngine::new(config_for(&server, vec![]));
        let tasks = engine.refresh_tasks().await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "task-1");
    }

    #[tokio::test]
    async fn no_clinics_means_no_leave_fetches() {
        let server = MockServer::start().await;
        let engine = SyncEngine::new(config_for(&server, vec![]));

        assert!(engine.refresh_leaves().await.unwrap().is_empty());
        assert!(engine.refresh_holidays().await.unwrap().is_empty());
    }
}
