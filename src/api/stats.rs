//! Delivery and usage statistics queries.
//!
//! Date-scoped queries default to today when no date is given, matching
//! the remote API's expectations.

use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::json;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::ApiResponse;

fn date_path(prefix: &str, date: Option<NaiveDate>) -> String {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    format!("{}/{}", prefix, date.format("%Y-%m-%d"))
}

pub struct StatsApi<'a> {
    client: &'a Client,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Delivery funnel counts for a batch of tasks.
    pub async fn push_result_by_task_ids(&self, task_ids: &[String]) -> Result<ApiResponse> {
        if task_ids.is_empty() {
            return Err(Error::EmptyTaskId);
        }
        self.client
            .send_json(
                Method::POST,
                "/report/push/result",
                &json!({ "task_id_list": task_ids }),
            )
            .await
    }

    /// Delivery funnel counts for a single task.
    pub async fn push_result_by_task_id(&self, task_id: &str) -> Result<ApiResponse> {
        if task_id.is_empty() {
            return Err(Error::EmptyTaskId);
        }
        self.client
            .send(Method::GET, &format!("/report/push/task/{task_id}"))
            .await
    }

    /// Aggregate push results for one day (today when `None`).
    pub async fn push_result_by_date(&self, date: Option<NaiveDate>) -> Result<ApiResponse> {
        self.client
            .send(Method::GET, &date_path("/report/push/date", date))
            .await
    }

    /// Daily user counts (new, online, active).
    pub async fn user_data(&self, date: Option<NaiveDate>) -> Result<ApiResponse> {
        self.client
            .send(Method::GET, &date_path("/report/user/date", date))
            .await
    }

    /// Daily delivery performance breakdown.
    pub async fn performance_data(&self, date: Option<NaiveDate>) -> Result<ApiResponse> {
        self.client
            .send(Method::GET, &date_path("/report/performance/date", date))
            .await
    }

    /// Daily application-level data.
    pub async fn app_data(&self, date: Option<NaiveDate>) -> Result<ApiResponse> {
        self.client
            .send(Method::GET, &date_path("/report/app/date", date))
            .await
    }

    /// Current online user count.
    pub async fn online_user_count(&self) -> Result<ApiResponse> {
        self.client.send(Method::GET, "/report/online_user").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> Client {
        let mut config = Config::new("app-id", "app-key", "master-secret");
        config.base_url = base_url.to_string();
        Client::new(config).unwrap()
    }

    async fn mount_auth(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/app-id/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "success",
                "data": { "token": "abc123" }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn explicit_dates_format_as_iso_days() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            date_path("/report/push/date", Some(date)),
            "/report/push/date/2024-03-07"
        );
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(
            date_path("/report/user/date", None),
            format!("/report/user/date/{today}")
        );
    }

    #[tokio::test]
    async fn empty_task_ids_are_rejected_locally() {
        let client = test_client("http://127.0.0.1:9");
        assert!(matches!(
            client.stats().push_result_by_task_ids(&[]).await.unwrap_err(),
            Error::EmptyTaskId
        ));
        assert!(matches!(
            client.stats().push_result_by_task_id("").await.unwrap_err(),
            Error::EmptyTaskId
        ));
    }

    #[tokio::test]
    async fn task_batch_query_sends_the_id_list() {
        let server = MockServer::start().await;
        mount_auth(&server).await;

        Mock::given(method("POST"))
            .and(path("/app-id/report/push/result"))
            .and(body_json(json!({"task_id_list": ["t-1", "t-2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "success",
                "data": [
                    {"task_id": "t-1", "send_count": 10, "receive_count": 9,
                     "display_count": 8, "click_count": 2}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .stats()
            .push_result_by_task_ids(&["t-1".into(), "t-2".into()])
            .await
            .unwrap();

        let stats: Vec<crate::models::report::TaskStatistics> = response.data_as().unwrap();
        assert_eq!(stats[0].task_id, "t-1");
        assert_eq!(stats[0].click_count, 2);
    }
}
