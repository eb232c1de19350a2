//! Push delivery operations.
//!
//! Single, batch, list, broadcast, and tag pushes, plus control over
//! scheduled tasks. Successful pushes answer with a `task_id` payload
//! that can be fed to the statistics queries.

use reqwest::Method;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::push::{Audience, AudienceRequest, PushRequest};
use crate::models::ApiResponse;

pub struct PushApi<'a> {
    client: &'a Client,
}

impl<'a> PushApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn prepare(&self, request: &mut PushRequest) -> Result<()> {
        request.validate()?;
        request.ensure_request_id(|| self.client.generate_request_id());
        Ok(())
    }

    fn prepare_audience(&self, request: &mut AudienceRequest) -> Result<()> {
        request.validate()?;
        request.ensure_request_id(|| self.client.generate_request_id());
        Ok(())
    }

    /// Push to a single client by cid.
    pub async fn to_single_by_cid(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/single/cid", &request)
            .await
    }

    /// Push to a single client by alias.
    pub async fn to_single_by_alias(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/single/alias", &request)
            .await
    }

    /// Batch variant of the single-cid push.
    pub async fn batch_by_cid(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/single/batch/cid", &request)
            .await
    }

    /// Batch variant of the single-alias push.
    pub async fn batch_by_alias(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/single/batch/alias", &request)
            .await
    }

    /// Broadcast to every client of the application. The audience is
    /// forced to `"all"` regardless of what the request carried.
    pub async fn to_all(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        request.audience = Audience::All;
        self.client
            .send_json(Method::POST, "/push/all", &request)
            .await
    }

    /// Push to clients matching tag expressions.
    pub async fn by_tag(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/tag", &request)
            .await
    }

    /// Push by a single pre-registered custom tag.
    pub async fn by_fast_custom_tag(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/fast_custom_tag", &request)
            .await
    }

    /// Create a reusable message body for the list-push endpoints.
    pub async fn create_message(&self, mut request: PushRequest) -> Result<ApiResponse> {
        self.prepare(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/list/message", &request)
            .await
    }

    /// Deliver a previously created message to a cid list.
    pub async fn list_by_cid(&self, mut request: AudienceRequest) -> Result<ApiResponse> {
        self.prepare_audience(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/list/cid", &request)
            .await
    }

    /// Deliver a previously created message to an alias list.
    pub async fn list_by_alias(&self, mut request: AudienceRequest) -> Result<ApiResponse> {
        self.prepare_audience(&mut request)?;
        self.client
            .send_json(Method::POST, "/push/list/alias", &request)
            .await
    }

    /// Stop an in-flight delivery task.
    pub async fn stop_task(&self, task_id: &str) -> Result<ApiResponse> {
        if task_id.is_empty() {
            return Err(Error::EmptyTaskId);
        }
        self.client
            .send(Method::DELETE, &format!("/task/{task_id}"))
            .await
    }

    /// Look up a scheduled task.
    pub async fn query_schedule_task(&self, task_id: &str) -> Result<ApiResponse> {
        if task_id.is_empty() {
            return Err(Error::EmptyTaskId);
        }
        self.client
            .send(Method::GET, &format!("/task/schedule/{task_id}"))
            .await
    }

    /// Cancel a scheduled task before it fires.
    pub async fn delete_schedule_task(&self, task_id: &str) -> Result<ApiResponse> {
        if task_id.is_empty() {
            return Err(Error::EmptyTaskId);
        }
        self.client
            .send(Method::DELETE, &format!("/task/schedule/{task_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::push::PushMessage;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
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

    #[tokio::test]
    async fn out_of_bounds_request_id_is_rejected_locally() {
        // No mock server: validation must fail before any network access.
        let client = test_client("http://127.0.0.1:9");
        let mut request = PushRequest::new(Audience::All, PushMessage::default());
        request.request_id = "short".into();

        let err = client.push().to_single_by_cid(request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequestId));
    }

    #[tokio::test]
    async fn empty_task_id_is_rejected_locally() {
        let client = test_client("http://127.0.0.1:9");
        assert!(matches!(
            client.push().stop_task("").await.unwrap_err(),
            Error::EmptyTaskId
        ));
        assert!(matches!(
            client.push().query_schedule_task("").await.unwrap_err(),
            Error::EmptyTaskId
        ));
    }

    #[tokio::test]
    async fn to_all_forces_the_audience() {
        let server = MockServer::start().await;
        mount_auth(&server).await;

        Mock::given(method("POST"))
            .and(path("/app-id/push/all"))
            .and(body_partial_json(json!({"audience": "all"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = PushRequest::new(
            Audience::Cids(vec!["ignored".into()]),
            PushMessage::transmission("{}"),
        );
        client.push().to_all(request).await.unwrap();
    }

    #[tokio::test]
    async fn stop_task_hits_the_task_endpoint() {
        let server = MockServer::start().await;
        mount_auth(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/app-id/task/t-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.push().stop_task("t-42").await.unwrap();
        assert!(response.is_success());
    }
}
