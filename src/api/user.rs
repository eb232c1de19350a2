//! User, alias, and tag management.

use reqwest::Method;
use serde_json::json;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::push::AliasBinding;
use crate::models::ApiResponse;

/// Page size bounds for the user list endpoint.
const MAX_PAGE_SIZE: u32 = 1000;
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Clamp paging parameters to what the API accepts.
fn clamp_paging(page: u32, size: u32) -> (u32, u32) {
    let page = if page == 0 { 1 } else { page };
    let size = if size == 0 || size > MAX_PAGE_SIZE {
        DEFAULT_PAGE_SIZE
    } else {
        size
    };
    (page, size)
}

pub struct UserApi<'a> {
    client: &'a Client,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Online/offline status for a set of clients.
    pub async fn status(&self, cids: &[String]) -> Result<ApiResponse> {
        if cids.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send_json(Method::POST, "/user/status", &json!({ "cid": cids }))
            .await
    }

    /// Detailed information for one client.
    pub async fn detail(&self, cid: &str) -> Result<ApiResponse> {
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send(Method::GET, &format!("/user/detail/{cid}"))
            .await
    }

    /// The alias bound to a cid, if any.
    pub async fn alias_by_cid(&self, cid: &str) -> Result<ApiResponse> {
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send(Method::GET, &format!("/user/alias/{cid}"))
            .await
    }

    /// All cids bound to an alias.
    pub async fn cid_by_alias(&self, alias: &str) -> Result<ApiResponse> {
        if alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        self.client
            .send(Method::GET, &format!("/user/cid/{alias}"))
            .await
    }

    /// Bind an alias to a cid.
    pub async fn bind_alias(&self, alias: &str, cid: &str) -> Result<ApiResponse> {
        if alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send_json(
                Method::POST,
                "/user/alias",
                &json!({ "alias": alias, "cid": cid }),
            )
            .await
    }

    /// Remove the alias binding for a cid.
    pub async fn unbind_alias(&self, alias: &str, cid: &str) -> Result<ApiResponse> {
        if alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send_json(
                Method::DELETE,
                "/user/alias",
                &json!({ "alias": alias, "cid": cid }),
            )
            .await
    }

    /// Bind many alias/cid pairs in one call.
    pub async fn bind_alias_batch(&self, bindings: &[AliasBinding]) -> Result<ApiResponse> {
        if bindings.is_empty() {
            return Err(Error::EmptyBindingList);
        }
        self.client
            .send_json(
                Method::POST,
                "/user/alias/batch",
                &json!({ "data_list": bindings }),
            )
            .await
    }

    /// Remove many alias/cid pairs in one call.
    pub async fn unbind_alias_batch(&self, bindings: &[AliasBinding]) -> Result<ApiResponse> {
        if bindings.is_empty() {
            return Err(Error::EmptyBindingList);
        }
        self.client
            .send_json(
                Method::DELETE,
                "/user/alias/batch",
                &json!({ "data_list": bindings }),
            )
            .await
    }

    /// Replace the tag set of a client. An empty list clears the tags.
    pub async fn set_tags(&self, cid: &str, tags: &[String]) -> Result<ApiResponse> {
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send_json(
                Method::POST,
                "/user/tag",
                &json!({ "cid": cid, "tags": tags }),
            )
            .await
    }

    /// The tags currently set on a client.
    pub async fn tags(&self, cid: &str) -> Result<ApiResponse> {
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send(Method::GET, &format!("/user/tag/{cid}"))
            .await
    }

    /// Remove specific tags from a client.
    pub async fn delete_tags(&self, cid: &str, tags: &[String]) -> Result<ApiResponse> {
        if cid.is_empty() {
            return Err(Error::EmptyCid);
        }
        self.client
            .send_json(
                Method::DELETE,
                "/user/tag",
                &json!({ "cid": cid, "tags": tags }),
            )
            .await
    }

    /// Total registered user count.
    pub async fn count(&self) -> Result<ApiResponse> {
        self.client.send(Method::GET, "/user/count").await
    }

    /// Paged user listing. Out-of-range paging values fall back to
    /// page 1 / size 100.
    pub async fn list(&self, page: u32, size: u32) -> Result<ApiResponse> {
        let (page, size) = clamp_paging(page, size);
        self.client
            .send(Method::GET, &format!("/user/list?page={page}&size={size}"))
            .await
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
    fn paging_is_clamped() {
        assert_eq!(clamp_paging(0, 0), (1, 100));
        assert_eq!(clamp_paging(3, 2000), (3, 100));
        assert_eq!(clamp_paging(2, 500), (2, 500));
        assert_eq!(clamp_paging(1, 1000), (1, 1000));
    }

    #[tokio::test]
    async fn empty_identifiers_are_rejected_locally() {
        let client = test_client("http://127.0.0.1:9");
        let users = client.users();

        assert!(matches!(users.status(&[]).await.unwrap_err(), Error::EmptyCid));
        assert!(matches!(users.detail("").await.unwrap_err(), Error::EmptyCid));
        assert!(matches!(
            users.cid_by_alias("").await.unwrap_err(),
            Error::EmptyAlias
        ));
        assert!(matches!(
            users.bind_alias("", "cid").await.unwrap_err(),
            Error::EmptyAlias
        ));
        assert!(matches!(
            users.bind_alias("alias", "").await.unwrap_err(),
            Error::EmptyCid
        ));
        assert!(matches!(
            users.bind_alias_batch(&[]).await.unwrap_err(),
            Error::EmptyBindingList
        ));
    }

    #[tokio::test]
    async fn bind_alias_sends_the_expected_body() {
        let server = MockServer::start().await;
        mount_auth(&server).await;

        Mock::given(method("POST"))
            .and(path("/app-id/user/alias"))
            .and(body_json(json!({"alias": "alice", "cid": "cid-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.users().bind_alias("alice", "cid-1").await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn list_applies_clamped_paging_to_the_query() {
        let server = MockServer::start().await;
        mount_auth(&server).await;

        Mock::given(method("GET"))
            .and(path("/app-id/user/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.users().list(0, 5000).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let list = requests
            .iter()
            .find(|r| r.url.path() == "/app-id/user/list")
            .unwrap();
        assert_eq!(list.url.query(), Some("page=1&size=100"));
    }
}
