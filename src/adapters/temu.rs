use crate::adapters::http::{api_error, build_client, join_url};
use crate::config::TemuConfig;
use crate::domain::model::{
    AccessTokenResponse, ApiResult, DestinationListingPayload, ListingResponse, ListingStatus,
};
use crate::domain::ports::ListingDestination;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::RwLock;

const TOKEN_PATH: &str = "v1/oauth/token";
const CREATE_PATH: &str = "v1/goods/create";
const UPDATE_PATH: &str = "v1/goods/update";
const STATUS_PATH: &str = "v1/goods/status";

/// TEMU Open API client.
///
/// The token is fetched lazily on the first authorized call and never refreshed
/// on a 401; an expired token keeps failing until `authenticate` is called again.
pub struct TemuClient {
    config: TemuConfig,
    client: Client,
    access_token: RwLock<Option<String>>,
}

impl TemuClient {
    pub fn new(config: TemuConfig, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            config,
            client: build_client(None, timeout)?,
            access_token: RwLock::new(None),
        })
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    async fn request_token(&self) -> Result<String> {
        let payload = json!({
            "grant_type": "client_credentials",
            "client_id": self.config.app_key,
            "client_secret": self.config.app_secret,
        });

        let response = self
            .client
            .post(join_url(&self.config.api_base_url, TOKEN_PATH))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: AccessTokenResponse = response.json().await?;
        Ok(body.access_token)
    }

    /// 所有授權呼叫的共用入口：必要時先取得 token，失敗統一轉為 `ApiResult::Failure`
    async fn send_request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        if self.access_token().await.is_none() {
            self.authenticate().await;
        }
        let token = self.access_token().await.unwrap_or_default();

        match self.try_send(method, path, body, query, &token).await {
            Ok(value) => ApiResult::Success(value),
            Err(e) => {
                tracing::error!("❌ TEMU API request to {} failed: {}", path, e);
                ApiResult::failure(e.to_string())
            }
        }
    }

    async fn try_send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
        token: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(method, join_url(&self.config.api_base_url, path))
            .bearer_auth(token);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ListingDestination for TemuClient {
    async fn authenticate(&self) -> Option<String> {
        match self.request_token().await {
            Ok(token) => {
                *self.access_token.write().await = Some(token.clone());
                tracing::debug!("🔑 TEMU access token acquired");
                Some(token)
            }
            Err(e) => {
                tracing::error!("❌ TEMU auth failed: {}", e);
                None
            }
        }
    }

    async fn create_listing(&self, payload: &DestinationListingPayload) -> ApiResult<ListingResponse> {
        self.send_request(Method::POST, CREATE_PATH, Some(payload), &[])
            .await
    }

    async fn update_listing(&self, payload: &DestinationListingPayload) -> ApiResult<ListingResponse> {
        self.send_request(Method::POST, UPDATE_PATH, Some(payload), &[])
            .await
    }

    async fn check_status(&self, goods_id: &str) -> ApiResult<ListingStatus> {
        self.send_request::<(), _>(Method::GET, STATUS_PATH, None, &[("goods_id", goods_id)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapper::map_item;
    use crate::domain::model::SourceItem;
    use httpmock::prelude::*;
    use std::collections::BTreeMap;

    fn client_for(server: &MockServer) -> TemuClient {
        TemuClient::new(
            TemuConfig {
                api_base_url: server.base_url(),
                app_key: Some("app-key".to_string()),
                app_secret: Some("app-secret".to_string()),
            },
            None,
        )
        .unwrap()
    }

    fn sample_payload() -> DestinationListingPayload {
        map_item(&SourceItem {
            id: "SKU-1".to_string(),
            title: Some("Laptop Stand".to_string()),
            price: Some(24.99),
            quantity: Some(3),
            specifics: BTreeMap::new(),
        })
    }

    fn token_mock(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(POST)
                .path("/v1/oauth/token")
                .json_body(serde_json::json!({
                    "grant_type": "client_credentials",
                    "client_id": "app-key",
                    "client_secret": "app-secret"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"access_token": "dummy_token_abc123", "expires_in": 86400}));
        })
    }

    #[tokio::test]
    async fn test_authenticate_stores_token() {
        let server = MockServer::start();
        let auth = token_mock(&server);
        let client = client_for(&server);

        assert_eq!(
            client.authenticate().await.as_deref(),
            Some("dummy_token_abc123")
        );
        assert_eq!(
            client.access_token().await.as_deref(),
            Some("dummy_token_abc123")
        );
        auth.assert();
    }

    #[tokio::test]
    async fn test_authenticate_failure_returns_none() {
        let server = MockServer::start();
        let auth = server.mock(|when, then| {
            when.method(POST).path("/v1/oauth/token");
            then.status(401)
                .json_body(serde_json::json!({"error": "invalid_client"}));
        });
        let client = client_for(&server);

        assert_eq!(client.authenticate().await, None);
        assert_eq!(client.access_token().await, None);
        auth.assert();
    }

    #[tokio::test]
    async fn test_create_listing_authenticates_lazily_once() {
        let server = MockServer::start();
        let auth = token_mock(&server);
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/goods/create")
                .header("Authorization", "Bearer dummy_token_abc123")
                .body_contains("\"external_sku_id\":\"SKU-1-DEFAULT\"");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"success": true, "goods_id": 987654321, "message": "created"}));
        });
        let client = client_for(&server);

        let first = client.create_listing(&sample_payload()).await;
        let second = client.create_listing(&sample_payload()).await;

        auth.assert_hits(1);
        create.assert_hits(2);
        let response = first.into_result().unwrap();
        assert!(response.success);
        assert_eq!(response.goods_id.as_deref(), Some("987654321"));
        assert!(second.is_success());
    }

    #[tokio::test]
    async fn test_update_listing_posts_payload() {
        let server = MockServer::start();
        token_mock(&server);
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/goods/update")
                .body_contains("\"external_goods_id\":\"SKU-1\"");
            then.status(200)
                .json_body(serde_json::json!({"success": true, "goods_id": "987654321"}));
        });
        let client = client_for(&server);

        let result = client.update_listing(&sample_payload()).await;

        update.assert();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_check_status_sends_goods_id_query() {
        let server = MockServer::start();
        token_mock(&server);
        let status = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/goods/status")
                .query_param("goods_id", "987654321");
            then.status(200)
                .json_body(serde_json::json!({"goods_id": "987654321", "status": "ACTIVE", "msg": "Success"}));
        });
        let client = client_for(&server);

        let result = client.check_status("987654321").await.into_result().unwrap();

        status.assert();
        assert_eq!(result.status, "ACTIVE");
    }

    #[tokio::test]
    async fn test_http_error_becomes_uniform_failure() {
        let server = MockServer::start();
        token_mock(&server);
        server.mock(|when, then| {
            when.method(GET).path("/v1/goods/status");
            then.status(404)
                .json_body(serde_json::json!({"detail": "Goods ID not found in TEMU mock database"}));
        });
        let client = client_for(&server);

        let result = client.check_status("1").await;

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], serde_json::json!(false));
        assert!(json["error"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_uniform_failure() {
        // nothing listens on port 9 locally
        let client = TemuClient::new(
            TemuConfig {
                api_base_url: "http://127.0.0.1:9".to_string(),
                app_key: None,
                app_secret: None,
            },
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let result = client.create_listing(&sample_payload()).await;

        assert!(matches!(result, ApiResult::Failure { .. }));
        assert_eq!(client.access_token().await, None);
    }

    #[tokio::test]
    async fn test_no_reauthentication_after_401() {
        let server = MockServer::start();
        let auth = token_mock(&server);
        let create = server.mock(|when, then| {
            when.method(POST).path("/v1/goods/create");
            then.status(401)
                .json_body(serde_json::json!({"error": "token expired"}));
        });
        let client = client_for(&server);

        let first = client.create_listing(&sample_payload()).await;
        let second = client.create_listing(&sample_payload()).await;

        // the destination side does not self-heal, unlike the eBay client
        assert!(!first.is_success());
        assert!(!second.is_success());
        auth.assert_hits(1);
        create.assert_hits(2);
        assert_eq!(
            client.access_token().await.as_deref(),
            Some("dummy_token_abc123")
        );
    }
}
