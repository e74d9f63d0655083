use crate::adapters::http::{api_error, build_client, join_url};
use crate::config::EbayConfig;
use crate::domain::model::{AccessTokenResponse, SourceItem};
use crate::domain::ports::{CredentialStore, ListingSource};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

pub const ACCESS_TOKEN_KEY: &str = "EBAY_OAUTH_TOKEN";
pub const INVENTORY_PAGE_SIZE: u32 = 50;

const TOKEN_PATH: &str = "identity/v1/oauth2/token";
const INVENTORY_PATH: &str = "sell/inventory/v1/inventory_item";
const LOCATION_PATH: &str = "sell/inventory/v1/location";
const REFRESH_SCOPES: &str = "https://api.ebay.com/oauth/api_scope/sell.inventory.readonly https://api.ebay.com/oauth/api_scope/sell.inventory";

/// eBay Sell Inventory API client.
///
/// Stale access tokens are only noticed through a 401. The inventory fetch then
/// refreshes once and retries once; the new token is persisted to the store.
pub struct EbayClient<S: CredentialStore> {
    config: EbayConfig,
    client: Client,
    access_token: RwLock<Option<String>>,
    store: S,
}

impl<S: CredentialStore> EbayClient<S> {
    pub fn new(config: EbayConfig, store: S, timeout: Option<Duration>) -> Result<Self> {
        let client = build_client(config.proxy_url.as_deref(), timeout)?;
        let access_token = RwLock::new(config.access_token.clone());
        Ok(Self {
            config,
            client,
            access_token,
            store,
        })
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// 以 refresh token 換取新的 access token，並寫回 `.env`
    pub async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresh_token) = self.config.refresh_token.as_deref() else {
            tracing::error!("❌ EBAY_REFRESH_TOKEN missing, cannot refresh eBay token");
            return None;
        };

        let token = match self.request_token(refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("❌ eBay token refresh failed: {}", e);
                return None;
            }
        };

        *self.access_token.write().await = Some(token.clone());

        match self.store.upsert(ACCESS_TOKEN_KEY, &token) {
            Ok(()) => tracing::info!("✅ eBay token refreshed and saved"),
            Err(e) => tracing::error!("❌ eBay token refreshed but not persisted: {}", e),
        }

        Some(token)
    }

    async fn request_token(&self, refresh_token: &str) -> Result<String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", REFRESH_SCOPES),
        ];

        let response = self
            .client
            .post(join_url(&self.config.api_base_url, TOKEN_PATH))
            .basic_auth(
                self.config.client_id.as_deref().unwrap_or_default(),
                self.config.client_secret.as_deref(),
            )
            .form(&params)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(response).await);
        }

        let body: AccessTokenResponse = response.json().await?;
        Ok(body.access_token)
    }

    async fn send_inventory_request(&self, token: Option<&str>) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(join_url(&self.config.api_base_url, INVENTORY_PATH))
            .query(&[("limit", INVENTORY_PAGE_SIZE)])
            .bearer_auth(token.unwrap_or_default())
            .send()
            .await?;
        Ok(response)
    }

    async fn try_fetch_active_listings(&self) -> Result<Vec<SourceItem>> {
        let token = self.access_token().await;
        let mut response = self.send_inventory_request(token.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("🔑 eBay token rejected (401), refreshing");
            let Some(token) = self.refresh_access_token().await else {
                return Err(api_error(response).await);
            };
            response = self.send_inventory_request(Some(&token)).await?;
        }

        if response.status() != StatusCode::OK {
            return Err(api_error(response).await);
        }

        let page: InventoryPage = response.json().await?;
        Ok(page.into_source_items())
    }

    /// 建立測試倉庫與一筆測試商品，讓同步流程有資料可抓
    pub async fn seed_sample_inventory(&self, seed: &SeedSpec) -> Result<()> {
        let token = self
            .access_token()
            .await
            .ok_or_else(|| SyncError::MissingConfigError {
                field: ACCESS_TOKEN_KEY.to_string(),
            })?;

        let location = json!({
            "location": {
                "address": {
                    "addressLine1": "123 Test Street",
                    "city": "San Jose",
                    "stateOrProvince": "CA",
                    "postalCode": "95125",
                    "countryCode": "US"
                }
            },
            "locationInstructions": "Deliver to front desk.",
            "name": "Main Warehouse",
            "locationTypes": ["WAREHOUSE"]
        });

        let location_url = join_url(
            &self.config.api_base_url,
            &format!("{}/{}", LOCATION_PATH, seed.location_key),
        );
        let response = self
            .client
            .post(location_url)
            .bearer_auth(&token)
            .header("Content-Language", "en-US")
            .header("Accept", "application/json")
            .json(&location)
            .send()
            .await?;

        // 已存在時 eBay 回 400/409，可忽略
        if !response.status().is_success() {
            tracing::debug!(
                "Location {} not created ({}), assuming it exists",
                seed.location_key,
                response.status()
            );
        }

        let aspects: BTreeMap<&str, Vec<&str>> = seed
            .aspects
            .iter()
            .map(|(name, value)| (name.as_str(), vec![value.as_str()]))
            .collect();

        let item = json!({
            "availability": {
                "shipToLocationAvailability": { "quantity": seed.quantity }
            },
            "condition": "NEW",
            "product": {
                "title": seed.title,
                "description": seed.description,
                "aspects": aspects,
                "imageUrls": seed.image_urls,
            }
        });

        let item_url = join_url(
            &self.config.api_base_url,
            &format!("{}/{}", INVENTORY_PATH, seed.sku),
        );
        let response = self
            .client
            .put(item_url)
            .bearer_auth(&token)
            .header("Content-Language", "en-US")
            .header("Accept", "application/json")
            .json(&item)
            .send()
            .await?;

        match response.status().as_u16() {
            200 | 201 | 204 => {
                tracing::info!("✅ SKU {} is ready", seed.sku);
                Ok(())
            }
            _ => {
                let err = api_error(response).await;
                tracing::error!("❌ Product seed failed: {}", err);
                Err(err)
            }
        }
    }

    /// 建立測試商品後再抓一次庫存，回傳抓到的筆數。建立失敗仍會執行檢查。
    pub async fn seed_and_verify(&self, seed: &SeedSpec) -> usize {
        if let Err(e) = self.seed_sample_inventory(seed).await {
            tracing::warn!("⚠️ Seeding did not complete ({}), checking inventory anyway", e);
        }
        self.fetch_active_listings().await.len()
    }
}

#[async_trait]
impl<S: CredentialStore> ListingSource for EbayClient<S> {
    async fn fetch_active_listings(&self) -> Vec<SourceItem> {
        match self.try_fetch_active_listings().await {
            Ok(items) => {
                tracing::info!("📦 Fetched {} active eBay listings", items.len());
                items
            }
            Err(e) => {
                tracing::error!("❌ eBay inventory fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

/// Sample product written by `seed_sample_inventory`.
#[derive(Debug, Clone)]
pub struct SeedSpec {
    pub location_key: String,
    pub sku: String,
    pub quantity: u32,
    pub title: String,
    pub description: String,
    pub aspects: BTreeMap<String, String>,
    pub image_urls: Vec<String>,
}

impl Default for SeedSpec {
    fn default() -> Self {
        let mut aspects = BTreeMap::new();
        aspects.insert("Brand".to_string(), "SyncMaster".to_string());
        aspects.insert("Type".to_string(), "Test Item".to_string());

        Self {
            location_key: "MOCK_WAREHOUSE_01".to_string(),
            sku: "TEST-SYNC-ITEM-001".to_string(),
            quantity: 10,
            title: "Professional Sync Test Product".to_string(),
            description: "A test product for the TEMU sync engine project.".to_string(),
            aspects,
            image_urls: vec!["https://picsum.photos/200/300".to_string()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryPage {
    // 逐筆解析，單筆壞資料不影響整頁
    #[serde(default)]
    inventory_items: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInventoryItem {
    sku: Option<String>,
    #[serde(default)]
    product: RawProduct,
    #[serde(default)]
    availability: RawAvailability,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    title: Option<String>,
    pricing_summary: Option<RawPricingSummary>,
    aspects: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPricingSummary {
    price: Option<RawAmount>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAmount {
    value: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAvailability {
    ship_to_location_availability: Option<RawShipToLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct RawShipToLocation {
    quantity: Option<u32>,
}

impl InventoryPage {
    fn into_source_items(self) -> Vec<SourceItem> {
        self.inventory_items
            .into_iter()
            .filter_map(|value| {
                let sku = value
                    .get("sku")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<missing>")
                    .to_string();
                let raw: RawInventoryItem = match serde_json::from_value(value) {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!("⚠️ Skipping malformed eBay inventory item {}: {}", sku, e);
                        return None;
                    }
                };
                let item = raw.into_source_item();
                if item.is_none() {
                    tracing::warn!("⚠️ Skipping eBay inventory item without SKU");
                }
                item
            })
            .collect()
    }
}

impl RawInventoryItem {
    fn into_source_item(self) -> Option<SourceItem> {
        let id = self.sku.filter(|sku| !sku.is_empty())?;

        // 金額可能是字串 "24.99" 或數字
        let price = self
            .product
            .pricing_summary
            .and_then(|summary| summary.price)
            .and_then(|amount| amount.value)
            .and_then(|value| match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            });

        let specifics = self
            .product
            .aspects
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, values)| values.into_iter().next().map(|v| (name, v)))
            .collect();

        Some(SourceItem {
            id,
            title: self.product.title,
            price,
            quantity: self
                .availability
                .ship_to_location_availability
                .and_then(|ship| ship.quantity),
            specifics,
        })
    }
}
