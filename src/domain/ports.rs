use crate::domain::model::{
    ApiResult, DestinationListingPayload, ListingResponse, ListingStatus, SourceItem,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 來源市集（eBay）。失敗一律降級為空結果並記錄日誌。
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_active_listings(&self) -> Vec<SourceItem>;
}

/// 目的市集（TEMU）。授權呼叫的失敗以 `ApiResult::Failure` 回傳。
#[async_trait]
pub trait ListingDestination: Send + Sync {
    async fn authenticate(&self) -> Option<String>;
    async fn create_listing(&self, payload: &DestinationListingPayload) -> ApiResult<ListingResponse>;
    async fn update_listing(&self, payload: &DestinationListingPayload) -> ApiResult<ListingResponse>;
    async fn check_status(&self, goods_id: &str) -> ApiResult<ListingStatus>;
}

/// Line-oriented `KEY=VALUE` credential store.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn upsert(&self, key: &str, value: &str) -> Result<()>;
}
