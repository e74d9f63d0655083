use crate::core::mapper::map_item;
use crate::domain::model::{ApiResult, ItemOutcome, SourceItem};
use crate::domain::ports::{ListingDestination, ListingSource};
use futures::future::join_all;
use tracing::Instrument;

/// eBay → TEMU 同步引擎
pub struct SyncEngine<S: ListingSource, D: ListingDestination> {
    source: S,
    destination: D,
}

impl<S: ListingSource, D: ListingDestination> SyncEngine<S, D> {
    pub fn new(source: S, destination: D) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    /// 執行一次完整同步。每個項目各自成功或失敗，結果只透過日誌回報。
    pub async fn run(&self) -> Vec<ItemOutcome> {
        tracing::info!("🚀 Starting eBay → TEMU sync");

        let items = self.source.fetch_active_listings().await;
        if items.is_empty() {
            tracing::info!("No active eBay listings to sync");
            return Vec::new();
        }
        tracing::info!("Syncing {} items", items.len());

        if self.destination.authenticate().await.is_none() {
            tracing::warn!("⚠️ TEMU pre-authentication failed, items will retry auth lazily");
        }

        let tasks = items.iter().map(|item| {
            let span = tracing::info_span!("sync_item", source_id = %item.id);
            self.sync_item(item).instrument(span)
        });
        let outcomes = join_all(tasks).await;

        let synced = outcomes.iter().filter(|o| o.is_synced()).count();
        tracing::info!(
            "🏁 Sync run finished: {} synced, {} failed",
            synced,
            outcomes.len() - synced
        );

        outcomes
    }

    async fn sync_item(&self, item: &SourceItem) -> ItemOutcome {
        let payload = map_item(item);

        let created = match self.destination.create_listing(&payload).await {
            ApiResult::Success(response) if response.success => response,
            ApiResult::Success(response) => {
                let error = response
                    .message
                    .unwrap_or_else(|| "TEMU rejected the listing".to_string());
                return self.failed(item, error);
            }
            ApiResult::Failure { error } => return self.failed(item, error),
        };

        let Some(goods_id) = created.goods_id else {
            return self.failed(item, "create response has no goods_id".to_string());
        };

        let status = match self.destination.check_status(&goods_id).await {
            ApiResult::Success(status) => Some(status.status),
            ApiResult::Failure { error } => {
                tracing::warn!(
                    "⚠️ Listing {} created but status check failed: {}",
                    goods_id,
                    error
                );
                None
            }
        };

        tracing::info!(
            "✅ Synced {} → TEMU goods {} (status: {})",
            item.id,
            goods_id,
            status.as_deref().unwrap_or("unknown")
        );

        ItemOutcome::Synced {
            source_id: item.id.clone(),
            goods_id,
            status,
        }
    }

    fn failed(&self, item: &SourceItem, error: String) -> ItemOutcome {
        tracing::error!("❌ Failed to sync {}: {}", item.id, error);
        ItemOutcome::Failed {
            source_id: item.id.clone(),
            error,
        }
    }
}
