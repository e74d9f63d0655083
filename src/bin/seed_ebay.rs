use clap::Parser;
use listing_sync::adapters::ebay::SeedSpec;
use listing_sync::utils::logger;
use listing_sync::utils::validation::validate_required_field;
use listing_sync::{EbayClient, EnvFileStore, SyncConfig};

/// 在 eBay sandbox 建立測試商品，讓同步流程有資料可抓
#[derive(Debug, Parser)]
#[command(name = "seed-ebay")]
#[command(about = "Refresh the eBay token, seed a sample inventory item and fetch it back")]
struct SeedArgs {
    #[arg(long, default_value = "TEST-SYNC-ITEM-001")]
    sku: String,

    #[arg(long, default_value = "MOCK_WAREHOUSE_01")]
    location_key: String,

    #[arg(long, default_value = "10")]
    quantity: u32,

    #[arg(long, help = "Skip the initial token refresh")]
    no_refresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SeedArgs::parse();

    let env_file = std::env::var("SYNC_ENV_FILE").unwrap_or_else(|_| ".env".to_string());
    dotenvy::from_path(&env_file).ok();

    let config = SyncConfig::from_env();
    logger::init_logger(config.log_format);

    validate_required_field("EBAY_APP_ID", &config.ebay.client_id)?;
    validate_required_field("EBAY_APP_SECRET", &config.ebay.client_secret)?;

    let store = EnvFileStore::new(config.env_file.clone());
    let client = EbayClient::new(config.ebay.clone(), store, config.http_timeout)?;

    if !args.no_refresh && client.refresh_access_token().await.is_none() {
        tracing::warn!("⚠️ Token refresh failed, seeding with the configured token");
    }

    let seed = SeedSpec {
        sku: args.sku,
        location_key: args.location_key,
        quantity: args.quantity,
        ..SeedSpec::default()
    };
    let count = client.seed_and_verify(&seed).await;
    println!("Final check: found {} items in inventory.", count);

    Ok(())
}
