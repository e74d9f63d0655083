use listing_sync::utils::{logger, validation::Validate};
use listing_sync::{EbayClient, EnvFileStore, SyncConfig, SyncEngine, TemuClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 先載入 .env，再讀取設定
    let env_file = std::env::var("SYNC_ENV_FILE").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&env_file);

    let config = SyncConfig::from_env();
    logger::init_logger(config.log_format);

    match dotenv_result {
        Ok(()) => tracing::debug!("Loaded credentials from {}", env_file),
        Err(e) => tracing::warn!("⚠️ Could not load {}: {}", env_file, e),
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let store = EnvFileStore::new(config.env_file.clone());
    let source = EbayClient::new(config.ebay.clone(), store, config.http_timeout)?;
    let destination = TemuClient::new(config.temu.clone(), config.http_timeout)?;

    let engine = SyncEngine::new(source, destination);
    engine.run().await;

    Ok(())
}
