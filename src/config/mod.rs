use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, warn_if_missing, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EBAY_API_BASE_URL: &str = "https://api.ebay.com";
pub const DEFAULT_TEMU_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// eBay 端的連線與 OAuth 設定
#[derive(Debug, Clone, PartialEq)]
pub struct EbayConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub proxy_url: Option<String>,
}

/// TEMU 端的連線與 client credentials 設定
#[derive(Debug, Clone, PartialEq)]
pub struct TemuConfig {
    pub api_base_url: String,
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub ebay: EbayConfig,
    pub temu: TemuConfig,
    pub env_file: PathBuf,
    pub http_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl SyncConfig {
    /// 從行程環境變數建立設定（.env 應已先載入）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意查詢函式建立設定，測試時可直接傳入 HashMap
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字串視為未設定
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            ebay: EbayConfig {
                api_base_url: get("EBAY_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EBAY_API_BASE_URL.to_string()),
                access_token: get("EBAY_OAUTH_TOKEN"),
                client_id: get("EBAY_APP_ID"),
                client_secret: get("EBAY_APP_SECRET"),
                refresh_token: get("EBAY_REFRESH_TOKEN"),
                proxy_url: get("PROXY_URL"),
            },
            temu: TemuConfig {
                api_base_url: get("TEMU_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_TEMU_API_BASE_URL.to_string()),
                app_key: get("TEMU_APP_KEY"),
                app_secret: get("TEMU_APP_SECRET"),
            },
            env_file: PathBuf::from(
                get("SYNC_ENV_FILE").unwrap_or_else(|| DEFAULT_ENV_FILE.to_string()),
            ),
            http_timeout: get("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_format: match get("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Compact,
            },
        }
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validate_url("EBAY_API_BASE_URL", &self.ebay.api_base_url)?;
        validate_url("TEMU_API_BASE_URL", &self.temu.api_base_url)?;
        if let Some(proxy) = &self.ebay.proxy_url {
            validate_url("PROXY_URL", proxy)?;
        }
        validate_path("SYNC_ENV_FILE", &self.env_file.to_string_lossy())?;

        warn_if_missing("EBAY_OAUTH_TOKEN", &self.ebay.access_token);
        warn_if_missing("EBAY_REFRESH_TOKEN", &self.ebay.refresh_token);
        warn_if_missing("TEMU_APP_KEY", &self.temu.app_key);
        warn_if_missing("TEMU_APP_SECRET", &self.temu.app_secret);

        tracing::debug!("✅ Sync configuration validation passed");
        Ok(())
    }
}
