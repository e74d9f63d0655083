use crate::utils::error::{Result, SyncError};
use reqwest::{Client, Response};
use std::time::Duration;

/// 建立 HTTP client。未設定 timeout 時沿用 reqwest 預設（無逾時）。
pub fn build_client(proxy_url: Option<&str>, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();

    if let Some(proxy) = proxy_url {
        tracing::debug!("Routing requests through proxy {}", proxy);
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Consumes a non-success response into `SyncError::Api`, keeping the body for the log line.
pub async fn api_error(response: Response) -> SyncError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    SyncError::Api { status, body }
}

pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
