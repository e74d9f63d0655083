use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Credential store error: {message}")]
    StoreError { message: String },
}

impl SyncError {
    /// 給操作者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SyncError::Http(_) => "Check network connectivity, PROXY_URL and the API base URLs",
            SyncError::Io(_) | SyncError::StoreError { .. } => {
                "Check that the .env file exists and is writable"
            }
            SyncError::Serialization(_) => "The remote API returned an unexpected payload",
            SyncError::Api { status: 401, .. } => {
                "Refresh the OAuth token (EBAY_REFRESH_TOKEN) or check the app credentials"
            }
            SyncError::Api { .. } => "Inspect the response body for the marketplace error code",
            SyncError::MissingConfigError { .. } | SyncError::InvalidConfigValueError { .. } => {
                "Fix the value in the .env file or the process environment"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
