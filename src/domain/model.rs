use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// eBay 庫存項目（已從原始 API 回應扁平化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub specifics: BTreeMap<String, String>,
}

/// TEMU goods/create 與 goods/update 的請求主體
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationListingPayload {
    pub external_goods_id: String,
    pub goods_name: Option<String>,
    pub sku_list: Vec<SkuRecord>,
    pub tax_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRecord {
    pub external_sku_id: String,
    pub stock_quantity: u32,
    pub price: f64,
    pub spec_list: Vec<SpecAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecAttribute {
    pub spec_name: String,
    pub spec_value: String,
}

/// Normalized result of an authorized destination call.
///
/// A failure serializes as `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Failure { error: String },
}

impl<T> ApiResult<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        ApiResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            ApiResult::Success(value) => Ok(value),
            ApiResult::Failure { error } => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct FailureBody<'a> {
            success: bool,
            error: &'a str,
        }

        match self {
            ApiResult::Success(value) => value.serialize(serializer),
            ApiResult::Failure { error } => FailureBody {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub goods_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingStatus {
    #[serde(deserialize_with = "string_or_number")]
    pub goods_id: String,
    pub status: String,
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Per-item outcome of one sync run.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Synced {
        source_id: String,
        goods_id: String,
        status: Option<String>,
    },
    Failed {
        source_id: String,
        error: String,
    },
}

impl ItemOutcome {
    pub fn source_id(&self) -> &str {
        match self {
            ItemOutcome::Synced { source_id, .. } | ItemOutcome::Failed { source_id, .. } => {
                source_id
            }
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, ItemOutcome::Synced { .. })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

// TEMU 的 goods_id 有時是數字有時是字串
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
