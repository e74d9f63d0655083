//! Local stand-in for the TEMU Open API, for manual end-to-end runs.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub const MOCK_ACCESS_TOKEN: &str = "dummy_token_abc123";
pub const MOCK_GOODS_ID: u64 = 987654321;
pub const KNOWN_GOODS_IDS: [&str; 2] = ["987654321", "123456789"];

pub fn router() -> Router {
    Router::new()
        .route("/v1/oauth/token", post(issue_token))
        .route("/v1/goods/create", post(create_goods))
        .route("/v1/goods/update", post(update_goods))
        .route("/v1/goods/status", get(goods_status))
}

async fn issue_token() -> Json<Value> {
    Json(json!({
        "access_token": MOCK_ACCESS_TOKEN,
        "expires_in": 86400
    }))
}

async fn create_goods(Json(payload): Json<Value>) -> Json<Value> {
    let external_id = external_goods_id(&payload);
    tracing::info!("--> [MOCK SERVER] Received payload for eBay item: {}", external_id);

    Json(json!({
        "success": true,
        "goods_id": MOCK_GOODS_ID,
        "message": "Mock listing created successfully!"
    }))
}

async fn update_goods(Json(payload): Json<Value>) -> Json<Value> {
    let external_id = external_goods_id(&payload);
    tracing::info!("--> [MOCK SERVER] Update for eBay item: {}", external_id);

    Json(json!({
        "success": true,
        "goods_id": MOCK_GOODS_ID,
        "external_goods_id": external_id,
        "message": format!("Mock listing {} updated", external_id)
    }))
}

fn external_goods_id(payload: &Value) -> &str {
    payload
        .get("external_goods_id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<missing>")
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    goods_id: String,
}

async fn goods_status(Query(query): Query<StatusQuery>) -> Response {
    if KNOWN_GOODS_IDS.contains(&query.goods_id.as_str()) {
        return Json(json!({
            "goods_id": query.goods_id,
            "status": "ACTIVE",
            "msg": "Success"
        }))
        .into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Goods ID not found in TEMU mock database"})),
    )
        .into_response()
}
