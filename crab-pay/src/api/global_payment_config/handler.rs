//! Global Payment Config API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;
use shared::models::{GlobalPaymentConfig, GlobalPaymentConfigUpsert};

use crate::api::json_body;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/global-payment-config - 全部全局配置 (按 code 排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GlobalPaymentConfig>>> {
    Ok(Json(state.global_config.find_all().await?))
}

/// PUT /api/global-payment-config - 按 code 插入或覆盖
///
/// Body is decoded by hand so a non-boolean `disabled_globally` is a
/// validation error rather than a framework rejection.
pub async fn upsert(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<GlobalPaymentConfig>> {
    let payload = GlobalPaymentConfigUpsert::from_json(&json_body(body)?)?;
    Ok(Json(state.global_config.upsert(payload).await?))
}

/// GET /api/global-payment-config/{code} - 不存在时返回 null
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Option<GlobalPaymentConfig>>> {
    Ok(Json(state.global_config.find_by_code(&code).await?))
}

/// GET /api/global-payment-config/{code}/disabled
pub async fn is_disabled(State(state): State<ServerState>, Path(code): Path<String>) -> Json<bool> {
    Json(state.global_config.is_globally_disabled(&code).await)
}

/// GET /api/global-payment-config/disabled-codes - 小写 code, 已排序
pub async fn disabled_codes(State(state): State<ServerState>) -> Json<Vec<String>> {
    let mut codes: Vec<String> = state.global_config.disabled_codes().await.into_iter().collect();
    codes.sort();
    Json(codes)
}
