//! Payment Method API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use shared::models::{MethodListing, PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate};

use crate::api::json_body;
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 缺省为顾客视图
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct OperatorDisabledBody {
    pub disabled: bool,
}

/// GET /api/stores/{store_id}/payment-methods?active_only= - 门店支付方式列表
pub async fn list_for_store(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<MethodListing>> {
    let listing = state
        .payment_methods
        .list_methods(store_id, query.active_only)
        .await?;
    Ok(Json(listing))
}

/// POST /api/stores/{store_id}/payment-methods - 创建支付方式
pub async fn create(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    payload: Result<Json<PaymentMethodCreate>, JsonRejection>,
) -> AppResult<Json<PaymentMethod>> {
    let mut payload = json_body(payload)?;
    payload.store_id = store_id;
    let method = state.payment_methods.create(payload).await?;
    Ok(Json(method))
}

/// POST /api/stores/{store_id}/payment-methods/ensure-reserved
pub async fn ensure_reserved(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.payment_methods.ensure_reserved_method(store_id).await?;
    Ok(Json(true))
}

/// GET /api/stores/{store_id}/owners/{user_id} - 门店归属校验
pub async fn verify_owner(
    State(state): State<ServerState>,
    Path((store_id, user_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let owned = state
        .payment_methods
        .verify_store_owner(store_id, user_id)
        .await?;
    Ok(Json(owned))
}

/// GET /api/payment-methods/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentMethod>> {
    Ok(Json(state.payment_methods.find_by_id(id).await?))
}

/// PUT /api/payment-methods/{id} - 更新支付方式
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<PaymentMethodUpdate>, JsonRejection>,
) -> AppResult<Json<PaymentMethod>> {
    let payload = json_body(payload)?;
    Ok(Json(state.payment_methods.update(id, payload).await?))
}

/// DELETE /api/payment-methods/{id} - 删除支付方式
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.payment_methods.delete(id).await?;
    Ok(Json(true))
}

/// PUT /api/payment-methods/{id}/operator-disabled - 平台逐条禁用开关
pub async fn set_operator_disabled(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    body: Result<Json<OperatorDisabledBody>, JsonRejection>,
) -> AppResult<Json<PaymentMethod>> {
    let body = json_body(body)?;
    let method = state
        .payment_methods
        .set_operator_disabled(id, body.disabled)
        .await?;
    Ok(Json(method))
}
