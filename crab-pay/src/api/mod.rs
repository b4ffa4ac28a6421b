//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`payment_methods`] - 门店支付方式接口
//! - [`global_payment_config`] - 平台级全局禁用接口
//!
//! 本层不做认证, 调用方负责鉴权 (可借助 owners 接口校验门店归属)。

pub mod global_payment_config;
pub mod health;
pub mod payment_methods;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::utils::{AppError, AppResult};

/// 请求体解码失败 (语法错误、类型不符、缺少 Content-Type) 统一转为 ValidationFailed
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}
