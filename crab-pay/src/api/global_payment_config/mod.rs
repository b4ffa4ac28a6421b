//! Global Payment Config API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/global-payment-config", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).put(handler::upsert))
        .route("/disabled-codes", get(handler::disabled_codes))
        .route("/{code}", get(handler::get_by_code))
        .route("/{code}/disabled", get(handler::is_disabled))
}
