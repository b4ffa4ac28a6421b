//! Payment Method API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/stores/{store_id}", store_routes())
        .nest("/api/payment-methods", method_routes())
}

fn store_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/payment-methods",
            get(handler::list_for_store).post(handler::create),
        )
        .route(
            "/payment-methods/ensure-reserved",
            post(handler::ensure_reserved),
        )
        .route("/owners/{user_id}", get(handler::verify_owner))
}

fn method_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/operator-disabled", put(handler::set_operator_disabled))
}
