//! Report API

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Permission, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/item-frequency", get(handler::item_frequency))
        .route("/revenue", get(handler::revenue))
        .route("/statistics", get(handler::order_statistics))
        .layer(middleware::from_fn(require_permission(Permission::Reports)))
}
