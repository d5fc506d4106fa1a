//! Staff API

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::{Permission, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<ServerState> {
    // Reads are gated in the service: the waiter filter is open to any
    // authenticated caller, everything else needs view/admin rights
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::deactivate))
        .layer(middleware::from_fn(require_permission(Permission::Staff)));

    read_routes.merge(manage_routes)
}
