//! HTTP router for the medicine endpoints.
//!
//! Cross-origin requests are allowed from any origin, with any method and
//! header, credentials included.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::store::Store;

/// Build the router over a shared store.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn medicine_router(store: Arc<Store>) -> Router {
  Router::new()
    .route("/medicines", get(handlers::list_all).post(handlers::create))
    .route(
      "/medicines/:name",
      get(handlers::get_one)
        .patch(handlers::update)
        .delete(handlers::remove),
    )
    .route("/average", get(handlers::average))
    .fallback(handlers::fallback)
    .layer(CorsLayer::very_permissive())
    .with_state(store)
}
