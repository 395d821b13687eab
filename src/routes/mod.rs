//! Router assembly.

pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::models::{Customer, Order};
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: health/version, `/customers`, `/orders`, with tracing, panic recovery
/// and a request body limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(resource_routes::<Customer>())
        .merge(resource_routes::<Order>())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::new())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
        .with_state(state)
}
