//! API routes module

pub mod health;

use axum::Router;
use domain_products::{handlers, ProductService};

use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    let service = ProductService::new(state.products_repository());

    Router::new().nest(
        "/products",
        handlers::router_with_timeout(service, state.config.request_timeout),
    )
}
