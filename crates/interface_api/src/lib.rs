//! HTTP API Layer
//!
//! This crate provides the REST API for the SWIFT code registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for lookups, registration and removal
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(registry, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_bank::BankRegistry;

use crate::config::ApiConfig;
use crate::handlers::{health, swift_codes};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: BankRegistry,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `registry` - The registry service the handlers delegate to
/// * `config` - API configuration
pub fn create_router(registry: BankRegistry, config: ApiConfig) -> Router {
    let state = AppState { registry, config };

    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let swift_code_routes = Router::new()
        .route("/", post(swift_codes::create_swift_code))
        .route(
            "/:code",
            get(swift_codes::get_swift_code).delete(swift_codes::delete_swift_code),
        )
        .route("/country/:iso2", get(swift_codes::get_swift_codes_by_country));

    Router::new()
        .merge(health_routes)
        .nest("/v1/swift-codes", swift_code_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
