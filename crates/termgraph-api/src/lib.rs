//! # termgraph-api
//!
//! HTTP JSON server resolving vocabulary terms against SPARQL repositories.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /health` | [`handlers::health_check`] |
//! | `GET /api/v1/terms?vocabulary=&term=` | [`handlers::get_term`] |
//! | `GET /api/dbQueryTerms?vocabulary=&term=` | same as above |
//! | `GET /api/v1/concepts/labels` | [`handlers::get_concept_labels`] |
//! | `GET /api/v1/vocabularies` | [`handlers::list_vocabularies`] |
//! | `GET /api/v1/vocabularies/:vocabulary/repository` | [`handlers::get_repository_info`] |

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use termgraph_core::defaults::CORS_MAX_AGE_SECS;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// All routes with tracing and request-id middleware. CORS is added by the
/// caller with [`cors_layer`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/v1/terms", get(handlers::get_term))
        .route("/api/dbQueryTerms", get(handlers::get_term))
        .route("/api/v1/concepts/labels", get(handlers::get_concept_labels))
        .route("/api/v1/vocabularies", get(handlers::list_vocabularies))
        .route(
            "/api/v1/vocabularies/:vocabulary/repository",
            get(handlers::get_repository_info),
        )
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

/// Read-only CORS policy for the given origin whitelist.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS))
}
