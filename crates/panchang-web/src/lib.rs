//! # Panchang Web
//!
//! axum surface over [`panchang_core::PanchangService`].
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /api/panchang` | Provider aggregation with static defaults and offline fallback |
//! | `GET /api/panchang` | Offline calculation only |
//! | `GET /health` | Liveness check |

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use panchang_core::PanchangService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

pub use error::ApiError;

pub struct AppState {
    pub service: PanchangService,
}

impl AppState {
    pub fn new(service: PanchangService) -> Self {
        Self { service }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/panchang",
            get(handlers::get_panchang).post(handlers::post_panchang),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
