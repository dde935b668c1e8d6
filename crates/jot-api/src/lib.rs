//! # jot-api
//!
//! HTTP API server for jot: CRUD for notes, tasks, and areas, plus the
//! insight pipeline endpoints, behind a single-key auth middleware.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use jot_core::ChatBackend;
use jot_db::Database;

pub use config::ApiConfig;
pub use error::ApiError;

/// Maximum request body size (notes are text; 1 MB is plenty).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Global rate limiter type (direct quota, no keyed bucketing for a
/// personal server).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically across log
/// lines when correlating a request with its extraction and persistence.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub chat: Arc<dyn ChatBackend>,
    /// The configured backend API key clients must present.
    pub api_key: Arc<String>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// Build state from config plus connected collaborators.
    pub fn new(config: &ApiConfig, db: Database, chat: Arc<dyn ChatBackend>) -> Self {
        let rate_limiter = if config.rate_limit_enabled {
            let per_period =
                NonZeroU32::new(config.rate_limit_requests).unwrap_or(NonZeroU32::MIN);
            let period = std::time::Duration::from_secs(config.rate_limit_period_secs.max(1));
            let quota = Quota::with_period(period / per_period.get())
                .unwrap_or_else(|| Quota::per_minute(per_period))
                .allow_burst(per_period);
            Some(Arc::new(RateLimiter::direct(quota)))
        } else {
            None
        };

        Self {
            db,
            chat,
            api_key: Arc::new(config.api_key.clone()),
            rate_limiter,
        }
    }
}

async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return ApiError::RateLimited(
                "Too many requests. Please wait before retrying.".to_string(),
            )
            .into_response();
        }
    }
    next.run(request).await
}

fn parse_allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect()
}

/// Build the application router with all routes and layers.
pub fn router(state: AppState, config: &ApiConfig) -> Router {
    use handlers::{areas, health, insight, notes, tasks};

    let api_routes = Router::new()
        // Notes
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/api/notes/:id",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
        // Tasks
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/:id",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        // Areas
        .route("/api/areas", get(areas::list_areas).post(areas::create_area))
        .route("/api/areas/:id", delete(areas::delete_area))
        // Insight pipeline
        .route("/api/insight/notes", post(insight::extract_note_insight))
        .route(
            "/api/insight/materialize",
            post(insight::materialize_insight),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parse_allowed_origins(
                    &config.cors_origins,
                )))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::HeaderName::from_static("x-api-key"),
                ])
                .max_age(std::time::Duration::from_secs(3600))
        })
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_skips_invalid() {
        let origins = vec![
            "http://localhost:5173".to_string(),
            "not a header value\n".to_string(),
        ];
        let parsed = parse_allowed_origins(&origins);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], "http://localhost:5173");
    }

    #[test]
    fn test_request_id_is_v7() {
        let mut maker = MakeRequestUuidV7;
        let req = axum::http::Request::new(());
        let id = maker.make_request_id(&req).unwrap();
        let parsed = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
}
