use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, method_not_allowed_handler, process_handler};
use crate::presentation::state::AppState;

pub fn create_router<E, L>(state: AppState<E, L>) -> Router
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Body limit leaves headroom above the per-file bound for multipart
    // framing and the free-text part.
    let body_limit = state.settings.limits.max_upload_bytes * 2;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/process",
            post(process_handler::<E, L>).fallback(method_not_allowed_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
