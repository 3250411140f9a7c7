use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::{REQUEST_ID_HEADER, request_id_middleware};
use crate::presentation::handlers::{
    engines_handler, health_handler, parse_episode_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

const BYTES_PER_MB: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/api/v1", api_routes(&state))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn api_routes(state: &AppState) -> Router<AppState> {
    let upload_limit = state.settings.server.max_upload_mb.max(1) * BYTES_PER_MB;

    let asr = Router::new()
        .route(
            "/transcribe",
            post(transcribe_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/engines", get(engines_handler));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/asr", asr);

    if state.crawler_enabled() {
        router.route("/episode/parse", post(parse_episode_handler))
    } else {
        router
    }
}
