//! HTTP surface: route table and the layers wrapped around it.

use crate::config::Config;
use crate::error::AppError;
use crate::ingestion::handlers::handle_upload;
use crate::search::handlers::{
    handle_get_participant, handle_list_genders, handle_list_participants, handle_list_trades,
};
use crate::storage::store::SharedStore;

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{Method, StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::{
    Extension, Json, Router,
    routing::{MethodRouter, get, post},
};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const ENDPOINT_UPLOAD: &str = "/api/upload";
pub const ENDPOINT_PARTICIPANTS: &str = "/api/participants";
pub const ENDPOINT_PARTICIPANT: &str = "/api/participants/:p_no";
pub const ENDPOINT_TRADES: &str = "/api/trades";
pub const ENDPOINT_GENDERS: &str = "/api/genders";

/// Builds the application router around `store`.
///
/// When `config.public_dir` exists it is served for non-API paths; anything
/// unmatched gets the JSON "Route not found" response, including a known
/// path hit with the wrong method.
pub fn router(store: SharedStore, config: &Config) -> Router {
    let api = Router::new()
        .route(ENDPOINT_UPLOAD, api_route(post(handle_upload)))
        .route(ENDPOINT_PARTICIPANTS, api_route(get(handle_list_participants)))
        .route(ENDPOINT_PARTICIPANT, api_route(get(handle_get_participant)))
        .route(ENDPOINT_TRADES, api_route(get(handle_list_trades)))
        .route(ENDPOINT_GENDERS, api_route(get(handle_list_genders)));

    let app = if config.public_dir.is_dir() {
        tracing::info!("Serving static files from {}", config.public_dir.display());
        let static_files = ServeDir::new(&config.public_dir)
            .call_fallback_on_method_not_allowed(true)
            .not_found_service(handle_route_not_found.into_service());
        api.fallback_service(static_files)
    } else {
        tracing::info!(
            "Static directory {} not found, serving API only",
            config.public_dir.display()
        );
        api.fallback(handle_route_not_found)
    };

    with_layers(app, store, config)
}

/// Wraps `app` in the shared middleware: body limit, store extension, CORS,
/// request tracing and the panic -> 500 handler.
pub fn with_layers(app: Router, store: SharedStore, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(Extension(store))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

// Unsupported methods on a known path answer 404 like any other miss.
fn api_route(method_router: MethodRouter) -> MethodRouter {
    method_router.fallback(handle_route_not_found)
}

async fn handle_route_not_found() -> AppError {
    AppError::RouteNotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}
