pub mod config;
pub mod db;
pub mod error;
pub mod frontend;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod smoke;
pub mod state;
pub mod submission;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, CorsPolicy};
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let static_mount = static_mount(&config.static_url);
    let static_dir = config.static_dir.clone();
    let cors = cors_layer(&config.cors);
    let max_body_size = config.max_body_size;
    let production = config.is_production();

    let state: SharedState = Arc::new(AppState { pool, config });

    let mut app = Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes());

    // Bundles hosted elsewhere (absolute static URL) are not served here.
    if let Some(mount) = static_mount {
        app = app.nest_service(&mount, ServeDir::new(static_dir));
    }

    let app = app
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::allowed_hosts::enforce,
        ))
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let app = if production {
        app.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
        ))
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::AllowAll => CorsLayer::permissive(),
        CorsPolicy::Origins(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
        }
    }
}

/// Router path the bundle directory is served under, for site-relative
/// static URLs only.
fn static_mount(static_url: &str) -> Option<String> {
    if !static_url.starts_with('/') {
        return None;
    }
    let mount = static_url.trim_end_matches('/');
    if mount.is_empty() {
        return None;
    }
    Some(mount.to_string())
}

async fn health() -> &'static str {
    "ok"
}
