use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::SharedState;

/// Reject requests whose `Host` is not one of the configured allowed hosts.
pub async fn enforce(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or("")
        .to_string();

    if !state.config.host_allowed(&host) {
        return Err(AppError::DisallowedHost(host));
    }

    Ok(next.run(req).await)
}
