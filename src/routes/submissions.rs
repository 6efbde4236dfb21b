use std::net::SocketAddr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db;
use crate::error::AppError;
use crate::models::SubmissionSummary;
use crate::routes::body;
use crate::state::SharedState;
use crate::submission::metadata;

const FORM_NOT_FOUND: &str = "Form not found";

#[derive(Deserialize)]
pub struct ListParams {
    pub form_id: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let submissions = match params.form_id.as_deref() {
        Some(form_id) => list_for_form(&state, form_id).await?,
        None => db::submissions::list(&state.pool)
            .await?
            .into_iter()
            .map(SubmissionSummary::from)
            .collect(),
    };
    Ok(Json(json!({ "submissions": submissions })))
}

pub async fn list_by_form(
    State(state): State<SharedState>,
    Path(form_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let submissions = list_for_form(&state, &form_id).await?;
    Ok(Json(json!({ "submissions": submissions })))
}

async fn list_for_form(
    state: &SharedState,
    form_id: &str,
) -> Result<Vec<SubmissionSummary>, AppError> {
    let form_id = body::record_id(form_id, FORM_NOT_FOUND)?;
    db::forms::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| AppError::NotFound(FORM_NOT_FOUND.to_string()))?;

    let submissions = db::submissions::list_by_form(&state.pool, form_id)
        .await?
        .into_iter()
        .map(SubmissionSummary::from)
        .collect();
    Ok(submissions)
}

pub async fn create(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<(StatusCode, Json<SubmissionSummary>), AppError> {
    let mut req = body::json_object(&payload)?;

    let form_id = req
        .remove("form_id")
        .ok_or_else(|| AppError::Validation("form_id is required".to_string()))?;
    let data = req
        .remove("data")
        .ok_or_else(|| AppError::Validation("data is required".to_string()))?;

    let form_id = match &form_id {
        Value::String(id) => body::record_id(id, FORM_NOT_FOUND)?,
        _ => {
            return Err(AppError::Validation(
                "form_id must be a string".to_string(),
            ));
        }
    };

    let client = metadata::extract(&headers, Some(addr.ip()));

    let submission = db::submissions::create(
        &state.pool,
        form_id,
        &data,
        client.ip_address.as_deref(),
        Some(client.user_agent.as_str()),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(FORM_NOT_FOUND.to_string()))?;

    tracing::info!(
        submission_id = %submission.submission.id,
        form_id = %form_id,
        "Submission recorded"
    );

    Ok((StatusCode::CREATED, Json(submission.into())))
}
