use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Map, Value, json};

use crate::db;
use crate::db::forms::FormChanges;
use crate::error::AppError;
use crate::models::FormSummary;
use crate::routes::body;
use crate::state::SharedState;

const NOT_FOUND: &str = "Form not found";
const MAX_NAME_LEN: usize = 255;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let forms: Vec<FormSummary> = db::forms::list(&state.pool)
        .await?
        .into_iter()
        .map(FormSummary::from)
        .collect();
    Ok(Json(json!({ "forms": forms })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<FormSummary>, AppError> {
    let id = body::record_id(&id, NOT_FOUND)?;
    let form = db::forms::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Json(form.into()))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<FormSummary>), AppError> {
    let mut req = body::json_object(&payload)?;

    let name = req
        .remove("name")
        .ok_or_else(|| AppError::Validation("Name is required".to_string()))?;
    let schema = req
        .remove("schema")
        .ok_or_else(|| AppError::Validation("Schema is required".to_string()))?;
    let name = validate_name(name)?;

    let form = db::forms::create(&state.pool, &name, &schema).await?;
    tracing::info!(form_id = %form.id, name = %form.name, "Form created");

    Ok((StatusCode::CREATED, Json(form.into())))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<FormSummary>, AppError> {
    let id = body::record_id(&id, NOT_FOUND)?;

    // A missing form takes precedence over a malformed body.
    db::forms::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    let changes = form_changes(body::json_object(&payload)?)?;

    let form = db::forms::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    tracing::info!(form_id = %form.id, "Form updated");

    Ok(Json(form.into()))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = body::record_id(&id, NOT_FOUND)?;

    if !db::forms::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!(form_id = %id, "Form deleted");

    Ok(Json(json!({ "message": "Form deleted successfully" })))
}

/// Build a partial update from the keys present in the request body.
fn form_changes(mut req: Map<String, Value>) -> Result<FormChanges, AppError> {
    let name = req.remove("name").map(validate_name).transpose()?;
    let schema = req.remove("schema");
    let is_active = req
        .remove("is_active")
        .map(|v| {
            v.as_bool()
                .ok_or_else(|| AppError::Validation("is_active must be a boolean".to_string()))
        })
        .transpose()?;

    Ok(FormChanges {
        name,
        schema,
        is_active,
    })
}

fn validate_name(name: Value) -> Result<String, AppError> {
    let Value::String(name) = name else {
        return Err(AppError::Validation("Name must be a string".to_string()));
    };
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
