use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};

use crate::db;
use crate::error::AppError;
use crate::frontend::{self, BundleAssets};
use crate::models::Form;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "formbuilder/form_builder.html")]
struct FormBuilderTemplate {
    assets: BundleAssets,
    form_id: String,
    form_name: String,
}

#[derive(Template)]
#[template(path = "formbuilder/form_view.html")]
struct FormViewTemplate {
    assets: BundleAssets,
    form_id: String,
    form_name: String,
    schema_json: String,
}

pub async fn new_form(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let template = FormBuilderTemplate {
        assets: assets(&state).await,
        form_id: String::new(),
        form_name: String::new(),
    };
    Ok(Html(template.render()?))
}

/// Builder with a saved form loaded. An unknown id falls back to the
/// empty builder.
pub async fn edit_form(
    State(state): State<SharedState>,
    Path(form_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let form = lookup(&state, &form_id).await?;

    let template = FormBuilderTemplate {
        assets: assets(&state).await,
        form_id: form.as_ref().map(|f| f.id.to_string()).unwrap_or_default(),
        form_name: form.map(|f| f.name).unwrap_or_default(),
    };
    Ok(Html(template.render()?))
}

pub async fn view_form(
    State(state): State<SharedState>,
    Path(form_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let form = lookup(&state, &form_id).await?;

    let template = match form {
        Some(form) => FormViewTemplate {
            assets: assets(&state).await,
            form_id: form.id.to_string(),
            schema_json: script_json(&form.schema),
            form_name: form.name,
        },
        None => FormViewTemplate {
            assets: assets(&state).await,
            form_id: String::new(),
            form_name: String::new(),
            schema_json: "null".to_string(),
        },
    };
    Ok(Html(template.render()?))
}

async fn lookup(state: &SharedState, form_id: &str) -> Result<Option<Form>, AppError> {
    let Ok(id) = form_id.parse() else {
        return Ok(None);
    };
    Ok(db::forms::find_by_id(&state.pool, id).await?)
}

async fn assets(state: &SharedState) -> BundleAssets {
    frontend::load_assets(&state.config.static_dir, &state.config.static_url).await
}

/// Serialize a value for embedding inside a `<script>` element.
fn script_json(value: &serde_json::Value) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
