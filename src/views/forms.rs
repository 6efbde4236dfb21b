use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::routes::body;
use crate::state::SharedState;
use crate::views::join_types;

pub const PER_PAGE: i64 = 20;

struct FormRow {
    id: String,
    name: String,
    is_active: bool,
    created: String,
    component_count: usize,
    component_types: String,
}

#[derive(Template)]
#[template(path = "formbuilder/forms_list.html")]
struct FormsListTemplate {
    forms: Vec<FormRow>,
    total: i64,
    page: i64,
    total_pages: i64,
}

#[derive(Template)]
#[template(path = "formbuilder/form_detail.html")]
struct FormDetailTemplate {
    id: String,
    name: String,
    is_active: bool,
    created: String,
    modified: String,
    component_count: usize,
    component_types: Vec<String>,
    submission_count: i64,
    schema_pretty: String,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// Resolve the requested page against the number of pages. `last` names
/// the final page; anything else must be a page number that exists.
pub fn resolve_page(requested: Option<&str>, total_pages: i64) -> Result<i64, AppError> {
    let invalid = || AppError::NotFound("Invalid page".to_string());

    let page = match requested.map(str::trim) {
        None | Some("") => 1,
        Some("last") => total_pages,
        Some(raw) => raw.parse::<i64>().map_err(|_| invalid())?,
    };

    if page < 1 || page > total_pages {
        return Err(invalid());
    }
    Ok(page)
}

/// Page count for `total` rows; an empty listing still has one page.
pub fn page_count(total: i64) -> i64 {
    (total.max(0) / PER_PAGE + i64::from(total % PER_PAGE != 0)).max(1)
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let total = db::forms::count(&state.pool).await?;
    let total_pages = page_count(total);
    let page = resolve_page(params.page.as_deref(), total_pages)?;

    // Bounded by total_pages, so this cannot overflow.
    let offset = (page - 1) * PER_PAGE;
    let forms = db::forms::list_page(&state.pool, PER_PAGE, offset).await?;

    let mut rows = Vec::with_capacity(forms.len());
    for form in forms {
        rows.push(FormRow {
            id: form.id.to_string(),
            component_count: form.component_count().map_err(invalid_schema)?,
            component_types: join_types(form.component_types().map_err(invalid_schema)?),
            created: form.created.format("%Y-%m-%d %H:%M").to_string(),
            is_active: form.is_active,
            name: form.name,
        });
    }

    let template = FormsListTemplate {
        forms: rows,
        total,
        page,
        total_pages,
    };
    Ok(Html(template.render()?))
}

pub async fn detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = body::record_id(&id, "Form not found")?;
    let form = db::forms::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let submission_count = db::submissions::count_by_form(&state.pool, form.id).await?;

    let template = FormDetailTemplate {
        id: form.id.to_string(),
        is_active: form.is_active,
        created: form.created.format("%Y-%m-%d %H:%M").to_string(),
        modified: form.modified.format("%Y-%m-%d %H:%M").to_string(),
        component_count: form.component_count().map_err(invalid_schema)?,
        component_types: form
            .component_types()
            .map_err(invalid_schema)?
            .into_iter()
            .collect(),
        submission_count,
        schema_pretty: serde_json::to_string_pretty(&form.schema).unwrap_or_default(),
        name: form.name,
    };
    Ok(Html(template.render()?))
}

fn invalid_schema(err: serde_json::Error) -> AppError {
    AppError::Internal(format!("Stored form schema is not valid JSON: {err}"))
}
