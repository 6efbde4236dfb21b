use askama::Template;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::routes::body;
use crate::state::SharedState;

struct AdminFormRow {
    id: String,
    name: String,
    is_active: bool,
    created: String,
    modified: String,
}

#[derive(Template)]
#[template(path = "admin/forms.html")]
struct AdminFormsTemplate {
    forms: Vec<AdminFormRow>,
    query: String,
    is_active: String,
    created: String,
}

#[derive(Template)]
#[template(path = "admin/form_detail.html")]
struct AdminFormTemplate {
    id: String,
    name: String,
    is_active: bool,
    schema_pretty: String,
    created: String,
    modified: String,
}

#[derive(Deserialize)]
pub struct AdminFilter {
    pub q: Option<String>,
    pub is_active: Option<String>,
    pub created: Option<String>,
}

/// Lower bound for the admin's creation-date filter: `today`, `past_7_days`,
/// `this_month` or `this_year`, all counted from midnight UTC. Anything else
/// means no bound.
pub fn created_since(choice: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let start = match choice {
        "today" => today,
        "past_7_days" => today.checked_sub_days(Days::new(7))?,
        "this_month" => NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?,
        "this_year" => NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
        _ => return None,
    };
    Some(start.and_hms_opt(0, 0, 0)?.and_utc())
}

pub async fn forms_page(
    State(state): State<SharedState>,
    Query(filter): Query<AdminFilter>,
) -> Result<impl IntoResponse, AppError> {
    let query = filter.q.unwrap_or_default().trim().to_string();
    let is_active = match filter.is_active.as_deref() {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    };
    let created = filter.created.unwrap_or_default();
    let since = created_since(&created, Utc::now());

    let forms = db::forms::search(
        &state.pool,
        (!query.is_empty()).then_some(query.as_str()),
        is_active,
        since,
    )
    .await?;

    let rows = forms
        .into_iter()
        .map(|form| AdminFormRow {
            id: form.id.to_string(),
            name: form.name,
            is_active: form.is_active,
            created: form.created.format("%Y-%m-%d %H:%M:%S").to_string(),
            modified: form.modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    let template = AdminFormsTemplate {
        forms: rows,
        query,
        is_active: is_active.map(|b| b.to_string()).unwrap_or_default(),
        created: if since.is_some() { created } else { String::new() },
    };
    Ok(Html(template.render()?))
}

pub async fn form_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = body::record_id(&id, "Form not found")?;
    let form = db::forms::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let template = AdminFormTemplate {
        id: form.id.to_string(),
        is_active: form.is_active,
        schema_pretty: serde_json::to_string_pretty(&form.schema).unwrap_or_default(),
        created: form.created.format("%Y-%m-%d %H:%M:%S").to_string(),
        modified: form.modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        name: form.name,
    };
    Ok(Html(template.render()?))
}
