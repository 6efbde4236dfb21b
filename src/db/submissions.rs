use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SubmissionWithForm;

/// Insert a submission for an existing form.
///
/// The form lookup and insert run as one statement; `None` means the form
/// does not exist and nothing was written.
pub async fn create(
    pool: &PgPool,
    form_id: Uuid,
    data: &serde_json::Value,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
) -> Result<Option<SubmissionWithForm>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionWithForm>(
        "WITH inserted AS (
            INSERT INTO form_submissions (id, form_id, data, ip_address, user_agent)
            SELECT $1, f.id, $3, $4, $5 FROM forms f WHERE f.id = $2
            RETURNING *
         )
         SELECT i.*, f.name AS form_name
         FROM inserted i JOIN forms f ON f.id = i.form_id",
    )
    .bind(Uuid::now_v7())
    .bind(form_id)
    .bind(data)
    .bind(ip_address)
    .bind(user_agent)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<SubmissionWithForm>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionWithForm>(
        "SELECT s.*, f.name AS form_name
         FROM form_submissions s JOIN forms f ON f.id = s.form_id
         ORDER BY s.created DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_form(
    pool: &PgPool,
    form_id: Uuid,
) -> Result<Vec<SubmissionWithForm>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionWithForm>(
        "SELECT s.*, f.name AS form_name
         FROM form_submissions s JOIN forms f ON f.id = s.form_id
         WHERE s.form_id = $1
         ORDER BY s.created DESC",
    )
    .bind(form_id)
    .fetch_all(pool)
    .await
}

pub async fn count_by_form(pool: &PgPool, form_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM form_submissions WHERE form_id = $1")
        .bind(form_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
