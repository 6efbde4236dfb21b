use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Form;

pub async fn list(pool: &PgPool) -> Result<Vec<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>("SELECT * FROM forms ORDER BY created DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>("SELECT * FROM forms ORDER BY created DESC LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM forms")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Admin listing: case-insensitive name search, an optional active filter
/// and an optional lower bound on the creation time.
pub async fn search(
    pool: &PgPool,
    name: Option<&str>,
    is_active: Option<bool>,
    created_since: Option<DateTime<Utc>>,
) -> Result<Vec<Form>, sqlx::Error> {
    let pattern = name.map(|n| format!("%{}%", escape_like(n)));
    sqlx::query_as::<_, Form>(
        r"SELECT * FROM forms
         WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
           AND ($2::boolean IS NULL OR is_active = $2)
           AND ($3::timestamptz IS NULL OR created >= $3)
         ORDER BY created DESC",
    )
    .bind(pattern)
    .bind(is_active)
    .bind(created_since)
    .fetch_all(pool)
    .await
}

/// Escape LIKE metacharacters so the text matches literally.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>("SELECT * FROM forms WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    schema: &serde_json::Value,
) -> Result<Form, sqlx::Error> {
    sqlx::query_as::<_, Form>(
        "INSERT INTO forms (id, name, schema) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(name)
    .bind(schema)
    .fetch_one(pool)
    .await
}

/// Fields of a partial update; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct FormChanges {
    pub name: Option<String>,
    pub schema: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// Apply a partial update. Returns `None` when the form does not exist.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: &FormChanges,
) -> Result<Option<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>(
        "UPDATE forms SET
            name = COALESCE($2, name),
            schema = COALESCE($3, schema),
            is_active = COALESCE($4, is_active),
            modified = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.schema.as_ref())
    .bind(changes.is_active)
    .fetch_optional(pool)
    .await
}

/// Delete a form; its submissions go with it through the cascading key.
/// Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM forms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
