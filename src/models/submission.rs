use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub data: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A submission joined with the name of its owning form at read time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionWithForm {
    #[sqlx(flatten)]
    pub submission: FormSubmission,
    pub form_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub form_id: Uuid,
    pub form_name: String,
    pub data: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<SubmissionWithForm> for SubmissionSummary {
    fn from(row: SubmissionWithForm) -> Self {
        let SubmissionWithForm {
            submission,
            form_name,
        } = row;
        SubmissionSummary {
            id: submission.id,
            form_id: submission.form_id,
            form_name,
            data: submission.data,
            submitted_at: submission.created,
            ip_address: submission.ip_address,
            user_agent: submission.user_agent,
        }
    }
}
