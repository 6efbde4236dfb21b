use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Form {
    pub id: Uuid,
    pub name: String,
    pub schema: serde_json::Value,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Form {
    pub fn component_count(&self) -> Result<usize, serde_json::Error> {
        schema::component_count(&self.schema)
    }

    pub fn component_types(&self) -> Result<BTreeSet<String>, serde_json::Error> {
        schema::component_types(&self.schema)
    }
}

/// API representation of a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: Uuid,
    pub name: String,
    pub schema: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<Form> for FormSummary {
    fn from(form: Form) -> Self {
        // A null schema is reported as an empty object.
        let schema = match form.schema {
            serde_json::Value::Null => serde_json::json!({}),
            other => other,
        };
        FormSummary {
            id: form.id,
            name: form.name,
            schema,
            created_at: form.created,
            updated_at: form.modified,
            is_active: form.is_active,
        }
    }
}
