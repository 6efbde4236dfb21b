use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

/// Decode a request body that must be a JSON object.
pub fn json_object(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| AppError::Parse("Invalid JSON".to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Parse a record id taken from a path or body. An id that cannot be
/// parsed names no record, so it is reported as not found.
pub fn record_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}
