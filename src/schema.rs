//! Interpretation of stored form schemas.
//!
//! A schema is an opaque JSON document produced by the frontend builder.
//! Two layouts exist: the current one nests components under
//! `form.children`, the legacy one keeps them in a top-level `components`
//! array. Lookups try the current layout first.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde_json::Value;

/// Component type reported for entries without a `type` field.
pub const UNKNOWN_TYPE: &str = "unknown";

/// The component list of a schema, tagged with the layout it was found in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaShape<'a> {
    /// `{"form": {"children": [...]}}`
    Nested(&'a [Value]),
    /// `{"components": [...]}`
    Flat(&'a [Value]),
    /// Absent, empty, or unrecognized.
    Empty,
}

impl<'a> SchemaShape<'a> {
    /// Resolve the layout of an already decoded schema. The nested layout
    /// takes precedence when both arrays are present.
    pub fn resolve(schema: &'a Value) -> Self {
        let nested = schema.pointer("/form/children").and_then(Value::as_array);
        let flat = schema.pointer("/components").and_then(Value::as_array);

        match (nested, flat) {
            (Some(children), _) => SchemaShape::Nested(children),
            (None, Some(components)) => SchemaShape::Flat(components),
            (None, None) => SchemaShape::Empty,
        }
    }

    pub fn components(&self) -> &'a [Value] {
        match self {
            SchemaShape::Nested(components) | SchemaShape::Flat(components) => *components,
            SchemaShape::Empty => &[],
        }
    }
}

/// Decode a schema value. Legacy rows may hold the document as a JSON
/// encoded string; anything else is returned as is.
pub fn parse(schema: &Value) -> Result<Cow<'_, Value>, serde_json::Error> {
    match schema {
        Value::String(raw) => serde_json::from_str(raw).map(Cow::Owned),
        other => Ok(Cow::Borrowed(other)),
    }
}

pub fn component_count(schema: &Value) -> Result<usize, serde_json::Error> {
    let schema = parse(schema)?;
    Ok(SchemaShape::resolve(&schema).components().len())
}

/// Distinct component types. A `type` that is not a string is reported as
/// its JSON text, e.g. `5` or `null`.
pub fn component_types(schema: &Value) -> Result<BTreeSet<String>, serde_json::Error> {
    let schema = parse(schema)?;
    let types = SchemaShape::resolve(&schema)
        .components()
        .iter()
        .map(|component| match component.get("type") {
            None => UNKNOWN_TYPE.to_string(),
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
        })
        .collect();
    Ok(types)
}

