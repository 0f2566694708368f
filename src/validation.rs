//! Structural validation of inbound JSON payloads.
//!
//! Schemas are plain data: a tree of [`Kind`] nodes whose object nodes list
//! their [`Field`]s. [`validate`] walks a payload against such a tree and
//! reports the first mismatch it finds. Only shape and types are checked;
//! whether a referenced row exists is decided later by the handlers.

use serde_json::Value;
use thiserror::Error;

/// Expected JSON type of a schema node.
#[derive(Debug)]
pub enum Kind {
    Object(&'static [Field]),
    Number,
    String,
}

impl Kind {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Number => "number",
            Self::String => "string",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Object(_) => value.is_object(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
        }
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: Kind,
}

/// Shape of a "create song" request body.
pub static SONG_SCHEMA: Kind = Kind::Object(&[Field {
    name: "file",
    required: true,
    kind: Kind::Object(&[
        Field {
            name: "id",
            required: false,
            kind: Kind::Number,
        },
        Field {
            name: "name",
            required: false,
            kind: Kind::String,
        },
    ]),
}]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SchemaViolation {
    pub message: String,
}

impl SchemaViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate(value: &Value, schema: &Kind) -> Result<(), SchemaViolation> {
    if !schema.matches(value) {
        return Err(SchemaViolation::new(format!(
            "{} is not of type '{}'",
            value,
            schema.type_name()
        )));
    }

    let (Kind::Object(fields), Value::Object(map)) = (schema, value) else {
        return Ok(());
    };

    for field in fields.iter().filter(|f| f.required) {
        if !map.contains_key(field.name) {
            return Err(SchemaViolation::new(format!(
                "'{}' is a required property",
                field.name
            )));
        }
    }

    for field in fields.iter() {
        if let Some(child) = map.get(field.name) {
            validate(child, &field.kind)?;
        }
    }

    Ok(())
}

pub fn validate_song_payload(payload: &Value) -> Result<(), SchemaViolation> {
    validate(payload, &SONG_SCHEMA)
}
