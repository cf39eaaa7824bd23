//! REST API payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use subwriter_model::{EntityLink, Playlist, Project, Shot, VersionRecord};

use crate::error::{Result, TrackerError};

/// Response from the access-token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// One entity as returned by the REST API.
///
/// Scalar fields arrive under `attributes`; entity and multi-entity fields
/// arrive under `relationships`, each wrapped in a `data` member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestRecord {
    pub id: u64,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

impl RestRecord {
    /// Flattens attributes and relationships into one field map.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.attributes;
        for (name, relation) in self.relationships {
            let value = match relation {
                Value::Object(mut wrapper) => wrapper.remove("data").unwrap_or(Value::Null),
                other => other,
            };
            fields.insert(name, value);
        }
        fields
    }

    pub fn into_version(self) -> VersionRecord {
        VersionRecord {
            id: self.id,
            attributes: self.into_fields(),
        }
    }

    pub fn into_project(self) -> Project {
        let id = self.id;
        let fields = self.into_fields();
        Project {
            id,
            name: fields.get("name").and_then(Value::as_str).map(String::from),
        }
    }

    pub fn into_playlist(self) -> Result<Playlist> {
        let id = self.id;
        let mut fields = self.into_fields();
        Ok(Playlist {
            id,
            code: string_field(&fields, "code"),
            versions: links(fields.remove("versions"))?,
        })
    }

    pub fn into_shot(self) -> Result<Shot> {
        let id = self.id;
        let mut fields = self.into_fields();
        Ok(Shot {
            id,
            code: string_field(&fields, "code"),
            tasks: links(fields.remove("tasks"))?,
        })
    }
}

/// Response wrapping a single entity.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleResponse {
    pub data: RestRecord,
}

/// Response wrapping a page of entities.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub data: Vec<RestRecord>,
}

/// Body of an entity search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub filters: Vec<Value>,
    pub fields: &'a [String],
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// Joins every error title and detail into one line.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .errors
            .iter()
            .filter_map(|error| match (&error.title, &error.detail) {
                (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
                (Some(text), None) | (None, Some(text)) => Some(text.clone()),
                (None, None) => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Builds an `[field, "is", value]` filter.
pub fn is_filter(field: &str, value: impl Serialize) -> Result<Value> {
    Ok(Value::Array(vec![
        Value::from(field),
        Value::from("is"),
        serde_json::to_value(value)?,
    ]))
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn links(value: Option<Value>) -> Result<Vec<EntityLink>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| TrackerError::Decode(format!("invalid entity links: {e}"))),
    }
}
