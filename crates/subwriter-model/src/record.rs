//! Tracker records.
//!
//! Records come back from the tracker as loosely typed attribute maps. Only
//! the handful of attributes the export and update flows depend on get typed
//! accessors; everything else is read through [`VersionRecord::display`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version attribute holding the version name.
pub const CODE_FIELD: &str = "code";
/// Version attribute holding the path to the comp sidecar JSON.
pub const SIDECAR_PATH_FIELD: &str = "sg_path_to_meta_data";
/// Version attribute marking a version as already batch-updated.
pub const UPDATED_MARKER_FIELD: &str = "sg_external_update";
/// Value of [`UPDATED_MARKER_FIELD`] once a version has been updated.
pub const UPDATED_MARKER_VALUE: &str = "Yes";

/// Link to another tracker entity, as embedded in record attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLink {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityLink {
    pub fn new(entity_type: impl Into<String>, id: u64) -> Self {
        Self {
            entity_type: entity_type.into(),
            id,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The tracker project every query is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    pub fn new(id: u64) -> Self {
        Self { id, name: None }
    }

    /// Name for log messages, falling back to the id.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("project #{}", self.id))
    }

    pub fn link(&self) -> EntityLink {
        let link = EntityLink::new("Project", self.id);
        match &self.name {
            Some(name) => link.with_name(name.clone()),
            None => link,
        }
    }
}

/// A named, ordered collection of versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub code: String,
    #[serde(default)]
    pub versions: Vec<EntityLink>,
}

/// A shot and the tasks linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub id: u64,
    pub code: String,
    #[serde(default)]
    pub tasks: Vec<EntityLink>,
}

impl Shot {
    /// True if any linked task name contains `task_name`.
    pub fn has_task(&self, task_name: &str) -> bool {
        self.tasks
            .iter()
            .filter_map(|task| task.name.as_deref())
            .any(|name| name.contains(task_name))
    }

    pub fn link(&self) -> EntityLink {
        EntityLink::new("Shot", self.id).with_name(self.code.clone())
    }
}

/// One version and the attributes fetched for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionRecord {
    pub id: u64,
    pub attributes: Map<String, Value>,
}

impl VersionRecord {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Version name, or an empty string when the record has none.
    pub fn code(&self) -> &str {
        self.get(CODE_FIELD).and_then(Value::as_str).unwrap_or("")
    }

    /// Editorial versions carry `edit` in their code.
    pub fn is_edit(&self) -> bool {
        self.code().contains("edit")
    }

    /// Path to the comp sidecar JSON, if set and non-empty.
    pub fn sidecar_path(&self) -> Option<PathBuf> {
        self.get(SIDECAR_PATH_FIELD)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    pub fn is_marked_updated(&self) -> bool {
        self.get(UPDATED_MARKER_FIELD).and_then(Value::as_str) == Some(UPDATED_MARKER_VALUE)
    }

    /// Display string for an attribute; missing attributes display as empty.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(display_value).unwrap_or_default()
    }
}

/// Renders an attribute value the way it appears in a spreadsheet cell.
///
/// Entity links render as their `name`; lists of links join names with `, `.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Object(object) => object
            .get("name")
            .or_else(|| object.get("code"))
            .map(display_value)
            .unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
