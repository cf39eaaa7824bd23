//! Field mapping configuration.
//!
//! The mapping file is a JSON object with two ordered groups:
//!
//! ```json
//! {
//!     "Shotgun":  { "Shot Number": "code", "Lens": "sg_lens_1" },
//!     "External": { "Height Start": "sg_height_frame_start" }
//! }
//! ```
//!
//! `Shotgun` (the primary group) maps spreadsheet headers to tracker fields.
//! `External` (the derived group) maps headers to derived height metrics.
//! Column order in the spreadsheet follows key order in the file, so the
//! groups deserialize into ordered vectors rather than maps.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One spreadsheet column: display header and the key it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Column header written to row 0.
    pub header: String,
    /// Source key (tracker field name or derived metric name).
    pub field: String,
}

impl FieldMapping {
    pub fn new(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
        }
    }
}

/// Ordered header → field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroup {
    entries: Vec<FieldMapping>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mapping, keeping insertion order.
    #[must_use]
    pub fn with(mut self, header: impl Into<String>, field: impl Into<String>) -> Self {
        self.entries.push(FieldMapping::new(header, field));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
        self.entries.iter()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.header.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.field.as_str())
    }

    /// Looks up the field for a header (exact match).
    pub fn field_for(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.header == header)
            .map(|entry| entry.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldGroup {
    type Item = &'a FieldMapping;
    type IntoIter = std::slice::Iter<'a, FieldMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for FieldGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.header, &entry.field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldGroupVisitor)
    }
}

struct FieldGroupVisitor;

impl<'de> Visitor<'de> for FieldGroupVisitor {
    type Value = FieldGroup;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping column headers to field names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<FieldMapping> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((header, field)) = access.next_entry::<String, String>()? {
            if entries.iter().any(|entry| entry.header == header) {
                return Err(de::Error::custom(format!("duplicate header '{header}'")));
            }
            entries.push(FieldMapping { header, field });
        }
        Ok(FieldGroup { entries })
    }
}

/// The loaded mapping file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMappingConfig {
    /// Tracker-backed columns.
    #[serde(rename = "Shotgun")]
    pub primary: FieldGroup,
    /// Columns filled from derived shot metrics.
    #[serde(
        rename = "External",
        default,
        skip_serializing_if = "FieldGroup::is_empty"
    )]
    pub derived: FieldGroup,
}

impl FieldMappingConfig {
    pub fn new(primary: FieldGroup, derived: FieldGroup) -> Self {
        Self { primary, derived }
    }

    /// All headers in column order: primary group then derived group.
    pub fn headers(&self) -> Vec<String> {
        self.primary
            .headers()
            .chain(self.derived.headers())
            .map(str::to_string)
            .collect()
    }

    /// Tracker fields to request for each version.
    ///
    /// Duplicates are dropped; the sidecar path and code are always included
    /// because the derived columns and the edit rules depend on them.
    pub fn query_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        let required = [crate::record::CODE_FIELD, crate::record::SIDECAR_PATH_FIELD];
        for field in self.primary.fields().chain(required) {
            if !fields.iter().any(|existing| existing == field) {
                fields.push(field.to_string());
            }
        }
        fields
    }

    pub fn column_count(&self) -> usize {
        self.primary.len() + self.derived.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_file_order() {
        let json = r#"{
            "Shotgun": {"Zeta": "sg_z", "Alpha": "sg_a", "Mid": "sg_m"},
            "External": {"Height End": "sg_height_end_frame"}
        }"#;
        let config: FieldMappingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.headers(), vec!["Zeta", "Alpha", "Mid", "Height End"]);
        assert_eq!(config.primary.field_for("Alpha"), Some("sg_a"));
    }

    #[test]
    fn external_group_is_optional() {
        let config: FieldMappingConfig =
            serde_json::from_str(r#"{"Shotgun": {"Version": "code"}}"#).unwrap();
        assert!(config.derived.is_empty());
        assert_eq!(config.column_count(), 1);
    }

    #[test]
    fn rejects_duplicate_headers() {
        let result: Result<FieldMappingConfig, _> =
            serde_json::from_str(r#"{"Shotgun": {"A": "x", "A": "y"}}"#);
        assert!(result.unwrap_err().to_string().contains("duplicate header"));
    }

    #[test]
    fn query_fields_include_code_and_sidecar() {
        let config = FieldMappingConfig::new(
            FieldGroup::new().with("Version", "code").with("Lens", "sg_lens_1"),
            FieldGroup::new(),
        );
        assert_eq!(
            config.query_fields(),
            vec!["code", "sg_lens_1", "sg_path_to_meta_data"]
        );
    }

    #[test]
    fn serializes_back_in_order() {
        let config = FieldMappingConfig::new(
            FieldGroup::new().with("B", "b").with("A", "a"),
            FieldGroup::new(),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"Shotgun":{"B":"b","A":"a"}}"#);
    }
}
