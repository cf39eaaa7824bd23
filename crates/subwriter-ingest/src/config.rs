//! Field mapping config loading.

use std::path::Path;

use subwriter_model::{DerivedField, FieldMappingConfig};

use crate::error::{ConfigError, Result};

/// Loads the field mapping config from a JSON file.
///
/// Header order follows the file. Derived-group fields that do not name a
/// known metric are kept (their cells stay empty) and reported as warnings.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use subwriter_ingest::load_field_mapping;
///
/// let config = load_field_mapping(Path::new("config/submission_fields.json"))?;
/// for header in config.headers() {
///     println!("{header}");
/// }
/// ```
pub fn load_field_mapping(path: &Path) -> Result<FieldMappingConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: FieldMappingConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if config.primary.is_empty() {
        return Err(ConfigError::EmptyPrimaryGroup {
            path: path.to_path_buf(),
        });
    }

    for mapping in &config.derived {
        if let Err(error) = mapping.field.parse::<DerivedField>() {
            tracing::warn!(header = %mapping.header, %error, "derived column will be empty");
        }
    }

    tracing::info!(
        path = %path.display(),
        primary = config.primary.len(),
        derived = config.derived.len(),
        "Loaded field mapping"
    );
    Ok(config)
}
