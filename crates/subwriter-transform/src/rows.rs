//! Spreadsheet row assembly.

use serde_json::Value;
use subwriter_model::{
    Cell, DerivedField, FieldMappingConfig, HeightMetrics, VersionRecord, display_value,
};

use crate::normalization::{RuleTable, format_decimal};

/// Builds one spreadsheet row for a version: primary columns from the
/// record's attributes, then derived columns from its height metrics.
///
/// Every cell passes through `rules`; a cell no rule touches keeps its raw
/// value. Numbers stay numeric so spreadsheets can sort them.
pub fn build_row(
    config: &FieldMappingConfig,
    version: &VersionRecord,
    metrics: Option<&HeightMetrics>,
    rules: &RuleTable,
) -> Vec<Cell> {
    let mut row = Vec::with_capacity(config.column_count());

    for mapping in &config.primary {
        let raw = version.get(&mapping.field).unwrap_or(&Value::Null);
        let display = display_value(raw);
        let cell = match rules.normalize(&mapping.header, &display, version) {
            Some(replacement) => Cell::text(replacement),
            None => match raw.as_f64() {
                Some(number) => Cell::Number(number),
                None => Cell::text(display),
            },
        };
        row.push(cell);
    }

    for mapping in &config.derived {
        let value = mapping
            .field
            .parse::<DerivedField>()
            .ok()
            .zip(metrics)
            .map(|(field, metrics)| metrics.value(field));
        let display = value.map(format_decimal).unwrap_or_default();
        let cell = match rules.normalize(&mapping.header, &display, version) {
            Some(replacement) => Cell::text(replacement),
            None => value.map_or(Cell::Empty, Cell::Number),
        };
        row.push(cell);
    }

    row
}
