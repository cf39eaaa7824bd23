//! Header-keyed normalization rules.
//!
//! Each spreadsheet cell passes through a [`RuleTable`]. Rules are tried in
//! order; the first rule whose header matcher and version condition both
//! hold, and whose function returns a value, supplies the replacement. When
//! no rule produces a value the caller keeps the original.
//!
//! The standard table:
//!
//! | Version  | Header                       | Result                                |
//! |----------|------------------------------|---------------------------------------|
//! | edit     | tilt / speed / height / lens | `N/A`                                 |
//! | edit     | type                         | value + ` - Edit`                     |
//! | edit     | submitted for                | `Review`                              |
//! | not edit | tilt / speed / height        | `min -> max` rounded to 2 decimals    |
//! | not edit | lens                         | letters stripped, rounded, `mm` added |
//! | any      | Shot Number                  | leading `<digits>_` removed           |

use std::sync::LazyLock;

use regex::Regex;
use subwriter_model::VersionRecord;

use super::numeric::{format_range, parse_range};

/// Replacement for camera columns on editorial versions.
pub const NOT_APPLICABLE: &str = "N/A";
/// Suffix appended to the type column on editorial versions.
pub const EDIT_SUFFIX: &str = " - Edit";
/// Replacement for the submitted-for column on editorial versions.
pub const REVIEW_SENTINEL: &str = "Review";
/// Unit appended to lens values.
pub const LENS_UNIT: &str = "mm";

const CAMERA_HEADERS: &[&str] = &["tilt", "speed", "height", "lens"];
const RANGE_HEADERS: &[&str] = &["tilt", "speed", "height"];

static SHOT_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_").expect("Invalid shot prefix regex"));

/// How a rule selects headers. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Header equals the text.
    Exact(String),
    /// Header contains the text.
    Contains(String),
    /// Header contains any of the texts.
    ContainsAny(Vec<String>),
}

impl HeaderMatch {
    pub fn exact(text: &str) -> Self {
        Self::Exact(text.to_lowercase())
    }

    pub fn contains(text: &str) -> Self {
        Self::Contains(text.to_lowercase())
    }

    pub fn contains_any(texts: &[&str]) -> Self {
        Self::ContainsAny(texts.iter().map(|text| text.to_lowercase()).collect())
    }

    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        match self {
            Self::Exact(text) => header == *text,
            Self::Contains(text) => header.contains(text.as_str()),
            Self::ContainsAny(texts) => texts.iter().any(|text| header.contains(text.as_str())),
        }
    }
}

/// Which versions a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    /// Versions whose code contains `edit`.
    Edit,
    /// All other versions.
    NonEdit,
    Any,
}

impl VersionKind {
    pub fn includes(self, version: &VersionRecord) -> bool {
        match self {
            Self::Edit => version.is_edit(),
            Self::NonEdit => !version.is_edit(),
            Self::Any => true,
        }
    }
}

/// Inputs a rule function sees.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub header: &'a str,
    pub value: &'a str,
    pub version: &'a VersionRecord,
}

pub type RuleFn = fn(&FieldContext<'_>) -> Option<String>;

/// One entry of a [`RuleTable`].
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Name used in debug logs.
    pub name: &'static str,
    pub header: HeaderMatch,
    pub applies_to: VersionKind,
    pub apply: RuleFn,
}

impl FieldRule {
    pub fn new(
        name: &'static str,
        header: HeaderMatch,
        applies_to: VersionKind,
        apply: RuleFn,
    ) -> Self {
        Self {
            name,
            header,
            applies_to,
            apply,
        }
    }
}

/// Ordered set of normalization rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<FieldRule>,
}

impl RuleTable {
    /// An empty table; nothing is normalized.
    pub fn new() -> Self {
        Self::default()
    }

    /// The submission rules described in the module docs.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(FieldRule::new(
                "edit_camera",
                HeaderMatch::contains_any(CAMERA_HEADERS),
                VersionKind::Edit,
                |_| Some(NOT_APPLICABLE.to_string()),
            ))
            .with_rule(FieldRule::new(
                "edit_type",
                HeaderMatch::contains("type"),
                VersionKind::Edit,
                edit_type_suffix,
            ))
            .with_rule(FieldRule::new(
                "edit_submitted_for",
                HeaderMatch::contains("submitted for"),
                VersionKind::Edit,
                |_| Some(REVIEW_SENTINEL.to_string()),
            ))
            .with_rule(FieldRule::new(
                "camera_range",
                HeaderMatch::contains_any(RANGE_HEADERS),
                VersionKind::NonEdit,
                |ctx| normalize_range(ctx.value),
            ))
            .with_rule(FieldRule::new(
                "lens",
                HeaderMatch::contains("lens"),
                VersionKind::NonEdit,
                |ctx| normalize_lens(ctx.value),
            ))
            .with_rule(FieldRule::new(
                "shot_number",
                HeaderMatch::exact("Shot Number"),
                VersionKind::Any,
                |ctx| strip_shot_prefix(ctx.value),
            ))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Replacement value for a cell, or `None` to keep the original.
    pub fn normalize(&self, header: &str, value: &str, version: &VersionRecord) -> Option<String> {
        let ctx = FieldContext {
            header,
            value,
            version,
        };
        self.rules
            .iter()
            .filter(|rule| rule.applies_to.includes(version) && rule.header.matches(header))
            .find_map(|rule| {
                let replacement = (rule.apply)(&ctx)?;
                tracing::trace!(header, rule = rule.name, "normalized field");
                Some(replacement)
            })
    }
}

static STANDARD_RULES: LazyLock<RuleTable> = LazyLock::new(RuleTable::standard);

/// Normalizes one cell with the standard rule table.
pub fn normalize_field(header: &str, value: &str, version: &VersionRecord) -> Option<String> {
    STANDARD_RULES.normalize(header, value, version)
}

fn edit_type_suffix(ctx: &FieldContext<'_>) -> Option<String> {
    if ctx.value.ends_with(EDIT_SUFFIX) {
        return None;
    }
    Some(format!("{}{EDIT_SUFFIX}", ctx.value))
}

/// Reformats `"min -> max"` with two-decimal rounding.
pub fn normalize_range(value: &str) -> Option<String> {
    let (min, max) = parse_range(value)?;
    Some(format_range(min, max))
}

/// Strips letters from a lens value, rounds to a whole number, and appends
/// the unit. Lens ranges have each side normalized.
pub fn normalize_lens(value: &str) -> Option<String> {
    match value.split_once("->") {
        Some((min, max)) => Some(format!(
            "{} -> {}",
            normalize_lens_value(min)?,
            normalize_lens_value(max)?
        )),
        None => normalize_lens_value(value),
    }
}

fn normalize_lens_value(value: &str) -> Option<String> {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_alphabetic() && !c.is_whitespace())
        .collect();
    let focal_length: f64 = digits.parse().ok()?;
    Some(format!("{:.0}{LENS_UNIT}", focal_length.round()))
}

/// Removes one leading `<digits>_` prefix.
pub fn strip_shot_prefix(value: &str) -> Option<String> {
    let prefix = SHOT_PREFIX_REGEX.find(value)?;
    Some(value[prefix.end()..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(code: &str) -> VersionRecord {
        VersionRecord::new(1).with_attribute("code", code)
    }

    #[test]
    fn test_range_headers_round() {
        let comp = version("sh010_comp_v001");
        for header in ["Tilt", "Speed", "Height", "Camera Height"] {
            assert_eq!(
                normalize_field(header, "1.2345 -> 6.789", &comp),
                Some("1.23 -> 6.79".to_string())
            );
        }
    }

    #[test]
    fn test_range_header_without_range_is_kept() {
        let comp = version("sh010_comp_v001");
        assert_eq!(normalize_field("Height", "4.5", &comp), None);
        assert_eq!(normalize_field("Height", "", &comp), None);
    }

    #[test]
    fn test_lens() {
        let comp = version("sh010_comp_v001");
        assert_eq!(normalize_field("Lens", "50mm", &comp), Some("50mm".to_string()));
        assert_eq!(normalize_field("Lens", "50.6mm", &comp), Some("51mm".to_string()));
        assert_eq!(
            normalize_field("Lens", "35.0mm -> 50.0mm", &comp),
            Some("35mm -> 50mm".to_string())
        );
        assert_eq!(normalize_field("Lens", "anamorphic", &comp), None);
    }

    #[test]
    fn test_shot_number_strips_once() {
        let comp = version("sh010_comp_v001");
        assert_eq!(
            normalize_field("Shot Number", "010_A1", &comp),
            Some("A1".to_string())
        );
        assert_eq!(
            normalize_field("Shot Number", "010_020_A1", &comp),
            Some("020_A1".to_string())
        );
        assert_eq!(normalize_field("Shot Number", "A1", &comp), None);
        assert_eq!(normalize_field("shot number", "7_B", &comp), Some("B".to_string()));
    }

    #[test]
    fn test_edit_versions() {
        let edit = version("sh010_edit_v004");
        for header in ["Tilt", "Speed", "Height", "Lens", "Height Start"] {
            assert_eq!(
                normalize_field(header, "1.2345 -> 6.789", &edit),
                Some(NOT_APPLICABLE.to_string())
            );
        }
        assert_eq!(
            normalize_field("Type", "Previs", &edit),
            Some("Previs - Edit".to_string())
        );
        assert_eq!(normalize_field("Type", "Previs - Edit", &edit), None);
        assert_eq!(
            normalize_field("Submitted For", "Final", &edit),
            Some(REVIEW_SENTINEL.to_string())
        );
    }

    #[test]
    fn test_type_and_submitted_for_untouched_when_not_edit() {
        let comp = version("sh010_comp_v001");
        assert_eq!(normalize_field("Type", "Previs", &comp), None);
        assert_eq!(normalize_field("Submitted For", "Final", &comp), None);
    }

    #[test]
    fn test_unmatched_header() {
        let comp = version("sh010_comp_v001");
        assert_eq!(normalize_field("Artist", "Ada", &comp), None);
    }

    #[test]
    fn test_custom_table() {
        let table = RuleTable::new().with_rule(FieldRule::new(
            "upper_status",
            HeaderMatch::exact("Status"),
            VersionKind::Any,
            |ctx| Some(ctx.value.to_uppercase()),
        ));
        let comp = version("sh010_comp_v001");
        assert_eq!(table.normalize("Status", "ip", &comp), Some("IP".to_string()));
        assert_eq!(table.normalize("Lens", "50.6mm", &comp), None);
        assert_eq!(table.rules().len(), 1);
    }
}
