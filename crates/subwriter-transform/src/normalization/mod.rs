//! Cell normalization for submission spreadsheets.
//!
//! - **rules**: Header-keyed rule table applied to every cell
//! - **numeric**: Rounding and the tracker's decimal formatting

pub mod numeric;
pub mod rules;

pub use numeric::{format_decimal, format_range, format_rounded, parse_range, round2, round_to};
pub use rules::{
    EDIT_SUFFIX, FieldContext, FieldRule, HeaderMatch, LENS_UNIT, NOT_APPLICABLE, REVIEW_SENTINEL,
    RuleFn, RuleTable, VersionKind, normalize_field, normalize_lens, normalize_range,
    strip_shot_prefix,
};
