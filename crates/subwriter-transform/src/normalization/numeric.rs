//! Numeric rounding and formatting for camera values.
//!
//! Values written to the tracker historically always carry at least one
//! decimal (`2.0`, `5.6`, `1.23`), so formatting keeps that convention.

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Shortest representation, with a trailing `.0` for whole numbers.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Round to two decimals and format.
pub fn format_rounded(value: f64) -> String {
    format_decimal(round2(value))
}

/// `"<min> -> <max>"` with both ends rounded to two decimals.
pub fn format_range(min: f64, max: f64) -> String {
    format!("{} -> {}", format_rounded(min), format_rounded(max))
}

/// Splits a `"<min> -> <max>"` string into its two numbers.
pub fn parse_range(value: &str) -> Option<(f64, f64)> {
    let (min, max) = value.split_once("->")?;
    let min = min.trim().parse().ok()?;
    let max = max.trim().parse().ok()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(5.601), 5.6);
        assert_eq!(round2(-1.005_1), -1.01);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(5.6), "5.6");
        assert_eq!(format_decimal(2.0), "2.0");
        assert_eq!(format_decimal(-3.0), "-3.0");
        assert_eq!(format_decimal(1.23), "1.23");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(1.2345, 6.789), "1.23 -> 6.79");
        assert_eq!(format_range(0.0, 12.5), "0.0 -> 12.5");
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("1.2345 -> 6.789"), Some((1.2345, 6.789)));
        assert_eq!(parse_range("-2->3"), Some((-2.0, 3.0)));
        assert_eq!(parse_range("1.5"), None);
        assert_eq!(parse_range("low -> high"), None);
    }
}
