//! Rational normalizer
//!
//! EXIF stores many numeric tags as numerator/denominator pairs. A malformed
//! pair never fails extraction; it resolves to `None` for that field only.

/// Convert `numerator / denominator` to a decimal.
///
/// Returns `None` for a zero denominator or a non-finite result.
pub fn normalize(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }

    let value = numerator as f64 / denominator as f64;
    value.is_finite().then_some(value)
}

/// Parse a textual fraction such as `"27/5"`, or a plain number such as
/// `"5.4"` (taken as `x/1`), into its numerator and denominator.
pub fn parse_fraction(s: &str) -> Option<(i64, i64)> {
    let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());

    match s.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<i64>().ok()?;
            let den = den.trim().parse::<i64>().ok()?;
            Some((num, den))
        }
        None => {
            let value = s.parse::<f64>().ok()?;
            if !value.is_finite() {
                return None;
            }
            // Keep up to six decimal places exactly
            let scaled = (value * 1_000_000.0).round();
            if scaled.abs() > i64::MAX as f64 {
                return None;
            }
            Some((scaled as i64, 1_000_000))
        }
    }
}

/// [`normalize`] applied to a textual fraction.
pub fn normalize_str(s: &str) -> Option<f64> {
    let (num, den) = parse_fraction(s)?;
    normalize(num, den)
}

/// Render an exposure time in photographer's notation.
///
/// - zero numerator or denominator, or a negative value: `None`
/// - one second or longer: decimal seconds with trailing zeros trimmed
///   (`"1"`, `"2.5"`)
/// - shorter than a second: `"1/N"` with `N = round(denominator / numerator)`
///   (`10/1250` gives `"1/125"`)
///
/// `"1/1"` is never produced: a one-second exposure renders as `"1"`.
pub fn exposure_display(numerator: i64, denominator: i64) -> Option<String> {
    if numerator == 0 || denominator == 0 {
        return None;
    }

    let seconds = normalize(numerator, denominator)?;
    if seconds <= 0.0 {
        return None;
    }

    if seconds >= 1.0 {
        return Some(trim_decimal(seconds));
    }

    let reciprocal = (denominator as f64 / numerator as f64).round();
    if !reciprocal.is_finite() || reciprocal < 2.0 {
        // Rounds to a whole second, e.g. 9/10
        return Some(trim_decimal(seconds));
    }

    Some(format!("1/{}", reciprocal as u64))
}

fn trim_decimal(value: f64) -> String {
    let rendered = format!("{:.3}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
