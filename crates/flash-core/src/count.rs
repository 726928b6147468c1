//! Raw numeric cells and the one place they are coerced into counts.

use serde::{Deserialize, Serialize};

/// A numeric column exactly as the record source supplied it.
///
/// CSV sources always produce [`RawCount::Text`]; JSON sources may produce
/// any variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other JSON value (boolean, object, array). Never coerces.
    Other(serde_json::Value),
}

impl From<u64> for RawCount {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| RawCount::Text(value.to_string()), RawCount::Integer)
    }
}

impl From<&str> for RawCount {
    fn from(value: &str) -> Self {
        RawCount::Text(value.to_string())
    }
}

impl std::fmt::Display for RawCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawCount::Integer(n) => write!(f, "{n}"),
            RawCount::Float(x) => write!(f, "{x}"),
            RawCount::Text(s) => write!(f, "{s}"),
            RawCount::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Coerce a raw numeric cell into a non-negative count.
///
/// - absent (or blank text) yields `Some(missing)`
/// - integers and finite floats at or above zero are accepted, floats truncated
/// - text has `"` and `,` removed before parsing, so `"50,000"` is `50000`
///
/// Anything else (negative, NaN, infinite, unparseable) yields `None`; the
/// caller decides what a failed field means for its metric.
#[must_use]
pub fn coerce_count(raw: Option<&RawCount>, missing: u64) -> Option<u64> {
    match raw {
        None => Some(missing),
        Some(RawCount::Integer(n)) => u64::try_from(*n).ok(),
        Some(RawCount::Float(x)) => float_to_count(*x),
        Some(RawCount::Text(s)) => {
            let cleaned: String = s.chars().filter(|c| *c != '"' && *c != ',').collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return Some(missing);
            }
            cleaned
                .parse::<u64>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().and_then(float_to_count))
        }
        Some(RawCount::Other(_)) => None,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn float_to_count(x: f64) -> Option<u64> {
    if x.is_finite() && x >= 0.0 && x < u64::MAX as f64 {
        Some(x.trunc() as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCount {
        RawCount::Text(s.to_string())
    }

    #[test]
    fn absent_uses_missing_default() {
        assert_eq!(coerce_count(None, 5), Some(5));
        assert_eq!(coerce_count(None, 0), Some(0));
    }

    #[test]
    fn blank_text_uses_missing_default() {
        assert_eq!(coerce_count(Some(&text("   ")), 1000), Some(1000));
    }

    #[test]
    fn plain_integer_text() {
        assert_eq!(coerce_count(Some(&text("500")), 0), Some(500));
    }

    #[test]
    fn thousands_separators_and_quotes_stripped() {
        assert_eq!(coerce_count(Some(&text("\"50,000\"")), 0), Some(50_000));
    }

    #[test]
    fn decimal_text_truncates() {
        assert_eq!(coerce_count(Some(&text("12.9")), 0), Some(12));
    }

    #[test]
    fn garbage_text_fails() {
        assert_eq!(coerce_count(Some(&text("not a number")), 0), None);
    }

    #[test]
    fn negative_values_fail() {
        assert_eq!(coerce_count(Some(&RawCount::Integer(-3)), 0), None);
        assert_eq!(coerce_count(Some(&text("-3")), 0), None);
        assert_eq!(coerce_count(Some(&RawCount::Float(-0.5)), 0), None);
    }

    #[test]
    fn non_finite_floats_fail() {
        assert_eq!(coerce_count(Some(&RawCount::Float(f64::NAN)), 0), None);
        assert_eq!(coerce_count(Some(&RawCount::Float(f64::INFINITY)), 0), None);
        assert_eq!(coerce_count(Some(&text("NaN")), 0), None);
    }

    #[test]
    fn non_numeric_json_values_fail() {
        let values: Vec<RawCount> = serde_json::from_str(r#"[true, {"n": 1}, [2]]"#).unwrap();
        assert!(values.iter().all(|v| matches!(v, RawCount::Other(_))));
        assert!(values.iter().all(|v| coerce_count(Some(v), 0).is_none()));
    }

    #[test]
    fn json_values_deserialize_untagged() {
        let values: Vec<RawCount> = serde_json::from_str(r#"[7, 2.5, "9"]"#).unwrap();
        assert_eq!(
            values,
            vec![RawCount::Integer(7), RawCount::Float(2.5), text("9")]
        );
    }
}
