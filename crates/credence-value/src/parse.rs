//! Structural parsing of fact value text
//!
//! `parse_numeric_value` tries inequality patterns, then interval patterns,
//! then a plain scalar, in that order, and returns the first structural
//! match. Callers fall back to `Value::Text` on `None` - a value that fails
//! to parse is kept, never dropped.

use crate::value::{IneqOp, Value};

/// Word-form inequality prefixes, checked after the symbol forms.
/// Longer phrases come first so "no more than" wins over "more than".
const WORD_OPS: &[(&str, IneqOp)] = &[
    ("no more than", IneqOp::Le),
    ("no less than", IneqOp::Ge),
    ("at most", IneqOp::Le),
    ("at least", IneqOp::Ge),
    ("up to", IneqOp::Le),
    ("under", IneqOp::Lt),
    ("below", IneqOp::Lt),
    ("over", IneqOp::Gt),
    ("above", IneqOp::Gt),
];

/// Try to parse text into a structured numeric value
///
/// Returns `None` when nothing structural matches; callers must fall back
/// to `Value::Text`, never drop the value.
pub fn parse_numeric_value(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_inequality(trimmed)
        .or_else(|| parse_interval(trimmed))
        .or_else(|| parse_scalar(trimmed))
}

/// Parse text into a value, falling back to Text
pub fn from_text(text: &str) -> Value {
    parse_numeric_value(text).unwrap_or_else(|| Value::text(text.trim()))
}

fn parse_inequality(text: &str) -> Option<Value> {
    for symbol in ["<=", ">=", "≤", "≥", "<", ">"] {
        if let Some(rest) = text.strip_prefix(symbol) {
            let op = IneqOp::parse(symbol)?;
            let (bound, unit) = parse_number_with_unit(rest)?;
            return Some(Value::inequality(op, bound, unit.as_deref()));
        }
    }

    let lowered = text.to_lowercase();
    for (phrase, op) in WORD_OPS {
        if let Some(rest) = lowered.strip_prefix(phrase) {
            let (bound, unit) = parse_number_with_unit(rest)?;
            return Some(Value::inequality(*op, bound, unit.as_deref()));
        }
    }

    None
}

fn parse_interval(text: &str) -> Option<Value> {
    let lowered = text.to_lowercase();

    if let Some(rest) = lowered.strip_prefix("between") {
        if let Some((left, right)) = rest.split_once(" and ") {
            return build_interval(left, right);
        }
        return None;
    }

    if let Some((left, right)) = lowered.split_once(" to ") {
        return build_interval(left, right);
    }

    // Dash ranges: try each dash position past the first character so a
    // leading minus sign is not mistaken for a separator
    for dash in ['-', '–'] {
        for (idx, c) in lowered.char_indices().skip(1) {
            if c != dash {
                continue;
            }
            let left = &lowered[..idx];
            let right = &lowered[idx + c.len_utf8()..];
            if let Some(interval) = build_interval(left, right) {
                return Some(interval);
            }
        }
    }

    None
}

fn build_interval(left: &str, right: &str) -> Option<Value> {
    let (low, low_unit) = parse_number_with_unit(left)?;
    let (high, high_unit) = parse_number_with_unit(right)?;

    let unit = match (&low_unit, &high_unit) {
        (Some(a), Some(b)) if a != b => return None,
        (Some(a), _) => Some(a.clone()),
        (None, other) => other.clone(),
    };

    Some(Value::interval(low, high, unit.as_deref()))
}

fn parse_scalar(text: &str) -> Option<Value> {
    let (value, unit) = parse_number_with_unit(text)?;
    Some(Value::scalar(value, unit.as_deref()))
}

/// Split text into a leading number and an optional trailing unit
///
/// The remainder only counts as a unit when it carries no further digits;
/// "99.7 99.9" is not a scalar with unit "99.9".
fn parse_number_with_unit(text: &str) -> Option<(f64, Option<String>)> {
    let (value, rest) = split_number(text.trim())?;
    let unit = rest.trim();
    if unit.is_empty() {
        return Some((value, None));
    }
    if unit.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((value, Some(unit.to_string())))
}

/// Split a leading floating-point literal off the front of the text
fn split_number(text: &str) -> Option<(f64, &str)> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, c) in text.char_indices() {
        let accepted = match c {
            '+' | '-' => idx == 0,
            '0'..='9' => {
                seen_digit = true;
                true
            }
            '.' => {
                if seen_dot {
                    false
                } else {
                    seen_dot = true;
                    true
                }
            }
            _ => false,
        };
        if !accepted {
            break;
        }
        end = idx + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    let (number, rest) = text.split_at(end);
    number.parse::<f64>().ok().map(|value| (value, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_with_unit() {
        assert_eq!(
            parse_numeric_value("99.5%"),
            Some(Value::scalar(99.5, Some("%")))
        );
        assert_eq!(
            parse_numeric_value("30 minutes"),
            Some(Value::scalar(30.0, Some("minutes")))
        );
        assert_eq!(parse_numeric_value("42"), Some(Value::scalar(42.0, None)));
        assert_eq!(parse_numeric_value("-3.5"), Some(Value::scalar(-3.5, None)));
    }

    #[test]
    fn test_parse_inequality_symbols() {
        assert_eq!(
            parse_numeric_value("<= 30 min"),
            Some(Value::inequality(IneqOp::Le, 30.0, Some("min")))
        );
        assert_eq!(
            parse_numeric_value("≥99.9%"),
            Some(Value::inequality(IneqOp::Ge, 99.9, Some("%")))
        );
        assert_eq!(
            parse_numeric_value(">1024"),
            Some(Value::inequality(IneqOp::Gt, 1024.0, None))
        );
    }

    #[test]
    fn test_parse_inequality_phrases() {
        assert_eq!(
            parse_numeric_value("at most 30 minutes"),
            Some(Value::inequality(IneqOp::Le, 30.0, Some("minutes")))
        );
        assert_eq!(
            parse_numeric_value("At least 2 hours"),
            Some(Value::inequality(IneqOp::Ge, 2.0, Some("hours")))
        );
        assert_eq!(
            parse_numeric_value("no more than 5"),
            Some(Value::inequality(IneqOp::Le, 5.0, None))
        );
    }

    #[test]
    fn test_parse_interval_forms() {
        assert_eq!(
            parse_numeric_value("99.7-99.9%"),
            Some(Value::interval(99.7, 99.9, Some("%")))
        );
        assert_eq!(
            parse_numeric_value("10 to 20 ms"),
            Some(Value::interval(10.0, 20.0, Some("ms")))
        );
        assert_eq!(
            parse_numeric_value("between 1 and 5 days"),
            Some(Value::interval(1.0, 5.0, Some("days")))
        );
    }

    #[test]
    fn test_dash_after_negative_number() {
        assert_eq!(
            parse_numeric_value("-5-10"),
            Some(Value::interval(-5.0, 10.0, None))
        );
    }

    #[test]
    fn test_order_inequality_before_interval_before_scalar() {
        // "<= 30" must not be read as the scalar 30
        assert!(matches!(
            parse_numeric_value("<=30"),
            Some(Value::Inequality { .. })
        ));
        // "10 to 20" must not be read as the scalar 10
        assert!(matches!(
            parse_numeric_value("10 to 20"),
            Some(Value::Interval { .. })
        ));
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert_eq!(parse_numeric_value("enabled by default"), None);
        assert_eq!(parse_numeric_value(""), None);
        assert_eq!(parse_numeric_value("   "), None);
    }

    #[test]
    fn test_from_text_falls_back_to_text() {
        assert_eq!(from_text("42 ms"), Value::scalar(42.0, Some("ms")));
        assert_eq!(from_text("enabled by default"), Value::text("enabled by default"));
    }

    #[test]
    fn test_mismatched_interval_units_rejected() {
        // "10 min to 20 h" is not a coherent interval
        assert_eq!(parse_numeric_value("10 min to 20 h"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: arbitrary input never panics, it parses or returns None
        #[test]
        fn test_parse_total(input in "\\PC{0,40}") {
            let _ = parse_numeric_value(&input);
        }

        /// Property: a formatted scalar always round-trips structurally
        #[test]
        fn test_scalar_roundtrip(value in -1e9..1e9f64) {
            let text = format!("{}", value);
            match parse_numeric_value(&text) {
                Some(Value::Scalar { value: parsed, .. }) => {
                    prop_assert!((parsed - value).abs() < 1e-6_f64.max(value.abs() * 1e-12));
                }
                other => prop_assert!(false, "expected scalar, got {:?}", other),
            }
        }
    }
}
