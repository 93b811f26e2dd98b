//! Unit normalization and compatibility

/// Fixed alias table mapping spelled-out units to their canonical form.
/// Lookup happens after lowercasing, so the table only carries lowercase keys.
const UNIT_ALIASES: &[(&str, &str)] = &[
    ("percent", "%"),
    ("percentage", "%"),
    ("pct", "%"),
    ("minute", "min"),
    ("minutes", "min"),
    ("mins", "min"),
    ("hour", "h"),
    ("hours", "h"),
    ("hr", "h"),
    ("hrs", "h"),
    ("second", "s"),
    ("seconds", "s"),
    ("sec", "s"),
    ("secs", "s"),
    ("millisecond", "ms"),
    ("milliseconds", "ms"),
    ("msec", "ms"),
    ("day", "d"),
    ("days", "d"),
    ("kilobyte", "kb"),
    ("kilobytes", "kb"),
    ("megabyte", "mb"),
    ("megabytes", "mb"),
    ("gigabyte", "gb"),
    ("gigabytes", "gb"),
];

/// Normalize a unit string: trim, lowercase, resolve aliases
pub fn normalize(unit: &str) -> String {
    let lowered = unit.trim().to_lowercase();
    for (alias, canonical) in UNIT_ALIASES {
        if lowered == *alias {
            return (*canonical).to_string();
        }
    }
    lowered
}

/// Whether two optional units compare as the same dimension
///
/// A missing unit on either side is treated as compatible. This is the
/// permissive default: it trades false-negative conflict detection for
/// false-positive equivalence, and a conservative caller can pre-check
/// that both sides carry a unit before comparing.
pub fn compatible(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => normalize(a) == normalize(b),
        _ => true,
    }
}
