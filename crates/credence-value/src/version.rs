//! Version values and protocol-style version parsing

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A parsed version number
///
/// Missing minor/patch components are preserved for display but treated as
/// zero for ordering only, so "2.0" and "2.0.0" order as equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major component; always present
    pub major: u64,

    /// Minor component, when stated
    pub minor: Option<u64>,

    /// Patch component, when stated
    pub patch: Option<u64>,

    /// Pre-release suffix ("beta1" in "2.0.0-beta1")
    pub suffix: Option<String>,
}

impl Version {
    /// Parse a version from text
    ///
    /// Accepts `X[.Y[.Z]][-suffix]`, a leading `v`, and protocol forms such
    /// as `TLS 1.2` or `SSL 3.0`. Errors only when no leading integer is
    /// parseable after prefix stripping.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let mut rest = text.trim();

        for prefix in ["tls", "ssl", "version", "v"] {
            let matches_prefix = rest
                .get(..prefix.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(prefix));
            if matches_prefix {
                rest = rest[prefix.len()..].trim_start();
                break;
            }
        }

        let (numeric, suffix) = match rest.split_once('-') {
            Some((n, s)) if !s.trim().is_empty() => (n.trim(), Some(s.trim().to_string())),
            _ => (rest, None),
        };

        let mut components = numeric.split('.');

        let major = components
            .next()
            .and_then(leading_u64)
            .ok_or_else(|| ValueError::InvalidVersion(text.to_string()))?;
        let minor = components.next().and_then(leading_u64);
        let patch = components.next().and_then(leading_u64);

        Ok(Self {
            major,
            minor,
            patch,
            suffix,
        })
    }

    /// Compare two versions by numeric precedence
    ///
    /// Tuple comparison with absent components as zero; a suffixed version
    /// precedes its unsuffixed release, and two suffixes compare lexically.
    pub fn cmp_precedence(&self, other: &Version) -> Ordering {
        let key = |v: &Version| (v.major, v.minor.unwrap_or(0), v.patch.unwrap_or(0));
        key(self).cmp(&key(other)).then_with(|| match (&self.suffix, &other.suffix) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }

    /// Whether this version satisfies a minimum requirement (self >= required)
    pub fn is_compatible_with(&self, required: &Version) -> bool {
        self.cmp_precedence(required) != Ordering::Less
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

/// Parse the leading decimal digits of a component ("2b" -> 2)
fn leading_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
