//! The typed value model and its comparison operators
//!
//! Every downstream comparison of two stated fact values goes through this
//! type. Comparison is total and never raises: mismatched variants and
//! incompatible units compare as unequal/not-contained.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::units;
use crate::version::Version;

/// Inequality operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IneqOp {
    /// Strictly less than
    Lt,

    /// Less than or equal
    Le,

    /// Strictly greater than
    Gt,

    /// Greater than or equal
    Ge,
}

impl IneqOp {
    /// Get the operator symbol
    pub fn as_str(&self) -> &'static str {
        match self {
            IneqOp::Lt => "<",
            IneqOp::Le => "<=",
            IneqOp::Gt => ">",
            IneqOp::Ge => ">=",
        }
    }

    /// Parse an operator symbol
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "<" => Some(IneqOp::Lt),
            "<=" | "≤" => Some(IneqOp::Le),
            ">" => Some(IneqOp::Gt),
            ">=" | "≥" => Some(IneqOp::Ge),
            _ => None,
        }
    }

    /// Apply the operator: does `value op bound` hold?
    pub fn satisfies(&self, value: f64, bound: f64) -> bool {
        match self {
            IneqOp::Lt => value < bound,
            IneqOp::Le => value <= bound,
            IneqOp::Gt => value > bound,
            IneqOp::Ge => value >= bound,
        }
    }

    /// Whether this operator bounds from above (< or <=)
    pub fn bounds_above(&self) -> bool {
        matches!(self, IneqOp::Lt | IneqOp::Le)
    }
}

/// A typed fact value
///
/// Seven closed variants covering the value shapes the extraction pipeline
/// produces. Values are transient: they are parsed where two facts must be
/// compared and are not stored on the relation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A single number with an optional unit
    Scalar {
        /// Numeric value
        value: f64,
        /// Optional unit, normalized at comparison time
        unit: Option<String>,
    },

    /// A numeric range
    Interval {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
        /// Whether the lower bound itself is inside the range
        inclusive_low: bool,
        /// Whether the upper bound itself is inside the range
        inclusive_high: bool,
        /// Optional unit
        unit: Option<String>,
    },

    /// A one-sided numeric constraint
    Inequality {
        /// Operator
        op: IneqOp,
        /// Bound the operator compares against
        bound: f64,
        /// Optional unit
        unit: Option<String>,
    },

    /// A set of symbolic values, optionally keyed by contextual conditions
    Set {
        /// Unconditional members
        values: BTreeSet<String>,
        /// Members that only apply under a named condition
        conditions: Option<BTreeMap<String, BTreeSet<String>>>,
    },

    /// A boolean fact
    Boolean(bool),

    /// A version number
    Version(Version),

    /// Free text; the fallback when nothing structural parses
    Text(String),
}

impl Value {
    /// Create a scalar
    pub fn scalar(value: f64, unit: Option<&str>) -> Self {
        Value::Scalar {
            value,
            unit: unit.map(str::to_string),
        }
    }

    /// Create an interval inclusive on both sides
    ///
    /// Inverted bounds are swapped so `low <= high` always holds.
    pub fn interval(low: f64, high: f64, unit: Option<&str>) -> Self {
        Self::interval_with_bounds(low, high, true, true, unit)
    }

    /// Create an interval with explicit per-side inclusivity
    pub fn interval_with_bounds(
        low: f64,
        high: f64,
        inclusive_low: bool,
        inclusive_high: bool,
        unit: Option<&str>,
    ) -> Self {
        let (low, high, inclusive_low, inclusive_high) = if low <= high {
            (low, high, inclusive_low, inclusive_high)
        } else {
            (high, low, inclusive_high, inclusive_low)
        };
        Value::Interval {
            low,
            high,
            inclusive_low,
            inclusive_high,
            unit: unit.map(str::to_string),
        }
    }

    /// Create an inequality
    pub fn inequality(op: IneqOp, bound: f64, unit: Option<&str>) -> Self {
        Value::Inequality {
            op,
            bound,
            unit: unit.map(str::to_string),
        }
    }

    /// Create an unconditional set
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Set {
            values: values.into_iter().map(Into::into).collect(),
            conditions: None,
        }
    }

    /// Create a set keyed by contextual conditions
    pub fn conditional_set(conditions: BTreeMap<String, BTreeSet<String>>) -> Self {
        Value::Set {
            values: BTreeSet::new(),
            conditions: Some(conditions),
        }
    }

    /// Create a text value
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Whether this value only holds under contextual conditions
    pub fn is_conditional(&self) -> bool {
        match self {
            Value::Set {
                conditions: Some(conditions),
                ..
            } => !conditions.is_empty(),
            _ => false,
        }
    }

    /// Report which expected members a set value does not cover
    ///
    /// Conditional members count as covered. For non-set variants nothing is
    /// covered, so every expected member is reported missing.
    pub fn missing_values<'a, I>(&self, expected: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Value::Set { values, conditions } => {
                let conditional: BTreeSet<&String> = conditions
                    .iter()
                    .flat_map(|map| map.values())
                    .flatten()
                    .collect();
                expected
                    .into_iter()
                    .filter(|e| {
                        !values.iter().any(|v| v.eq_ignore_ascii_case(e))
                            && !conditional.iter().any(|v| v.eq_ignore_ascii_case(e))
                    })
                    .map(str::to_string)
                    .collect()
            }
            _ => expected.into_iter().map(str::to_string).collect(),
        }
    }

    /// Deterministic equality with a relative tolerance for scalars
    ///
    /// Mismatched variants are unequal. Incompatible units are unequal; a
    /// missing unit on either side is permissively compatible (see
    /// [`units::compatible`]).
    pub fn equals(&self, other: &Value, tolerance: f64) -> bool {
        match (self, other) {
            (
                Value::Scalar { value: a, unit: ua },
                Value::Scalar { value: b, unit: ub },
            ) => units::compatible(ua.as_deref(), ub.as_deref()) && scalar_eq(*a, *b, tolerance),
            (
                Value::Interval {
                    low: al,
                    high: ah,
                    inclusive_low: ail,
                    inclusive_high: aih,
                    unit: ua,
                },
                Value::Interval {
                    low: bl,
                    high: bh,
                    inclusive_low: bil,
                    inclusive_high: bih,
                    unit: ub,
                },
            ) => {
                units::compatible(ua.as_deref(), ub.as_deref())
                    && scalar_eq(*al, *bl, tolerance)
                    && scalar_eq(*ah, *bh, tolerance)
                    && ail == bil
                    && aih == bih
            }
            (
                Value::Inequality {
                    op: aop,
                    bound: ab,
                    unit: ua,
                },
                Value::Inequality {
                    op: bop,
                    bound: bb,
                    unit: ub,
                },
            ) => {
                units::compatible(ua.as_deref(), ub.as_deref())
                    && aop == bop
                    && scalar_eq(*ab, *bb, tolerance)
            }
            (
                Value::Set {
                    values: av,
                    conditions: ac,
                },
                Value::Set {
                    values: bv,
                    conditions: bc,
                },
            ) => av == bv && ac == bc,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Version(a), Value::Version(b)) => {
                a.cmp_precedence(b) == std::cmp::Ordering::Equal
            }
            (Value::Text(a), Value::Text(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
            _ => false,
        }
    }

    /// Deterministic containment test
    ///
    /// Intervals contain scalars and tighter intervals; inequalities contain
    /// scalars, intervals, and same-direction tighter inequalities; sets
    /// contain their members and subsets. Everything else falls back to
    /// exact equality within the same variant and false across variants.
    pub fn contains(&self, other: &Value) -> bool {
        match (self, other) {
            (
                Value::Interval {
                    low,
                    high,
                    inclusive_low,
                    inclusive_high,
                    unit,
                },
                Value::Scalar { value, unit: vu },
            ) => {
                units::compatible(unit.as_deref(), vu.as_deref())
                    && point_in_interval(*value, *low, *high, *inclusive_low, *inclusive_high)
            }
            (
                Value::Interval {
                    low,
                    high,
                    inclusive_low,
                    inclusive_high,
                    unit,
                },
                Value::Interval {
                    low: ol,
                    high: oh,
                    unit: ou,
                    ..
                },
            ) => {
                // Both endpoints of the other interval must be inside
                units::compatible(unit.as_deref(), ou.as_deref())
                    && point_in_interval(*ol, *low, *high, *inclusive_low, *inclusive_high)
                    && point_in_interval(*oh, *low, *high, *inclusive_low, *inclusive_high)
            }
            (
                Value::Inequality { op, bound, unit },
                Value::Scalar { value, unit: vu },
            ) => {
                units::compatible(unit.as_deref(), vu.as_deref())
                    && op.satisfies(*value, *bound)
            }
            (
                Value::Inequality { op, bound, unit },
                Value::Interval {
                    low, high, unit: ou, ..
                },
            ) => {
                units::compatible(unit.as_deref(), ou.as_deref())
                    && op.satisfies(*low, *bound)
                    && op.satisfies(*high, *bound)
            }
            (
                Value::Inequality { op, bound, unit },
                Value::Inequality {
                    op: oop,
                    bound: obound,
                    unit: ou,
                },
            ) => {
                units::compatible(unit.as_deref(), ou.as_deref())
                    && inequality_implies(*oop, *obound, *op, *bound)
            }
            (Value::Set { .. }, Value::Set { values: ov, .. }) => {
                ov.iter().all(|member| self.set_has_member(member))
            }
            (Value::Set { .. }, Value::Text(member)) => self.set_has_member(member),
            (Value::Scalar { .. }, Value::Scalar { .. })
            | (Value::Boolean(_), Value::Boolean(_))
            | (Value::Text(_), Value::Text(_)) => self.equals(other, 0.0),
            _ => false,
        }
    }

    /// Canonical string form, stable across runs
    pub fn to_canonical(&self) -> String {
        match self {
            Value::Scalar { value, unit } => match unit {
                Some(unit) => format!("{} {}", value, units::normalize(unit)),
                None => format!("{}", value),
            },
            Value::Interval {
                low,
                high,
                inclusive_low,
                inclusive_high,
                unit,
            } => {
                let open = if *inclusive_low { '[' } else { '(' };
                let close = if *inclusive_high { ']' } else { ')' };
                let body = format!("{}{}, {}{}", open, low, high, close);
                match unit {
                    Some(unit) => format!("{} {}", body, units::normalize(unit)),
                    None => body,
                }
            }
            Value::Inequality { op, bound, unit } => match unit {
                Some(unit) => format!("{} {} {}", op.as_str(), bound, units::normalize(unit)),
                None => format!("{} {}", op.as_str(), bound),
            },
            Value::Set { values, conditions } => {
                let mut parts: Vec<String> = Vec::new();
                if !values.is_empty() {
                    parts.push(format!(
                        "{{{}}}",
                        values.iter().cloned().collect::<Vec<_>>().join(", ")
                    ));
                }
                if let Some(conditions) = conditions {
                    for (condition, members) in conditions {
                        parts.push(format!(
                            "{} -> {{{}}}",
                            condition,
                            members.iter().cloned().collect::<Vec<_>>().join(", ")
                        ));
                    }
                }
                if parts.is_empty() {
                    "{}".to_string()
                } else {
                    parts.join("; ")
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::Version(v) => v.to_string(),
            Value::Text(t) => t.trim().to_string(),
        }
    }

    /// Case-insensitive membership across unconditional and conditional parts
    fn set_has_member(&self, member: &str) -> bool {
        match self {
            Value::Set { values, conditions } => {
                values.iter().any(|v| v.eq_ignore_ascii_case(member))
                    || conditions
                        .iter()
                        .flat_map(|map| map.values())
                        .flatten()
                        .any(|v| v.eq_ignore_ascii_case(member))
            }
            _ => false,
        }
    }
}

/// Scalar equality with relative tolerance and an absolute fallback at zero
fn scalar_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if tolerance <= 0.0 {
        return a == b;
    }
    if a == 0.0 {
        return b.abs() <= tolerance;
    }
    ((a - b) / a).abs() <= tolerance
}

/// Point-in-interval respecting per-side inclusivity
fn point_in_interval(
    value: f64,
    low: f64,
    high: f64,
    inclusive_low: bool,
    inclusive_high: bool,
) -> bool {
    let above_low = if inclusive_low { value >= low } else { value > low };
    let below_high = if inclusive_high { value <= high } else { value < high };
    above_low && below_high
}

/// Whether `narrow_op narrow_bound` implies `wide_op wide_bound`
///
/// Implication is only inferred within the same direction family: an upper
/// bound can imply a looser upper bound (<= 30 implies <= 40) and a lower
/// bound a looser lower bound. Across families the answer is a conservative
/// false, never a guess.
fn inequality_implies(narrow_op: IneqOp, narrow_bound: f64, wide_op: IneqOp, wide_bound: f64) -> bool {
    if narrow_op.bounds_above() != wide_op.bounds_above() {
        return false;
    }
    if wide_op.bounds_above() {
        narrow_bound < wide_bound
            || (narrow_bound == wide_bound
                && (wide_op == IneqOp::Le || narrow_op == IneqOp::Lt))
    } else {
        narrow_bound > wide_bound
            || (narrow_bound == wide_bound
                && (wide_op == IneqOp::Ge || narrow_op == IneqOp::Gt))
    }
}
