//! Value-level conflict signals between consolidated relations
//!
//! Relations that share a subject and predicate but disagree on the stated
//! object value are the raw material for contradiction review. Comparison
//! goes exclusively through the value algebra; two objects that merely
//! differ as strings are not a conflict unless both decompose into
//! structured values that actually disagree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use credence_domain::{CanonicalRelation, CanonicalRelationId};
use credence_value::{parse_numeric_value, Value};

/// A detected disagreement between two relations' object values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueConflict {
    /// Shared subject
    pub subject_concept_id: String,

    /// Shared normalized predicate
    pub predicate_norm: String,

    /// First relation in the conflicting pair
    pub left_relation: CanonicalRelationId,

    /// Second relation in the conflicting pair
    pub right_relation: CanonicalRelationId,

    /// Parsed object value of the first relation
    pub left_value: Value,

    /// Parsed object value of the second relation
    pub right_value: Value,
}

/// Scan consolidated relations for object-value disagreements
///
/// Only pairs where both objects parse into structured numeric values are
/// compared; a pair agreeing within the tolerance, or related by
/// containment in either direction, is not a conflict. Text-only objects
/// never conflict here - distinct concepts are not contradictions.
pub fn find_value_conflicts(
    relations: &[CanonicalRelation],
    tolerance: f64,
) -> Vec<ValueConflict> {
    let mut by_pair: BTreeMap<(&str, &str), Vec<&CanonicalRelation>> = BTreeMap::new();
    for relation in relations {
        by_pair
            .entry((
                relation.subject_concept_id.as_str(),
                relation.predicate_norm.as_str(),
            ))
            .or_default()
            .push(relation);
    }

    let mut conflicts = Vec::new();
    for ((subject, predicate), members) in by_pair {
        if members.len() < 2 {
            continue;
        }
        for (i, left) in members.iter().enumerate() {
            for right in &members[i + 1..] {
                if left.object_concept_id == right.object_concept_id {
                    continue;
                }
                let Some(left_value) = parse_numeric_value(&left.object_concept_id) else {
                    continue;
                };
                let Some(right_value) = parse_numeric_value(&right.object_concept_id) else {
                    continue;
                };

                let agrees = left_value.equals(&right_value, tolerance)
                    || left_value.contains(&right_value)
                    || right_value.contains(&left_value);
                if !agrees {
                    conflicts.push(ValueConflict {
                        subject_concept_id: subject.to_string(),
                        predicate_norm: predicate.to_string(),
                        left_relation: left.id.clone(),
                        right_relation: right.id.clone(),
                        left_value,
                        right_value,
                    });
                }
            }
        }
    }

    conflicts
}
