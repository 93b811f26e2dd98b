//! Relation type taxonomy and predicate-based inference

use serde::{Deserialize, Serialize};

/// Semantic type of a relation between two concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// Subject causally produces the object
    Causes,

    /// Subject prevents or mitigates the object
    Prevents,

    /// Subject makes the object possible
    Enables,

    /// Subject requires the object
    Requires,

    /// Subject depends on the object
    DependsOn,

    /// Subject is a component of the object
    PartOf,

    /// Subject is an instance of the object category
    InstanceOf,

    /// Subject is defined as the object
    DefinedAs,

    /// Subject supports or confirms the object
    Supports,

    /// Subject contradicts the object
    Contradicts,

    /// Generic association; the inference fallback
    AssociatedWith,
}

impl RelationType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Causes => "CAUSES",
            RelationType::Prevents => "PREVENTS",
            RelationType::Enables => "ENABLES",
            RelationType::Requires => "REQUIRES",
            RelationType::DependsOn => "DEPENDS_ON",
            RelationType::PartOf => "PART_OF",
            RelationType::InstanceOf => "INSTANCE_OF",
            RelationType::DefinedAs => "DEFINED_AS",
            RelationType::Supports => "SUPPORTS",
            RelationType::Contradicts => "CONTRADICTS",
            RelationType::AssociatedWith => "ASSOCIATED_WITH",
        }
    }

    /// Whether this type asserts a causal mechanism
    pub fn is_causal(&self) -> bool {
        matches!(
            self,
            RelationType::Causes | RelationType::Prevents | RelationType::Enables
        )
    }
}

/// Ordered keyword table mapping normalized predicates to relation types.
/// First substring match wins, so more specific phrases come first.
const PREDICATE_KEYWORDS: &[(&str, RelationType)] = &[
    ("result in", RelationType::Causes),
    ("lead to", RelationType::Causes),
    ("cause", RelationType::Causes),
    ("prevent", RelationType::Prevents),
    ("mitigate", RelationType::Prevents),
    ("enable", RelationType::Enables),
    ("allow", RelationType::Enables),
    ("require", RelationType::Requires),
    ("need", RelationType::Requires),
    ("must use", RelationType::Requires),
    ("depend", RelationType::DependsOn),
    ("part of", RelationType::PartOf),
    ("component of", RelationType::PartOf),
    ("belong to", RelationType::PartOf),
    ("instance of", RelationType::InstanceOf),
    ("type of", RelationType::InstanceOf),
    ("kind of", RelationType::InstanceOf),
    ("defined as", RelationType::DefinedAs),
    ("refers to", RelationType::DefinedAs),
    ("contradict", RelationType::Contradicts),
    ("conflict with", RelationType::Contradicts),
    ("support", RelationType::Supports),
    ("confirm", RelationType::Supports),
];

impl RelationType {
    /// Infer a relation type from a normalized predicate
    ///
    /// Walks the ordered keyword table; the first substring match wins.
    /// Falls back to AssociatedWith, so inference always produces a type.
    pub fn infer_from_predicate(predicate_norm: &str) -> Self {
        let needle = predicate_norm.to_lowercase();
        for (keyword, relation_type) in PREDICATE_KEYWORDS {
            if needle.contains(keyword) {
                return *relation_type;
            }
        }
        RelationType::AssociatedWith
    }
}
