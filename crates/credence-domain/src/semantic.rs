//! Semantic relations - the trust-graded projection handed to consumers

use serde::{Deserialize, Serialize};

use crate::relation::CanonicalRelationId;

/// How a relation's evidence was linguistically expressed, in aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticGrade {
    /// All supporters state the relation directly
    Explicit,

    /// All supporters infer the relation from rhetorical structure
    Discursive,

    /// Both explicit and discursive supporters (or no supporters at all)
    Mixed,
}

impl SemanticGrade {
    /// Get the grade name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticGrade::Explicit => "EXPLICIT",
            SemanticGrade::Discursive => "DISCURSIVE",
            SemanticGrade::Mixed => "MIXED",
        }
    }
}

/// Defensibility tier gating authoritative use
///
/// Strict relations are safe for compliance-grade answers; Extended
/// relations are advisory only and must be excluded from strict answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefensibilityTier {
    /// Authoritative; evidentiary requirements fully met
    Strict,

    /// Advisory; eligible only as a suggestion
    Extended,
}

impl DefensibilityTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DefensibilityTier::Strict => "STRICT",
            DefensibilityTier::Extended => "EXTENDED",
        }
    }
}

/// Structured code for rule-triggered tier caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbstainReason {
    /// Relation type is not whitelisted for discursive support
    WhitelistViolation,

    /// Sole support is unconstrained LLM extraction
    Type2Risk,
}

impl AbstainReason {
    /// Get the reason code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AbstainReason::WhitelistViolation => "WHITELIST_VIOLATION",
            AbstainReason::Type2Risk => "TYPE2_RISK",
        }
    }
}

/// Quantified support behind a semantic relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportStrength {
    /// Explicit supporter count
    pub explicit_count: usize,

    /// Discursive supporter count
    pub discursive_count: usize,

    /// Distinct supporting documents
    pub doc_coverage: usize,

    /// Distinct supporting sections
    pub distinct_sections: usize,

    /// Distinct documents over total assertions, in [0, 1]
    pub bundle_diversity: f64,
}

/// A semantic relation - read-only, always freshly derived
///
/// Consumers must treat Extended-tier relations as advisory. Nothing here is
/// ever hand-edited; re-promotion replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticRelation {
    /// The canonical relation this projection was derived from
    pub canonical_relation_id: CanonicalRelationId,

    /// Aggregate linguistic grade of the evidence
    pub semantic_grade: SemanticGrade,

    /// Defensibility tier for consumer gating
    pub defensibility_tier: DefensibilityTier,

    /// Human-auditable explanation of the tier decision
    pub reason: String,

    /// Structured code when a rule capped the tier
    pub abstain_reason: Option<AbstainReason>,

    /// Quantified support
    pub support_strength: SupportStrength,

    /// Confidence carried over from the canonical aggregate
    pub confidence: f64,
}
