//! Canonical relations - the deduplicated aggregate of raw assertions

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::assertion::ExtractionMethod;
use crate::basis::DiscursiveBasis;
use crate::relation_type::RelationType;

/// Number of hex characters kept from the content hash
const ID_LEN: usize = 32;

/// Deterministic identifier for a canonical relation
///
/// Derived purely from (tenant, subject, predicate_norm, object), so
/// re-consolidating the same logical relation always yields the same id
/// regardless of assertion order or count.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRelationId(String);

impl CanonicalRelationId {
    /// Wrap an id previously produced by [`canonical_relation_id`]
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_string(value: String) -> Self {
        Self(value)
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalRelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the canonical relation id for a (tenant, subject, predicate, object)
///
/// SHA-256 over the pipe-joined key, hex-encoded and truncated. Kept as an
/// explicit pure function so stored ids survive reimplementation.
pub fn canonical_relation_id(
    tenant: &str,
    subject_concept_id: &str,
    predicate_norm: &str,
    object_concept_id: &str,
) -> CanonicalRelationId {
    let mut hasher = Sha256::new();
    hasher.update(tenant.as_bytes());
    hasher.update(b"|");
    hasher.update(subject_concept_id.as_bytes());
    hasher.update(b"|");
    hasher.update(predicate_norm.as_bytes());
    hasher.update(b"|");
    hasher.update(object_concept_id.as_bytes());

    let digest = hex::encode(hasher.finalize());
    CanonicalRelationId(digest[..ID_LEN].to_string())
}

/// Maturity label of a canonical relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Maturity {
    /// Single-document or otherwise unproven support
    Candidate,

    /// Independently supported by at least two documents
    Validated,

    /// The extractor could not settle on one relation type
    AmbiguousType,

    /// Support is dominated by conditional statements
    ContextDependent,
}

impl Maturity {
    /// Get the maturity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Maturity::Candidate => "CANDIDATE",
            Maturity::Validated => "VALIDATED",
            Maturity::AmbiguousType => "AMBIGUOUS_TYPE",
            Maturity::ContextDependent => "CONTEXT_DEPENDENT",
        }
    }
}

/// Lifecycle status of a canonical relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationStatus {
    /// Live relation, eligible for promotion
    Active,

    /// Superseded or withdrawn; kept for audit
    Deprecated,
}

impl Default for RelationStatus {
    fn default() -> Self {
        RelationStatus::Active
    }
}

/// Aggregate discursive evidence for a relation, consumed by tier attribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscursiveEvidence {
    /// Union of basis tags across discursive supporters
    pub bases: BTreeSet<DiscursiveBasis>,

    /// Distinct extraction methods across all supporters
    pub methods: BTreeSet<ExtractionMethod>,

    /// Whether any discursive supporter has an in-text marker
    pub has_marker_in_text: bool,

    /// Distinct (doc, chunk, segment) spans among discursive supporters
    pub span_count: usize,
}

/// A canonical relation - the aggregate of all assertions sharing
/// (subject, predicate_norm, object)
///
/// Recomputed wholesale on every consolidation run; never patched
/// field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRelation {
    /// Deterministic content-hash id
    pub id: CanonicalRelationId,

    /// Subject concept identifier
    pub subject_concept_id: String,

    /// Object concept identifier
    pub object_concept_id: String,

    /// Normalized predicate (part of the grouping key)
    pub predicate_norm: String,

    /// Inferred relation type; consolidation always produces one
    pub relation_type: RelationType,

    /// Maturity label
    pub maturity: Maturity,

    /// Top raw predicate strings by frequency (explainability only)
    pub predicate_profile: Vec<String>,

    /// Distinct supporting documents
    pub distinct_documents: usize,

    /// Distinct supporting chunks
    pub distinct_chunks: usize,

    /// Distinct non-empty section identifiers
    pub distinct_sections: usize,

    /// Total assertions in the group
    pub total_assertions: usize,

    /// Supporters expressed explicitly
    pub explicit_support_count: usize,

    /// Supporters inferred discursively
    pub discursive_support_count: usize,

    /// Mean of final confidences
    pub confidence_mean: f64,

    /// Median of final confidences
    pub confidence_p50: f64,

    /// Earliest supporter timestamp (Unix milliseconds)
    pub first_seen: u64,

    /// Latest supporter timestamp (Unix milliseconds)
    pub last_seen: u64,

    /// Distinct extractor versions, sorted
    pub extractor_versions: Vec<String>,

    /// Lifecycle status
    pub status: RelationStatus,

    /// Aggregate discursive evidence for tier attribution
    pub evidence: DiscursiveEvidence,
}
