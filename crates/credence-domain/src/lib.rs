//! Credence Domain Layer
//!
//! This crate contains the shared data model for the credence trust layer:
//! the record types that flow through consolidation and tier attribution,
//! the closed enums they are graded with, and the trait seams to external
//! collaborators (assertion stores and graph sinks).
//!
//! ## Key Concepts
//!
//! - **RawAssertion**: one extracted subject-predicate-object claim with
//!   evidence and confidence metadata; immutable, append-only
//! - **CanonicalRelation**: the deduplicated aggregate of all assertions
//!   sharing (subject, predicate_norm, object), keyed by a deterministic
//!   content hash
//! - **SemanticRelation**: the trust-graded, read-only projection consumers
//!   gate on (semantic grade + defensibility tier)
//! - **DiscursiveBasis**: the fixed taxonomy of rhetorical patterns behind
//!   inferred relations
//!
//! ## Architecture
//!
//! Pure data and pure functions only. Consolidation logic lives in
//! credence-consolidator, grading in credence-attributor, and every
//! infrastructure interaction goes through the traits defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assertion;
pub mod basis;
pub mod relation;
pub mod relation_type;
pub mod semantic;
pub mod traits;

// Re-exports for convenience
pub use assertion::{AssertionId, AssertionKind, ExtractionMethod, RawAssertion};
pub use basis::{classify_bases, BasisStrength, DiscursiveBasis};
pub use relation::{
    canonical_relation_id, CanonicalRelation, CanonicalRelationId, DiscursiveEvidence, Maturity,
    RelationStatus,
};
pub use relation_type::RelationType;
pub use semantic::{
    AbstainReason, DefensibilityTier, SemanticGrade, SemanticRelation, SupportStrength,
};
pub use traits::{AssertionFilter, AssertionSource, RelationSink};
