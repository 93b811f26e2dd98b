//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the trust layer and the
//! infrastructure that feeds and persists it. The core never performs I/O;
//! implementations own cancellation, timeout, and retry semantics.

use crate::assertion::RawAssertion;
use crate::relation::CanonicalRelation;
use crate::relation_type::RelationType;
use crate::semantic::SemanticRelation;

/// Trait for fetching raw assertion batches
///
/// Implemented by the upstream extraction store. Callers should bound the
/// batch with a filter rather than expect internal throttling.
pub trait AssertionSource {
    /// Error type for fetch operations
    type Error;

    /// Fetch assertions matching the filter, in extraction order
    fn fetch(&self, filter: &AssertionFilter) -> Result<Vec<RawAssertion>, Self::Error>;
}

/// Filter criteria for bounding an assertion fetch
#[derive(Debug, Clone, Default)]
pub struct AssertionFilter {
    /// Restrict to a subject concept
    pub subject_concept_id: Option<String>,

    /// Restrict to an object concept
    pub object_concept_id: Option<String>,

    /// Restrict to a classified relation type
    pub relation_type: Option<RelationType>,

    /// Restrict to a source document
    pub source_doc_id: Option<String>,

    /// Maximum records to return
    pub limit: Option<usize>,
}

/// Trait for persisting consolidated output
///
/// Implemented by the graph store. Upserts are keyed by the canonical
/// relation id, so replaying a consolidation run is idempotent.
pub trait RelationSink {
    /// Error type for sink operations
    type Error;

    /// Upsert a canonical relation, replacing any previous aggregate
    fn upsert_canonical(&mut self, relation: &CanonicalRelation) -> Result<(), Self::Error>;

    /// Upsert the freshly derived semantic projection
    fn upsert_semantic(&mut self, relation: &SemanticRelation) -> Result<(), Self::Error>;
}
