//! Result types for consolidation

use credence_domain::{AssertionId, CanonicalRelation};
use serde::{Deserialize, Serialize};

/// Result of a consolidation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationResult {
    /// Canonical relations, one per surviving group
    pub relations: Vec<CanonicalRelation>,

    /// Assertions excluded from grouping, with reasons
    pub skipped: Vec<SkippedAssertion>,
}

impl ConsolidationResult {
    /// Total assertions that participated in grouping
    pub fn consolidated_count(&self) -> usize {
        self.relations.iter().map(|r| r.total_assertions).sum()
    }
}

/// An assertion excluded from consolidation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedAssertion {
    /// Position in the input batch
    pub index: usize,

    /// Identifier of the skipped record
    pub assertion_id: AssertionId,

    /// Why it was excluded
    pub reason: String,
}
