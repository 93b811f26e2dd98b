//! Credence Relation Consolidator
//!
//! A pure, stateless transform from a raw assertion batch to canonical
//! relations. Grouping is by (subject, object, predicate_norm); each group
//! is aggregated independently into one relation with a deterministic
//! content-hash id, so re-running consolidation over an unchanged batch
//! reproduces identical output. Persistence belongs to external
//! collaborators - this crate performs no I/O.
//!
//! Beyond aggregation, the crate exposes [`find_value_conflicts`], which
//! uses the value algebra to flag relations that state disagreeing values
//! for the same subject and predicate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod conflict;
pub mod consolidator;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::ConsolidatorConfig;
pub use conflict::{find_value_conflicts, ValueConflict};
pub use consolidator::RelationConsolidator;
pub use error::ConsolidatorError;
pub use types::{ConsolidationResult, SkippedAssertion};
