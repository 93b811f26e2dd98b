//! Credence Tier Attributor
//!
//! The deterministic decision table that converts a canonical relation's
//! aggregate evidence into a semantic grade (how the evidence was
//! linguistically expressed) and a defensibility tier (whether consumers
//! may treat the relation as authoritative).
//!
//! ## Guarantees
//!
//! - Pure and order-independent: the same inputs always produce the same
//!   decision, with no hidden state and no I/O
//! - Every non-Strict outcome carries a human-auditable reason, and
//!   rule-triggered caps also carry a structured abstain code
//! - An explicit anchor always wins: Explicit and Mixed grades are Strict
//!   regardless of every other argument
//!
//! The attributor is invoked once per canonical relation when building its
//! semantic snapshot, and can also gate a single in-flight assertion before
//! a relation accrues multiple supporters.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributor;

// Re-exports for convenience
pub use attributor::{TierAttributor, TierDecision};
