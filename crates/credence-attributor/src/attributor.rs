//! Tier attribution - the decision table that grades evidentiary strength

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use credence_domain::{
    classify_bases, AbstainReason, BasisStrength, CanonicalRelation, DefensibilityTier,
    DiscursiveBasis, ExtractionMethod, RawAssertion, RelationType, SemanticGrade,
    SemanticRelation, SupportStrength,
};

/// Relation types that may never rest on discursive support alone.
/// Causal claims demand an explicit anchor; rhetoric is not a mechanism.
const FORBIDDEN_FOR_DISCURSIVE: &[RelationType] = &[
    RelationType::Causes,
    RelationType::Prevents,
    RelationType::Enables,
];

/// Minimum distinct spans for a weak-basis relation to reach Strict
const WEAK_BASIS_MIN_SPANS: usize = 2;

/// Outcome of one tier attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDecision {
    /// Aggregate linguistic grade of the evidence
    pub semantic_grade: SemanticGrade,

    /// Assigned defensibility tier
    pub defensibility_tier: DefensibilityTier,

    /// Human-auditable explanation; always set
    pub reason: String,

    /// Structured code when a rule capped the tier
    pub abstain_reason: Option<AbstainReason>,
}

/// The TierAttributor grades relations before they reach consumers
///
/// A pure decision table with no configuration and no external
/// dependencies; safe to call concurrently from any number of callers.
#[derive(Debug, Default)]
pub struct TierAttributor;

impl TierAttributor {
    /// Create a tier attributor
    pub fn new() -> Self {
        Self
    }

    /// Compute the semantic grade from support counters
    ///
    /// Zero support on both sides grades as Mixed: a defensive default for
    /// data that should never occur, preferred over guessing a direction.
    pub fn semantic_grade(&self, explicit_count: usize, discursive_count: usize) -> SemanticGrade {
        match (explicit_count, discursive_count) {
            (e, 0) if e > 0 => SemanticGrade::Explicit,
            (0, d) if d > 0 => SemanticGrade::Discursive,
            _ => SemanticGrade::Mixed,
        }
    }

    /// Compute the defensibility tier for a graded relation
    ///
    /// The decision table, in order:
    /// 1. Explicit or Mixed grade is Strict unconditionally - an explicit
    ///    anchor suffices even if the discursive portion would fail.
    /// 2. Discursive grade with a forbidden relation type is Extended.
    /// 3. Discursive grade whose only extraction method is unconstrained
    ///    LLM is Extended, regardless of basis, marker, or spans.
    /// 4. Otherwise a strong basis needs an in-text marker, and a weak
    ///    basis needs at least two distinct supporting spans.
    pub fn defensibility_tier(
        &self,
        grade: SemanticGrade,
        bases: &BTreeSet<DiscursiveBasis>,
        relation_type: RelationType,
        methods: &BTreeSet<ExtractionMethod>,
        has_marker_in_text: bool,
        span_count: usize,
    ) -> TierDecision {
        if grade != SemanticGrade::Discursive {
            return TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Strict,
                reason: "explicit anchor present".to_string(),
                abstain_reason: None,
            };
        }

        if FORBIDDEN_FOR_DISCURSIVE.contains(&relation_type) {
            return TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Extended,
                reason: format!(
                    "relation type {} cannot rest on discursive support alone",
                    relation_type.as_str()
                ),
                abstain_reason: Some(AbstainReason::WhitelistViolation),
            };
        }

        let llm_only = !methods.is_empty()
            && methods
                .iter()
                .all(|m| *m == ExtractionMethod::UnconstrainedLlm);
        if llm_only {
            return TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Extended,
                reason: "sole support is unconstrained LLM extraction".to_string(),
                abstain_reason: Some(AbstainReason::Type2Risk),
            };
        }

        match classify_bases(bases) {
            BasisStrength::Strong if has_marker_in_text => TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Strict,
                reason: "strong discursive basis with in-text marker".to_string(),
                abstain_reason: None,
            },
            BasisStrength::Strong => TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Extended,
                reason: "strong discursive basis lacks an in-text marker".to_string(),
                abstain_reason: None,
            },
            BasisStrength::Weak if span_count >= WEAK_BASIS_MIN_SPANS => TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Strict,
                reason: format!(
                    "weak discursive basis corroborated by {} distinct spans",
                    span_count
                ),
                abstain_reason: None,
            },
            BasisStrength::Weak => TierDecision {
                semantic_grade: grade,
                defensibility_tier: DefensibilityTier::Extended,
                reason: "weak discursive basis with a single supporting span".to_string(),
                abstain_reason: None,
            },
        }
    }

    /// Build the semantic relation snapshot for a canonical relation
    ///
    /// Always a fresh derivation; nothing from a previous promotion is
    /// carried over or patched.
    pub fn promote(&self, relation: &CanonicalRelation) -> SemanticRelation {
        let grade = self.semantic_grade(
            relation.explicit_support_count,
            relation.discursive_support_count,
        );
        let decision = self.defensibility_tier(
            grade,
            &relation.evidence.bases,
            relation.relation_type,
            &relation.evidence.methods,
            relation.evidence.has_marker_in_text,
            relation.evidence.span_count,
        );

        let bundle_diversity = if relation.total_assertions == 0 {
            0.0
        } else {
            (relation.distinct_documents as f64 / relation.total_assertions as f64).clamp(0.0, 1.0)
        };

        SemanticRelation {
            canonical_relation_id: relation.id.clone(),
            semantic_grade: decision.semantic_grade,
            defensibility_tier: decision.defensibility_tier,
            reason: decision.reason,
            abstain_reason: decision.abstain_reason,
            support_strength: SupportStrength {
                explicit_count: relation.explicit_support_count,
                discursive_count: relation.discursive_support_count,
                doc_coverage: relation.distinct_documents,
                distinct_sections: relation.distinct_sections,
                bundle_diversity,
            },
            confidence: relation.confidence_mean,
        }
    }

    /// Grade a single in-flight assertion before a relation accrues support
    ///
    /// The pre-persistence gate: one assertion is one span, so a weak-basis
    /// discursive assertion can never enter at Strict.
    pub fn gate_assertion(&self, assertion: &RawAssertion) -> TierDecision {
        let (explicit, discursive) = match assertion.kind {
            credence_domain::AssertionKind::Explicit => (1, 0),
            credence_domain::AssertionKind::Discursive => (0, 1),
        };
        let grade = self.semantic_grade(explicit, discursive);

        let relation_type = assertion
            .relation_type
            .unwrap_or_else(|| RelationType::infer_from_predicate(&assertion.predicate_norm));
        let bases: BTreeSet<DiscursiveBasis> =
            assertion.discursive_basis.iter().copied().collect();
        let methods: BTreeSet<ExtractionMethod> =
            std::iter::once(assertion.extraction_method).collect();

        self.defensibility_tier(
            grade,
            &bases,
            relation_type,
            &methods,
            assertion.has_marker_in_text,
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributor() -> TierAttributor {
        TierAttributor::new()
    }

    fn discursive_tier(
        bases: &[DiscursiveBasis],
        relation_type: RelationType,
        methods: &[ExtractionMethod],
        marker: bool,
        spans: usize,
    ) -> TierDecision {
        attributor().defensibility_tier(
            SemanticGrade::Discursive,
            &bases.iter().copied().collect(),
            relation_type,
            &methods.iter().copied().collect(),
            marker,
            spans,
        )
    }

    #[test]
    fn test_grade_table() {
        let a = attributor();
        assert_eq!(a.semantic_grade(5, 0), SemanticGrade::Explicit);
        assert_eq!(a.semantic_grade(0, 3), SemanticGrade::Discursive);
        assert_eq!(a.semantic_grade(2, 3), SemanticGrade::Mixed);
        assert_eq!(a.semantic_grade(0, 0), SemanticGrade::Mixed);
    }

    #[test]
    fn test_explicit_grade_is_always_strict() {
        // Every combination of the remaining arguments must yield Strict
        for relation_type in [RelationType::Causes, RelationType::AssociatedWith] {
            for method in [ExtractionMethod::UnconstrainedLlm, ExtractionMethod::Pattern] {
                for marker in [false, true] {
                    for spans in [0, 1, 5] {
                        let decision = attributor().defensibility_tier(
                            SemanticGrade::Explicit,
                            &BTreeSet::new(),
                            relation_type,
                            &std::iter::once(method).collect(),
                            marker,
                            spans,
                        );
                        assert_eq!(decision.defensibility_tier, DefensibilityTier::Strict);
                        assert!(decision.abstain_reason.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn test_mixed_grade_is_always_strict() {
        let decision = attributor().defensibility_tier(
            SemanticGrade::Mixed,
            &BTreeSet::new(),
            RelationType::Causes,
            &std::iter::once(ExtractionMethod::UnconstrainedLlm).collect(),
            false,
            0,
        );
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Strict);
    }

    #[test]
    fn test_strong_basis_needs_marker() {
        let strict = discursive_tier(
            &[DiscursiveBasis::CausalConnective],
            RelationType::Requires,
            &[ExtractionMethod::Pattern],
            true,
            1,
        );
        assert_eq!(strict.defensibility_tier, DefensibilityTier::Strict);

        let extended = discursive_tier(
            &[DiscursiveBasis::CausalConnective],
            RelationType::Requires,
            &[ExtractionMethod::Pattern],
            false,
            1,
        );
        assert_eq!(extended.defensibility_tier, DefensibilityTier::Extended);
        assert!(extended.abstain_reason.is_none());
        assert!(!extended.reason.is_empty());
    }

    #[test]
    fn test_weak_basis_needs_two_spans() {
        let strict = discursive_tier(
            &[DiscursiveBasis::Cooccurrence],
            RelationType::Requires,
            &[ExtractionMethod::Pattern],
            false,
            2,
        );
        assert_eq!(strict.defensibility_tier, DefensibilityTier::Strict);

        let extended = discursive_tier(
            &[DiscursiveBasis::Cooccurrence],
            RelationType::Requires,
            &[ExtractionMethod::Pattern],
            false,
            1,
        );
        assert_eq!(extended.defensibility_tier, DefensibilityTier::Extended);
    }

    #[test]
    fn test_llm_only_is_capped_regardless() {
        // Even a strong basis with marker and many spans stays Extended
        let decision = discursive_tier(
            &[DiscursiveBasis::CausalConnective],
            RelationType::Requires,
            &[ExtractionMethod::UnconstrainedLlm],
            true,
            5,
        );
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Extended);
        assert_eq!(decision.abstain_reason, Some(AbstainReason::Type2Risk));
    }

    #[test]
    fn test_llm_with_corroboration_is_not_capped() {
        let decision = discursive_tier(
            &[DiscursiveBasis::CausalConnective],
            RelationType::Requires,
            &[ExtractionMethod::UnconstrainedLlm, ExtractionMethod::Pattern],
            true,
            1,
        );
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Strict);
    }

    #[test]
    fn test_forbidden_type_for_discursive() {
        let decision = discursive_tier(
            &[DiscursiveBasis::CausalConnective],
            RelationType::Causes,
            &[ExtractionMethod::Pattern],
            true,
            5,
        );
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Extended);
        assert_eq!(
            decision.abstain_reason,
            Some(AbstainReason::WhitelistViolation)
        );
        assert!(decision.reason.contains("CAUSES"));
    }

    #[test]
    fn test_forbidden_type_checked_before_llm_cap() {
        // Both rules apply; the whitelist violation wins by table order
        let decision = discursive_tier(
            &[DiscursiveBasis::Cooccurrence],
            RelationType::Prevents,
            &[ExtractionMethod::UnconstrainedLlm],
            false,
            1,
        );
        assert_eq!(
            decision.abstain_reason,
            Some(AbstainReason::WhitelistViolation)
        );
    }

    #[test]
    fn test_gate_assertion_explicit() {
        let assertion = RawAssertion::new("c:a", "requires", "requires", "c:b", "doc-a", "ch-1");
        let decision = attributor().gate_assertion(&assertion);
        assert_eq!(decision.semantic_grade, SemanticGrade::Explicit);
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Strict);
    }

    #[test]
    fn test_gate_assertion_weak_discursive_is_extended() {
        // A single assertion is a single span; weak basis cannot reach Strict
        let assertion = RawAssertion::new("c:a", "requires", "requires", "c:b", "doc-a", "ch-1")
            .with_discursive(vec![DiscursiveBasis::Cooccurrence]);
        let decision = attributor().gate_assertion(&assertion);
        assert_eq!(decision.semantic_grade, SemanticGrade::Discursive);
        assert_eq!(decision.defensibility_tier, DefensibilityTier::Extended);
    }

    #[test]
    fn test_gate_assertion_infers_relation_type() {
        let assertion = RawAssertion::new("c:a", "may cause", "may cause", "c:b", "doc-a", "ch-1")
            .with_discursive(vec![DiscursiveBasis::CausalConnective]);
        let decision = attributor().gate_assertion(&assertion);
        assert_eq!(
            decision.abstain_reason,
            Some(AbstainReason::WhitelistViolation)
        );
    }
}
