//! End-to-end tests: consolidation through promotion

use credence_attributor::TierAttributor;
use credence_consolidator::{ConsolidatorConfig, RelationConsolidator};
use credence_domain::{
    DefensibilityTier, DiscursiveBasis, ExtractionMethod, Maturity, RawAssertion, SemanticGrade,
};

#[test]
fn mixed_support_promotes_to_strict() {
    // 2 explicit supporters (docs A, B) + 1 weak discursive (doc C, 1 span)
    let batch = vec![
        RawAssertion::new("c:tls13", "requires", "requires", "c:cert", "doc-a", "chunk-1")
            .with_confidence(0.9, 0.85),
        RawAssertion::new("c:tls13", "requires", "requires", "c:cert", "doc-b", "chunk-4")
            .with_confidence(0.8, 0.8),
        RawAssertion::new("c:tls13", "requires", "requires", "c:cert", "doc-c", "chunk-2")
            .with_discursive(vec![DiscursiveBasis::Cooccurrence])
            .with_method(ExtractionMethod::Hybrid)
            .with_confidence(0.6, 0.6),
    ];

    let consolidator = RelationConsolidator::new(ConsolidatorConfig::for_tenant("acme")).unwrap();
    let result = consolidator.consolidate(&batch);
    assert_eq!(result.relations.len(), 1);

    let relation = &result.relations[0];
    assert_eq!(relation.explicit_support_count, 2);
    assert_eq!(relation.discursive_support_count, 1);
    assert_eq!(relation.maturity, Maturity::Validated);

    let semantic = TierAttributor::new().promote(relation);
    assert_eq!(semantic.canonical_relation_id, relation.id);
    assert_eq!(semantic.semantic_grade, SemanticGrade::Mixed);
    assert_eq!(semantic.defensibility_tier, DefensibilityTier::Strict);
    assert!(semantic.abstain_reason.is_none());
    assert_eq!(semantic.support_strength.explicit_count, 2);
    assert_eq!(semantic.support_strength.discursive_count, 1);
    assert_eq!(semantic.support_strength.doc_coverage, 3);
    assert!((semantic.support_strength.bundle_diversity - 1.0).abs() < 1e-9);
    assert!((semantic.confidence - 0.75).abs() < 1e-9);
}

#[test]
fn discursive_only_weak_single_span_stays_extended() {
    let batch = vec![RawAssertion::new(
        "c:cache", "related to", "related to", "c:latency", "doc-a", "chunk-1",
    )
    .with_discursive(vec![DiscursiveBasis::Cooccurrence])
    .with_method(ExtractionMethod::Pattern)];

    let consolidator = RelationConsolidator::new(ConsolidatorConfig::for_tenant("acme")).unwrap();
    let result = consolidator.consolidate(&batch);

    let semantic = TierAttributor::new().promote(&result.relations[0]);
    assert_eq!(semantic.semantic_grade, SemanticGrade::Discursive);
    assert_eq!(semantic.defensibility_tier, DefensibilityTier::Extended);
    assert!(!semantic.reason.is_empty());
}

#[test]
fn discursive_weak_basis_with_two_spans_promotes() {
    let batch = vec![
        RawAssertion::new("c:cache", "related to", "related to", "c:latency", "doc-a", "chunk-1")
            .with_discursive(vec![DiscursiveBasis::Cooccurrence]),
        RawAssertion::new("c:cache", "related to", "related to", "c:latency", "doc-b", "chunk-9")
            .with_discursive(vec![DiscursiveBasis::LexicalOverlap]),
    ];

    let consolidator = RelationConsolidator::new(ConsolidatorConfig::for_tenant("acme")).unwrap();
    let result = consolidator.consolidate(&batch);
    assert_eq!(result.relations[0].evidence.span_count, 2);

    let semantic = TierAttributor::new().promote(&result.relations[0]);
    assert_eq!(semantic.defensibility_tier, DefensibilityTier::Strict);
}

#[test]
fn llm_only_discursive_relation_is_capped() {
    let batch = vec![
        RawAssertion::new("c:queue", "linked to", "linked to", "c:backlog", "doc-a", "chunk-1")
            .with_discursive(vec![DiscursiveBasis::CausalConnective])
            .with_method(ExtractionMethod::UnconstrainedLlm),
        RawAssertion::new("c:queue", "linked to", "linked to", "c:backlog", "doc-b", "chunk-3")
            .with_discursive(vec![DiscursiveBasis::CausalConnective])
            .with_method(ExtractionMethod::UnconstrainedLlm),
    ];

    let consolidator = RelationConsolidator::new(ConsolidatorConfig::for_tenant("acme")).unwrap();
    let result = consolidator.consolidate(&batch);

    let semantic = TierAttributor::new().promote(&result.relations[0]);
    assert_eq!(semantic.defensibility_tier, DefensibilityTier::Extended);
    assert_eq!(
        semantic.abstain_reason,
        Some(credence_domain::AbstainReason::Type2Risk)
    );
}

#[test]
fn promotion_is_a_fresh_derivation() {
    let batch = vec![
        RawAssertion::new("c:a", "requires", "requires", "c:b", "doc-a", "chunk-1"),
        RawAssertion::new("c:a", "requires", "requires", "c:b", "doc-b", "chunk-2"),
    ];

    let consolidator = RelationConsolidator::new(ConsolidatorConfig::for_tenant("acme")).unwrap();
    let attributor = TierAttributor::new();

    let relation = &consolidator.consolidate(&batch).relations[0];
    let first = attributor.promote(relation);
    let second = attributor.promote(relation);
    assert_eq!(first, second);
}
