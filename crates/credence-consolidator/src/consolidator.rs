//! Consolidation of raw assertion batches into canonical relations

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rayon::prelude::*;
use tracing::{debug, warn};

use credence_domain::{
    canonical_relation_id, AssertionKind, CanonicalRelation, DiscursiveEvidence, Maturity,
    RawAssertion, RelationStatus, RelationType,
};

use crate::config::ConsolidatorConfig;
use crate::error::ConsolidatorError;
use crate::types::{ConsolidationResult, SkippedAssertion};

/// The RelationConsolidator turns an assertion batch into canonical relations
///
/// A pure, stateless transform: the same batch always produces the same
/// relations with the same ids, regardless of input order. Persistence of
/// the output belongs to an external collaborator.
pub struct RelationConsolidator {
    config: ConsolidatorConfig,
}

impl RelationConsolidator {
    /// Create a consolidator with a validated configuration
    pub fn new(config: ConsolidatorConfig) -> Result<Self, ConsolidatorError> {
        config.validate().map_err(ConsolidatorError::Config)?;
        Ok(Self { config })
    }

    /// Create a consolidator with default configuration
    pub fn default_config() -> Self {
        Self {
            config: ConsolidatorConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ConsolidatorConfig {
        &self.config
    }

    /// Consolidate a batch of raw assertions into canonical relations
    ///
    /// Groups by (subject, object, predicate_norm) - deliberately finer than
    /// relation_type, which may be absent - then aggregates each group
    /// independently. Assertions missing subject/object/predicate_norm are
    /// skipped with a warning, never fatal; an empty batch yields an empty
    /// result.
    pub fn consolidate(&self, batch: &[RawAssertion]) -> ConsolidationResult {
        let mut groups: BTreeMap<(String, String, String), Vec<&RawAssertion>> = BTreeMap::new();
        let mut skipped = Vec::new();

        for (index, assertion) in batch.iter().enumerate() {
            match assertion.validate() {
                Ok(()) => {
                    let key = (
                        assertion.subject_concept_id.clone(),
                        assertion.object_concept_id.clone(),
                        assertion.predicate_norm.clone(),
                    );
                    groups.entry(key).or_default().push(assertion);
                }
                Err(reason) => {
                    warn!(index, %reason, "skipping malformed assertion");
                    skipped.push(SkippedAssertion {
                        index,
                        assertion_id: assertion.id,
                        reason,
                    });
                }
            }
        }

        // Per-group aggregation has no cross-group dependency; shard it and
        // concatenate. BTreeMap ordering keeps the output deterministic.
        let groups: Vec<Vec<&RawAssertion>> = groups.into_values().collect();
        let relations: Vec<CanonicalRelation> = groups
            .into_par_iter()
            .map(|group| self.aggregate_group(&group))
            .collect();

        debug!(
            relations = relations.len(),
            skipped = skipped.len(),
            "consolidation complete"
        );

        ConsolidationResult { relations, skipped }
    }

    /// Aggregate one non-empty group into its canonical relation
    fn aggregate_group(&self, group: &[&RawAssertion]) -> CanonicalRelation {
        let first = group[0];

        let mut documents = BTreeSet::new();
        let mut chunks = BTreeSet::new();
        let mut sections = BTreeSet::new();
        let mut extractor_versions = BTreeSet::new();
        let mut explicit_support_count = 0;
        let mut discursive_support_count = 0;
        let mut confidences = Vec::with_capacity(group.len());
        let mut first_seen = u64::MAX;
        let mut last_seen = 0;

        for assertion in group {
            documents.insert(assertion.source_doc_id.as_str());
            chunks.insert(assertion.source_chunk_id.as_str());
            if let Some(segment) = assertion.source_segment_id.as_deref() {
                if !segment.is_empty() {
                    sections.insert(segment);
                }
            }
            if !assertion.extractor_version.is_empty() {
                extractor_versions.insert(assertion.extractor_version.clone());
            }
            match assertion.kind {
                AssertionKind::Explicit => explicit_support_count += 1,
                AssertionKind::Discursive => discursive_support_count += 1,
            }
            confidences.push(assertion.confidence_final);
            first_seen = first_seen.min(assertion.created_at);
            last_seen = last_seen.max(assertion.created_at);
        }

        CanonicalRelation {
            id: canonical_relation_id(
                &self.config.tenant,
                &first.subject_concept_id,
                &first.predicate_norm,
                &first.object_concept_id,
            ),
            subject_concept_id: first.subject_concept_id.clone(),
            object_concept_id: first.object_concept_id.clone(),
            predicate_norm: first.predicate_norm.clone(),
            relation_type: infer_relation_type(group),
            maturity: self.compute_maturity(group, documents.len()),
            predicate_profile: build_predicate_profile(group, self.config.profile_size),
            distinct_documents: documents.len(),
            distinct_chunks: chunks.len(),
            distinct_sections: sections.len(),
            total_assertions: group.len(),
            explicit_support_count,
            discursive_support_count,
            confidence_mean: mean(&confidences),
            confidence_p50: median(&mut confidences.clone()),
            first_seen,
            last_seen,
            extractor_versions: extractor_versions.into_iter().collect(),
            status: RelationStatus::Active,
            evidence: collect_discursive_evidence(group),
        }
    }

    /// Compute the maturity label for a group
    ///
    /// Rules are evaluated in priority order and the first match wins; a
    /// group that is both ambiguous and multi-document is AmbiguousType.
    fn compute_maturity(&self, group: &[&RawAssertion], distinct_documents: usize) -> Maturity {
        let alt_confidences: Vec<f64> = group
            .iter()
            .filter_map(|a| a.alt_type_confidence)
            .collect();
        if !alt_confidences.is_empty() {
            let type_mean = mean(
                &group
                    .iter()
                    .map(|a| a.type_confidence)
                    .collect::<Vec<_>>(),
            );
            if (type_mean - mean(&alt_confidences)).abs() < self.config.ambiguity_margin {
                return Maturity::AmbiguousType;
            }
        }

        let conditional = group.iter().filter(|a| a.is_conditional).count();
        if conditional as f64 / group.len() as f64 > self.config.conditional_fraction {
            return Maturity::ContextDependent;
        }

        if distinct_documents >= self.config.validated_min_documents {
            return Maturity::Validated;
        }

        Maturity::Candidate
    }
}

/// Infer the relation type for a group
///
/// Prefers any member's explicit classification, then the ordered keyword
/// table, then the AssociatedWith fallback - consolidation always produces
/// a type.
fn infer_relation_type(group: &[&RawAssertion]) -> RelationType {
    group
        .iter()
        .find_map(|a| a.relation_type)
        .unwrap_or_else(|| RelationType::infer_from_predicate(&group[0].predicate_norm))
}

/// Keep the most frequent raw predicate strings, ties broken
/// lexicographically so re-runs emit identical profiles
fn build_predicate_profile(group: &[&RawAssertion], profile_size: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for assertion in group {
        if !assertion.predicate_raw.is_empty() {
            *counts.entry(assertion.predicate_raw.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(profile_size)
        .map(|(predicate, _)| predicate.to_string())
        .collect()
}

/// Summarize the discursive evidence tier attribution consumes
fn collect_discursive_evidence(group: &[&RawAssertion]) -> DiscursiveEvidence {
    let mut evidence = DiscursiveEvidence::default();
    let mut spans = BTreeSet::new();

    for assertion in group {
        evidence.methods.insert(assertion.extraction_method);
        if assertion.kind != AssertionKind::Discursive {
            continue;
        }
        evidence.bases.extend(assertion.discursive_basis.iter().copied());
        if assertion.has_marker_in_text {
            evidence.has_marker_in_text = true;
        }
        spans.insert((
            assertion.source_doc_id.as_str(),
            assertion.source_chunk_id.as_str(),
            assertion.source_segment_id.as_deref().unwrap_or(""),
        ));
    }

    evidence.span_count = spans.len();
    evidence
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::ExtractionMethod;

    fn assertion(subject: &str, predicate: &str, object: &str, doc: &str) -> RawAssertion {
        let mut a = RawAssertion::new(subject, predicate, predicate, object, doc, "chunk-1");
        a.extractor_version = "ex-1.0".to_string();
        a.created_at = 1_700_000_000_000;
        a
    }

    #[test]
    fn test_empty_batch_yields_empty_result() {
        let consolidator = RelationConsolidator::default_config();
        let result = consolidator.consolidate(&[]);
        assert!(result.relations.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_grouping_key_is_subject_object_predicate() {
        let consolidator = RelationConsolidator::default_config();
        let batch = vec![
            assertion("c:tls", "requires", "c:cert", "doc-a"),
            assertion("c:tls", "requires", "c:cert", "doc-b"),
            assertion("c:tls", "requires", "c:key", "doc-a"),
        ];

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations.len(), 2);

        let merged = result
            .relations
            .iter()
            .find(|r| r.object_concept_id == "c:cert")
            .unwrap();
        assert_eq!(merged.total_assertions, 2);
        assert_eq!(merged.distinct_documents, 2);
    }

    #[test]
    fn test_malformed_assertions_skipped_not_fatal() {
        let consolidator = RelationConsolidator::default_config();
        let mut bad = assertion("c:tls", "requires", "c:cert", "doc-a");
        bad.subject_concept_id.clear();
        let batch = vec![bad, assertion("c:tls", "requires", "c:cert", "doc-a")];

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].index, 0);
        assert!(result.skipped[0].reason.contains("subject"));
    }

    #[test]
    fn test_maturity_validated_needs_two_documents() {
        let consolidator = RelationConsolidator::default_config();

        let single_doc = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-a"),
        ];
        let result = consolidator.consolidate(&single_doc);
        assert_eq!(result.relations[0].maturity, Maturity::Candidate);

        let two_docs = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-b"),
        ];
        let result = consolidator.consolidate(&two_docs);
        assert_eq!(result.relations[0].maturity, Maturity::Validated);
    }

    #[test]
    fn test_maturity_ambiguity_wins_over_validation() {
        let consolidator = RelationConsolidator::default_config();
        let mut batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-b"),
        ];
        for a in &mut batch {
            a.type_confidence = 0.55;
            a.alt_type_confidence = Some(0.50);
        }

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations[0].maturity, Maturity::AmbiguousType);
    }

    #[test]
    fn test_maturity_context_dependent() {
        let consolidator = RelationConsolidator::default_config();
        let mut batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-b"),
            assertion("c:a", "requires", "c:b", "doc-c"),
        ];
        for a in &mut batch {
            a.is_conditional = true;
        }

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations[0].maturity, Maturity::ContextDependent);
    }

    #[test]
    fn test_conditional_fraction_is_strictly_greater() {
        // Exactly at the threshold must not trigger ContextDependent
        let mut config = ConsolidatorConfig::default();
        config.conditional_fraction = 0.5;
        let consolidator = RelationConsolidator::new(config).unwrap();

        let mut batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-b"),
        ];
        batch[0].is_conditional = true;

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations[0].maturity, Maturity::Validated);
    }

    #[test]
    fn test_predicate_profile_ranked_and_capped() {
        let consolidator = RelationConsolidator::default_config();
        let mut batch = Vec::new();
        for raw in ["needs", "needs", "requires", "depends upon", "mandates", "demands", "calls for"] {
            let mut a = assertion("c:a", "requires", "c:b", "doc-a");
            a.predicate_raw = raw.to_string();
            batch.push(a);
        }

        let result = consolidator.consolidate(&batch);
        let profile = &result.relations[0].predicate_profile;
        assert_eq!(profile.len(), 5);
        assert_eq!(profile[0], "needs");
        // Singletons rank lexicographically for deterministic re-runs
        assert_eq!(profile[1], "calls for");
    }

    #[test]
    fn test_relation_type_prefers_explicit_member() {
        let consolidator = RelationConsolidator::default_config();
        let batch = vec![
            assertion("c:a", "linked with", "c:b", "doc-a"),
            assertion("c:a", "linked with", "c:b", "doc-b")
                .with_relation_type(RelationType::DependsOn),
        ];

        let result = consolidator.consolidate(&batch);
        assert_eq!(result.relations[0].relation_type, RelationType::DependsOn);
    }

    #[test]
    fn test_relation_type_keyword_fallbacks() {
        let consolidator = RelationConsolidator::default_config();

        let keyword = consolidator.consolidate(&[assertion("c:a", "may cause", "c:b", "doc-a")]);
        assert_eq!(keyword.relations[0].relation_type, RelationType::Causes);

        let fallback = consolidator.consolidate(&[assertion("c:a", "seen near", "c:b", "doc-a")]);
        assert_eq!(
            fallback.relations[0].relation_type,
            RelationType::AssociatedWith
        );
    }

    #[test]
    fn test_counters_and_confidence() {
        let consolidator = RelationConsolidator::default_config();
        let batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a").with_confidence(0.9, 0.8),
            assertion("c:a", "requires", "c:b", "doc-b")
                .with_confidence(0.7, 0.6)
                .with_discursive(vec![credence_domain::DiscursiveBasis::Cooccurrence]),
            assertion("c:a", "requires", "c:b", "doc-b")
                .with_segment("sec-2")
                .with_confidence(0.8, 0.7),
        ];

        let result = consolidator.consolidate(&batch);
        let relation = &result.relations[0];
        assert_eq!(relation.explicit_support_count, 2);
        assert_eq!(relation.discursive_support_count, 1);
        assert_eq!(relation.distinct_documents, 2);
        assert_eq!(relation.distinct_sections, 1);
        assert!((relation.confidence_mean - 0.7).abs() < 1e-9);
        assert!((relation.confidence_p50 - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_discursive_evidence_aggregation() {
        let consolidator = RelationConsolidator::default_config();
        let mut discursive = assertion("c:a", "requires", "c:b", "doc-b")
            .with_discursive(vec![credence_domain::DiscursiveBasis::CausalConnective])
            .with_method(ExtractionMethod::Hybrid);
        discursive.has_marker_in_text = true;

        let batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            discursive,
        ];

        let result = consolidator.consolidate(&batch);
        let evidence = &result.relations[0].evidence;
        assert!(evidence.has_marker_in_text);
        assert_eq!(evidence.span_count, 1);
        assert!(evidence
            .bases
            .contains(&credence_domain::DiscursiveBasis::CausalConnective));
        assert!(evidence.methods.contains(&ExtractionMethod::Pattern));
        assert!(evidence.methods.contains(&ExtractionMethod::Hybrid));
    }

    #[test]
    fn test_idempotent_ids_and_counters() {
        let consolidator = RelationConsolidator::default_config();
        let batch = vec![
            assertion("c:a", "requires", "c:b", "doc-a"),
            assertion("c:a", "requires", "c:b", "doc-b"),
            assertion("c:x", "prevents", "c:y", "doc-a"),
        ];

        let first = consolidator.consolidate(&batch);
        let second = consolidator.consolidate(&batch);
        assert_eq!(first.relations, second.relations);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ConsolidatorConfig::default();
        config.profile_size = 0;
        assert!(RelationConsolidator::new(config).is_err());
    }
}
