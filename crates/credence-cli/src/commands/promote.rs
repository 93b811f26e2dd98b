//! Promote command implementation - the full consolidate-then-grade pipeline.

use credence_attributor::TierAttributor;
use credence_consolidator::{ConsolidatorConfig, RelationConsolidator};
use credence_domain::{AssertionFilter, AssertionSource, DefensibilityTier, SemanticRelation};

use crate::batch::JsonBatchSource;
use crate::cli::PromoteArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the promote command.
pub fn execute_promote(args: PromoteArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let consolidator_config = match args.tenant {
        Some(tenant) => ConsolidatorConfig {
            tenant,
            ..config.consolidator.clone()
        },
        None => config.consolidator.clone(),
    };
    let consolidator = RelationConsolidator::new(consolidator_config)?;
    let attributor = TierAttributor::new();

    let source = JsonBatchSource::new(&args.input);
    let filter = AssertionFilter {
        subject_concept_id: args.subject,
        ..Default::default()
    };
    let batch = source.fetch(&filter)?;

    let result = consolidator.consolidate(&batch);
    let mut semantic: Vec<SemanticRelation> = result
        .relations
        .iter()
        .map(|relation| attributor.promote(relation))
        .collect();

    if args.strict_only {
        semantic.retain(|r| r.defensibility_tier == DefensibilityTier::Strict);
    }

    println!("{}", formatter.format_semantic(&semantic)?);
    if !result.skipped.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Skipped {} malformed assertion(s)",
                result.skipped.len()
            ))
        );
    }

    Ok(())
}
