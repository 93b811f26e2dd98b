//! Consolidate command implementation.

use credence_consolidator::{find_value_conflicts, ConsolidatorConfig, RelationConsolidator};
use credence_domain::{AssertionFilter, AssertionSource};

use crate::batch::JsonBatchSource;
use crate::cli::ConsolidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the consolidate command.
pub fn execute_consolidate(
    args: ConsolidateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let consolidator_config = match args.tenant {
        Some(tenant) => ConsolidatorConfig {
            tenant,
            ..config.consolidator.clone()
        },
        None => config.consolidator.clone(),
    };
    let consolidator = RelationConsolidator::new(consolidator_config)?;

    let source = JsonBatchSource::new(&args.input);
    let filter = AssertionFilter {
        subject_concept_id: args.subject,
        source_doc_id: args.doc,
        ..Default::default()
    };
    let batch = source.fetch(&filter)?;

    let result = consolidator.consolidate(&batch);

    println!("{}", formatter.format_relations(&result.relations)?);
    if !result.skipped.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Skipped {} malformed assertion(s)",
                result.skipped.len()
            ))
        );
    }

    if args.conflicts {
        let conflicts = find_value_conflicts(&result.relations, args.tolerance);
        println!("{}", formatter.format_conflicts(&conflicts)?);
    }

    Ok(())
}
