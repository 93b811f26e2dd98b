//! Output formatting for the CLI.

use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use credence_consolidator::ValueConflict;
use credence_domain::{CanonicalRelation, SemanticRelation};

use crate::config::OutputFormat;
use crate::error::Result;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format canonical relations.
    pub fn format_relations(&self, relations: &[CanonicalRelation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(relations)?),
            OutputFormat::Table => Ok(self.format_relations_table(relations)),
            OutputFormat::Quiet => Ok(relations
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format semantic relations.
    pub fn format_semantic(&self, relations: &[SemanticRelation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(relations)?),
            OutputFormat::Table => Ok(self.format_semantic_table(relations)),
            OutputFormat::Quiet => Ok(relations
                .iter()
                .map(|r| r.canonical_relation_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format value conflicts.
    pub fn format_conflicts(&self, conflicts: &[ValueConflict]) -> Result<String> {
        if conflicts.is_empty() {
            return Ok(self.colorize("No value conflicts found.", "green"));
        }
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(conflicts)?),
            _ => {
                let lines: Vec<String> = conflicts
                    .iter()
                    .map(|c| {
                        format!(
                            "{} {} states {} vs {}",
                            c.subject_concept_id,
                            c.predicate_norm,
                            c.left_value.to_canonical(),
                            c.right_value.to_canonical()
                        )
                    })
                    .collect();
                Ok(self.colorize(&lines.join("\n"), "yellow"))
            }
        }
    }

    fn format_relations_table(&self, relations: &[CanonicalRelation]) -> String {
        if relations.is_empty() {
            return self.colorize("No relations produced.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "ID", "Subject", "Predicate", "Object", "Type", "Maturity", "Docs", "E/D", "Conf",
        ]);

        for relation in relations {
            let docs = relation.distinct_documents.to_string();
            let support = format!(
                "{}/{}",
                relation.explicit_support_count, relation.discursive_support_count
            );
            let confidence = format!("{:.2}", relation.confidence_mean);
            builder.push_record([
                &relation.id.as_str()[..8],
                relation.subject_concept_id.as_str(),
                relation.predicate_norm.as_str(),
                relation.object_concept_id.as_str(),
                relation.relation_type.as_str(),
                relation.maturity.as_str(),
                docs.as_str(),
                support.as_str(),
                confidence.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn format_semantic_table(&self, relations: &[SemanticRelation]) -> String {
        if relations.is_empty() {
            return self.colorize("No relations produced.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Relation", "Grade", "Tier", "Conf", "Reason"]);

        for relation in relations {
            let confidence = format!("{:.2}", relation.confidence);
            builder.push_record([
                &relation.canonical_relation_id.as_str()[..8],
                relation.semantic_grade.as_str(),
                relation.defensibility_tier.as_str(),
                confidence.as_str(),
                relation.reason.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
