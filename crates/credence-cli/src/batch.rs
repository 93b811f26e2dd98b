//! File-backed assertion source for CLI pipelines.

use std::fs;
use std::path::{Path, PathBuf};

use credence_domain::{AssertionFilter, AssertionSource, RawAssertion};

use crate::error::CliError;

/// An [`AssertionSource`] reading a JSON array of raw assertions from disk.
pub struct JsonBatchSource {
    path: PathBuf,
}

impl JsonBatchSource {
    /// Create a source over the given batch file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl AssertionSource for JsonBatchSource {
    type Error = CliError;

    fn fetch(&self, filter: &AssertionFilter) -> Result<Vec<RawAssertion>, Self::Error> {
        let contents = fs::read_to_string(&self.path)?;
        let assertions: Vec<RawAssertion> = serde_json::from_str(&contents)?;

        let mut matched: Vec<RawAssertion> = assertions
            .into_iter()
            .filter(|a| {
                filter
                    .subject_concept_id
                    .as_ref()
                    .is_none_or(|s| &a.subject_concept_id == s)
                    && filter
                        .object_concept_id
                        .as_ref()
                        .is_none_or(|o| &a.object_concept_id == o)
                    && filter
                        .relation_type
                        .is_none_or(|t| a.relation_type == Some(t))
                    && filter
                        .source_doc_id
                        .as_ref()
                        .is_none_or(|d| &a.source_doc_id == d)
            })
            .collect();

        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_batch() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let batch = vec![
            RawAssertion::new("c:a", "requires", "requires", "c:b", "doc-a", "ch-1"),
            RawAssertion::new("c:x", "prevents", "prevents", "c:y", "doc-b", "ch-2"),
        ];
        write!(file, "{}", serde_json::to_string(&batch).unwrap()).unwrap();
        file
    }

    #[test]
    fn test_fetch_all() {
        let file = write_batch();
        let source = JsonBatchSource::new(file.path());
        let all = source.fetch(&AssertionFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_fetch_filtered_by_subject_and_doc() {
        let file = write_batch();
        let source = JsonBatchSource::new(file.path());

        let filter = AssertionFilter {
            subject_concept_id: Some("c:a".to_string()),
            ..Default::default()
        };
        let subset = source.fetch(&filter).unwrap();
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].source_doc_id, "doc-a");

        let filter = AssertionFilter {
            source_doc_id: Some("doc-z".to_string()),
            ..Default::default()
        };
        assert!(source.fetch(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_respects_limit() {
        let file = write_batch();
        let source = JsonBatchSource::new(file.path());
        let filter = AssertionFilter {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(source.fetch(&filter).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = JsonBatchSource::new(file.path());
        assert!(source.fetch(&AssertionFilter::default()).is_err());
    }
}
