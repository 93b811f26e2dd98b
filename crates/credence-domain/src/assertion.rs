//! Raw assertion records - the immutable input of the trust layer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basis::DiscursiveBasis;
use crate::relation_type::RelationType;

/// Unique identifier for a raw assertion based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - No coordination required between distributed extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssertionId(u128);

impl AssertionId {
    /// Generate a new UUIDv7-based AssertionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AssertionId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an AssertionId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for AssertionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssertionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// How an assertion's relation was linguistically expressed in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssertionKind {
    /// The relation is stated directly in the text
    Explicit,

    /// The relation is inferred from rhetorical structure
    Discursive,
}

impl AssertionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::Explicit => "EXPLICIT",
            AssertionKind::Discursive => "DISCURSIVE",
        }
    }

    /// Parse a kind from an upstream string
    ///
    /// Callers at the ingestion boundary treat `None` as Explicit so that
    /// records with an absent or unrecognized kind are counted, not dropped.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EXPLICIT" => Some(AssertionKind::Explicit),
            "DISCURSIVE" => Some(AssertionKind::Discursive),
            _ => None,
        }
    }
}

impl Default for AssertionKind {
    fn default() -> Self {
        AssertionKind::Explicit
    }
}

/// Extraction machinery that produced an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionMethod {
    /// Deterministic lexical/syntactic pattern
    Pattern,

    /// LLM constrained by a schema or grammar
    ConstrainedLlm,

    /// Free-form LLM output, no structural corroboration
    UnconstrainedLlm,

    /// Pattern candidate confirmed or refined by an LLM
    Hybrid,
}

impl ExtractionMethod {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Pattern => "PATTERN",
            ExtractionMethod::ConstrainedLlm => "CONSTRAINED_LLM",
            ExtractionMethod::UnconstrainedLlm => "UNCONSTRAINED_LLM",
            ExtractionMethod::Hybrid => "HYBRID",
        }
    }
}

/// A raw assertion - one extracted subject-predicate-object claim
///
/// Raw assertions are immutable and append-only; they are produced by the
/// upstream extraction pipeline and consumed here as-is. Consolidation never
/// mutates them, it only aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssertion {
    /// Unique identifier assigned at extraction time
    pub id: AssertionId,

    /// Subject concept identifier
    pub subject_concept_id: String,

    /// Object concept identifier
    pub object_concept_id: String,

    /// Predicate exactly as extracted
    pub predicate_raw: String,

    /// Normalized predicate used for grouping
    pub predicate_norm: String,

    /// Relation type, when the extractor classified one
    #[serde(default)]
    pub relation_type: Option<RelationType>,

    /// How the relation was expressed (absent upstream defaults to Explicit)
    #[serde(default)]
    pub kind: AssertionKind,

    /// Rhetorical basis tags, only meaningful when kind is Discursive
    #[serde(default)]
    pub discursive_basis: Vec<DiscursiveBasis>,

    /// Extraction machinery that produced this record
    pub extraction_method: ExtractionMethod,

    /// Whether a discursive marker is present verbatim in the source span
    #[serde(default)]
    pub has_marker_in_text: bool,

    /// Source document identifier
    pub source_doc_id: String,

    /// Source chunk identifier within the document
    pub source_chunk_id: String,

    /// Source segment (section) identifier, when known
    #[serde(default)]
    pub source_segment_id: Option<String>,

    /// Confidence in the assigned relation type [0.0, 1.0]
    pub type_confidence: f64,

    /// Confidence in the runner-up relation type, when one was scored
    #[serde(default)]
    pub alt_type_confidence: Option<f64>,

    /// Raw extractor confidence [0.0, 1.0]
    pub confidence_extractor: f64,

    /// Final calibrated confidence [0.0, 1.0]
    pub confidence_final: f64,

    /// Whether the assertion only holds under stated conditions
    #[serde(default)]
    pub is_conditional: bool,

    /// Version of the extractor that produced this record
    pub extractor_version: String,

    /// When this assertion was created (Unix milliseconds)
    pub created_at: u64,
}

impl RawAssertion {
    /// Create a minimal explicit assertion; optional metadata is attached
    /// with the `with_*` builders.
    pub fn new(
        subject_concept_id: impl Into<String>,
        predicate_raw: impl Into<String>,
        predicate_norm: impl Into<String>,
        object_concept_id: impl Into<String>,
        source_doc_id: impl Into<String>,
        source_chunk_id: impl Into<String>,
    ) -> Self {
        Self {
            id: AssertionId::new(),
            subject_concept_id: subject_concept_id.into(),
            object_concept_id: object_concept_id.into(),
            predicate_raw: predicate_raw.into(),
            predicate_norm: predicate_norm.into(),
            relation_type: None,
            kind: AssertionKind::Explicit,
            discursive_basis: Vec::new(),
            extraction_method: ExtractionMethod::Pattern,
            has_marker_in_text: false,
            source_doc_id: source_doc_id.into(),
            source_chunk_id: source_chunk_id.into(),
            source_segment_id: None,
            type_confidence: 1.0,
            alt_type_confidence: None,
            confidence_extractor: 1.0,
            confidence_final: 1.0,
            is_conditional: false,
            extractor_version: String::new(),
            created_at: 0,
        }
    }

    /// Mark the assertion as discursive with its basis tags
    pub fn with_discursive(mut self, basis: Vec<DiscursiveBasis>) -> Self {
        self.kind = AssertionKind::Discursive;
        self.discursive_basis = basis;
        self
    }

    /// Set the extraction method
    pub fn with_method(mut self, method: ExtractionMethod) -> Self {
        self.extraction_method = method;
        self
    }

    /// Set the explicit relation type classified by the extractor
    pub fn with_relation_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = Some(relation_type);
        self
    }

    /// Set the section identifier
    pub fn with_segment(mut self, segment_id: impl Into<String>) -> Self {
        self.source_segment_id = Some(segment_id.into());
        self
    }

    /// Set both confidence scores
    pub fn with_confidence(mut self, extractor: f64, fin: f64) -> Self {
        self.confidence_extractor = extractor;
        self.confidence_final = fin;
        self
    }

    /// Validate that the assertion carries everything consolidation needs
    ///
    /// Records that fail this check are skipped with a warning, never fatal.
    pub fn validate(&self) -> Result<(), String> {
        if self.subject_concept_id.is_empty() {
            return Err("subject_concept_id is empty".to_string());
        }
        if self.object_concept_id.is_empty() {
            return Err("object_concept_id is empty".to_string());
        }
        if self.predicate_norm.is_empty() {
            return Err("predicate_norm is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence_final) {
            return Err(format!(
                "confidence_final {} out of range [0.0, 1.0]",
                self.confidence_final
            ));
        }
        Ok(())
    }
}
