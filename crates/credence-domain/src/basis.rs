//! Discursive basis taxonomy - rhetorical patterns behind inferred relations

use serde::{Deserialize, Serialize};

/// Rhetorical pattern that justified extracting a non-explicit relation
///
/// The taxonomy is fixed: tier attribution depends on its strong/weak split
/// and must stay reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscursiveBasis {
    /// Causal connective in the span ("therefore", "as a result")
    CausalConnective,

    /// Conditional construction ("if ... then", "unless")
    ConditionalConstruction,

    /// Definitional pattern ("X, i.e. Y", "X is defined as")
    DefinitionalPattern,

    /// Subject and object merely co-occur in the same span
    Cooccurrence,

    /// Subject and object appear in adjacent sections
    SectionProximity,

    /// Lexical overlap between the two concept mentions
    LexicalOverlap,

    /// One span paraphrases another
    Paraphrase,
}

impl DiscursiveBasis {
    /// Strength of this basis in the fixed taxonomy
    pub fn strength(&self) -> BasisStrength {
        match self {
            DiscursiveBasis::CausalConnective
            | DiscursiveBasis::ConditionalConstruction
            | DiscursiveBasis::DefinitionalPattern => BasisStrength::Strong,
            DiscursiveBasis::Cooccurrence
            | DiscursiveBasis::SectionProximity
            | DiscursiveBasis::LexicalOverlap
            | DiscursiveBasis::Paraphrase => BasisStrength::Weak,
        }
    }
}

/// Strength classification of a set of discursive bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasisStrength {
    /// At least one basis is a strong rhetorical signal
    Strong,

    /// Only weak signals (or no basis at all)
    Weak,
}

/// Classify a basis set: one strong tag makes the whole set strong
pub fn classify_bases<'a, I>(bases: I) -> BasisStrength
where
    I: IntoIterator<Item = &'a DiscursiveBasis>,
{
    if bases
        .into_iter()
        .any(|b| b.strength() == BasisStrength::Strong)
    {
        BasisStrength::Strong
    } else {
        BasisStrength::Weak
    }
}
