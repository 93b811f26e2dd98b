//! Configuration for the RelationConsolidator

use serde::{Deserialize, Serialize};

/// Configuration for a consolidation run
///
/// Constructed per call context and passed in explicitly; there is no
/// global consolidator state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatorConfig {
    /// Tenant identifier, part of every canonical relation id
    pub tenant: String,

    /// Maturity is AmbiguousType when the mean type confidence and the mean
    /// runner-up confidence differ by less than this margin
    pub ambiguity_margin: f64,

    /// Maturity is ContextDependent when the conditional fraction of the
    /// group exceeds this threshold
    pub conditional_fraction: f64,

    /// Minimum distinct documents for Validated maturity
    pub validated_min_documents: usize,

    /// Raw predicate strings kept in the predicate profile
    pub profile_size: usize,
}

impl Default for ConsolidatorConfig {
    /// Default thresholds with a placeholder tenant
    fn default() -> Self {
        Self {
            tenant: "default".to_string(),
            ambiguity_margin: 0.15,
            conditional_fraction: 0.70,
            validated_min_documents: 2,
            profile_size: 5,
        }
    }
}

impl ConsolidatorConfig {
    /// Create a configuration for the given tenant with default thresholds
    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            ..Self::default()
        }
    }

    /// Strict preset: harder to validate, quicker to flag ambiguity
    pub fn strict() -> Self {
        Self {
            ambiguity_margin: 0.25,
            conditional_fraction: 0.50,
            validated_min_documents: 3,
            ..Self::default()
        }
    }

    /// Lenient preset: single-document corpora still produce useful labels
    pub fn lenient() -> Self {
        Self {
            ambiguity_margin: 0.10,
            conditional_fraction: 0.90,
            validated_min_documents: 2,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tenant.is_empty() {
            return Err("tenant must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.ambiguity_margin) {
            return Err("ambiguity_margin must be in [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.conditional_fraction) {
            return Err("conditional_fraction must be in [0.0, 1.0]".to_string());
        }
        if self.validated_min_documents < 2 {
            return Err("validated_min_documents must be at least 2".to_string());
        }
        if self.profile_size == 0 {
            return Err("profile_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConsolidatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ConsolidatorConfig::strict().validate().is_ok());
        assert!(ConsolidatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_margin() {
        let mut config = ConsolidatorConfig::default();
        config.ambiguity_margin = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validated_needs_two_documents() {
        // A single document can never independently validate a relation
        let mut config = ConsolidatorConfig::default();
        config.validated_min_documents = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_tenant_rejected() {
        let mut config = ConsolidatorConfig::default();
        config.tenant.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConsolidatorConfig::for_tenant("acme");
        let toml_str = config.to_toml().unwrap();
        let parsed = ConsolidatorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.tenant, "acme");
        assert_eq!(parsed.ambiguity_margin, config.ambiguity_margin);
        assert_eq!(parsed.validated_min_documents, config.validated_min_documents);
    }
}
