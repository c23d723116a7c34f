//! Vue pattern-rule configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::report::Severity;

/// Conventional file name for the Vue rule configuration.
pub const VUE_CONFIG_FILE: &str = "vue-patterns.config.json";

/// Per-rule switch for Vue violation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct VueRule {
    pub enabled: bool,
    pub severity: Severity,
}

impl VueRule {
    fn new(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }
}

impl Default for VueRule {
    fn default() -> Self {
        Self::new(Severity::Warning)
    }
}

/// Configuration for the Vue validator.
///
/// Detection groups (`composables`, `components`) gate the non-violating
/// pattern reports; the remaining groups hold one entry per violation rule.
/// Options-API structure detections are gated by the inferred component
/// version, not by configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct VueConfig {
    pub composables: ComposablesConfig,
    pub components: ComponentsConfig,
    pub anti_patterns: AntiPatternsConfig,
    pub best_practices: BestPracticesConfig,
    pub template: TemplateConfig,
}

impl VueConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = super::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.components.max_component_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "components.maxComponentSize".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

/// Gates composable-function detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ComposablesConfig {
    pub enabled: bool,
}

impl Default for ComposablesConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Gates component-shape detections and carries the god-component threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ComponentsConfig {
    pub enabled: bool,
    pub max_component_size: u32,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_component_size: 300,
        }
    }
}

/// Anti-pattern violation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AntiPatternsConfig {
    pub enabled: bool,
    pub mixins: VueRule,
    pub v_if_with_v_for: VueRule,
    pub prop_mutation: VueRule,
    pub parent_access: VueRule,
    pub god_component: VueRule,
    pub filter_deprecated: VueRule,
}

impl Default for AntiPatternsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mixins: VueRule::new(Severity::Warning),
            v_if_with_v_for: VueRule::new(Severity::Warning),
            prop_mutation: VueRule::new(Severity::Error),
            parent_access: VueRule::new(Severity::Warning),
            god_component: VueRule::new(Severity::Warning),
            filter_deprecated: VueRule::new(Severity::Warning),
        }
    }
}

/// Best-practice violation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct BestPracticesConfig {
    pub enabled: bool,
    pub prop_validation: VueRule,
    pub event_naming: VueRule,
    pub script_setup: VueRule,
}

impl Default for BestPracticesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prop_validation: VueRule::new(Severity::Info),
            event_naming: VueRule::new(Severity::Info),
            script_setup: VueRule::new(Severity::Info),
        }
    }
}

/// Template violation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TemplateConfig {
    pub enabled: bool,
    pub v_for_key: VueRule,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            v_for_key: VueRule::new(Severity::Warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_rule() {
        let config = VueConfig::default();
        assert!(config.composables.enabled);
        assert_eq!(config.components.max_component_size, 300);
        assert_eq!(config.anti_patterns.prop_mutation.severity, Severity::Error);
        assert_eq!(config.best_practices.event_naming.severity, Severity::Info);
        assert_eq!(config.template.v_for_key.severity, Severity::Warning);
    }

    #[test]
    fn partial_group_keeps_sibling_rules() {
        let raw = r#"{ "antiPatterns": { "mixins": { "enabled": false, "severity": "error" } } }"#;
        let config: VueConfig = serde_json::from_str(raw).unwrap();
        assert!(!config.anti_patterns.mixins.enabled);
        assert_eq!(config.anti_patterns.mixins.severity, Severity::Error);
        assert_eq!(config.anti_patterns.prop_mutation.severity, Severity::Error);
        assert!(config.anti_patterns.v_if_with_v_for.enabled);
    }

    #[test]
    fn zero_component_size_fails_validation() {
        let raw = r#"{ "components": { "maxComponentSize": 0 } }"#;
        let config: VueConfig = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unknown_group_is_rejected() {
        let raw = r#"{ "lifecycle": { "enabled": true } }"#;
        assert!(serde_json::from_str::<VueConfig>(raw).is_err());
    }
}
