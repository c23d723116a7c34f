//! Java pattern-rule configuration.
//!
//! One entry per rule in the catalog, grouped by category. The JSON dialect
//! uses camelCase rule keys (`factoryMethod`, `chainOfResponsibility`), the
//! same names the detection catalog exposes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::report::Severity;

/// Conventional file name for the Java rule configuration.
pub const JAVA_CONFIG_FILE: &str = "java-patterns.config.json";

/// Per-rule switch for the Java catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JavaRule {
    pub enabled: bool,
    pub severity: Severity,
    /// When set, the rule also reports anti-pattern notes alongside the
    /// detection (e.g. a non-final singleton instance field).
    pub detect_antipatterns: bool,
}

impl Default for JavaRule {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Info,
            detect_antipatterns: true,
        }
    }
}

/// Configuration for the Java validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JavaConfig {
    pub rules: JavaRules,
}

impl JavaConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        super::read_json(path)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JavaRules {
    pub creational: CreationalRules,
    pub structural: StructuralRules,
    pub behavioral: BehavioralRules,
    pub enterprise: EnterpriseRules,
    pub architectural: ArchitecturalRules,
    pub modern: ModernRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CreationalRules {
    pub singleton: JavaRule,
    pub builder: JavaRule,
    pub factory_method: JavaRule,
    pub abstract_factory: JavaRule,
    pub prototype: JavaRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct StructuralRules {
    pub adapter: JavaRule,
    pub decorator: JavaRule,
    pub facade: JavaRule,
    pub proxy: JavaRule,
    pub composite: JavaRule,
    pub bridge: JavaRule,
    pub flyweight: JavaRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct BehavioralRules {
    pub observer: JavaRule,
    pub strategy: JavaRule,
    pub template_method: JavaRule,
    pub command: JavaRule,
    pub state: JavaRule,
    pub iterator: JavaRule,
    pub chain_of_responsibility: JavaRule,
    pub mediator: JavaRule,
    pub memento: JavaRule,
    pub visitor: JavaRule,
    pub interpreter: JavaRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EnterpriseRules {
    pub dao: JavaRule,
    pub repository: JavaRule,
    pub dto: JavaRule,
    pub service_layer: JavaRule,
    pub value_object: JavaRule,
    pub data_mapper: JavaRule,
    pub active_record: JavaRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ArchitecturalRules {
    pub mvc: JavaRule,
    pub front_controller: JavaRule,
    pub service_locator: JavaRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ModernRules {
    pub dependency_injection: JavaRule,
    pub circuit_breaker: JavaRule,
    pub event_sourcing: JavaRule,
    pub cqrs: JavaRule,
}
