//! Script (TypeScript/JavaScript) rule configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::report::Severity;

/// Configuration for the script validator.
///
/// The script validator always runs, so its configuration has compiled-in
/// defaults and never needs a file. An explicit file override that fails to
/// load is an error the caller must handle (there is no degraded mode for
/// the primary validator).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ScriptConfig {
    pub naming: NamingConfig,
    pub solid: SolidConfig,
    pub code_smells: CodeSmellsConfig,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            solid: SolidConfig::default(),
            code_smells: CodeSmellsConfig::default(),
        }
    }
}

impl ScriptConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = super::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check numeric thresholds. Zero would make every function and
    /// class a violation, which is always a configuration mistake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solid.max_function_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "solid.maxFunctionLines".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.solid.max_class_methods == 0 {
            return Err(ConfigError::InvalidValue {
                field: "solid.maxClassMethods".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.solid.max_parameters == 0 {
            return Err(ConfigError::InvalidValue {
                field: "solid.maxParameters".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

/// Naming-convention rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct NamingConfig {
    pub enabled: bool,
    pub severity: Severity,
    pub patterns: NamingPatterns,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            patterns: NamingPatterns::default(),
        }
    }
}

/// Convention labels echoed in violation messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct NamingPatterns {
    pub classes: String,
    pub functions: String,
    pub constants: String,
    pub variables: String,
}

impl Default for NamingPatterns {
    fn default() -> Self {
        Self {
            classes: "PascalCase".to_string(),
            functions: "camelCase".to_string(),
            constants: "UPPER_CASE".to_string(),
            variables: "camelCase".to_string(),
        }
    }
}

/// Structural threshold rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SolidConfig {
    pub enabled: bool,
    pub severity: Severity,
    pub max_function_lines: u32,
    pub max_class_methods: u32,
    pub max_parameters: u32,
}

impl Default for SolidConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            max_function_lines: 50,
            max_class_methods: 10,
            max_parameters: 5,
        }
    }
}

/// Code-smell rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CodeSmellsConfig {
    pub enabled: bool,
    pub severity: Severity,
    pub detect_duplication: bool,
    pub detect_long_methods: bool,
    pub detect_god_classes: bool,
    pub detect_dead_code: bool,
}

impl Default for CodeSmellsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            detect_duplication: true,
            detect_long_methods: true,
            detect_god_classes: true,
            detect_dead_code: true,
        }
    }
}
