//! Rule configuration - schemas, defaults, JSON loaders
//!
//! Every rule key the validators read is present in these schemas with an
//! explicit default, so evaluation never branches on missing configuration.
//! Unknown keys are rejected at load time, and numeric thresholds are
//! validated once when a file is loaded.

mod java;
mod script;
mod vue;

pub use java::{
    ArchitecturalRules, BehavioralRules, CreationalRules, EnterpriseRules, JavaConfig, JavaRule,
    JavaRules, ModernRules, StructuralRules, JAVA_CONFIG_FILE,
};
pub use script::{CodeSmellsConfig, NamingConfig, NamingPatterns, ScriptConfig, SolidConfig};
pub use vue::{
    AntiPatternsConfig, BestPracticesConfig, ComponentsConfig, ComposablesConfig, TemplateConfig,
    VueConfig, VueRule, VUE_CONFIG_FILE,
};

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::ConfigError;

/// Read and deserialize a JSON config file, mapping each failure stage to
/// its own error variant so callers can log the difference between a
/// missing file and a broken one.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
