//! motif-core: Structural pattern detection engine
//!
//! This crate provides the analysis components for Motif:
//! - Report: shared severity, location, violation and detection vocabulary
//! - Config: declarative JSON rule configuration with compiled-in defaults
//! - Script: TypeScript/JavaScript naming, threshold and code-smell rules
//! - Java: class-model extraction and a structural design-pattern catalog
//! - Vue: single-file component splitting, version inference and pattern rules
//! - Service: per-language dispatch over the three validators
//! - Logging: env-filtered tracing initialization
//! - Errors: configuration and service error taxonomy

pub mod report;
pub mod config;
pub mod script;
pub mod java;
pub mod vue;
pub mod service;
pub mod logging;
pub mod errors;

// Re-exports for convenience
pub use report::{Confidence, Location, Severity, Violation};
pub use config::{
    JavaConfig, JavaRule, ScriptConfig, VueConfig, VueRule, JAVA_CONFIG_FILE, VUE_CONFIG_FILE,
};
pub use script::{ScriptAst, ScriptParser, ScriptValidator};
pub use java::{
    ClassModel, JavaCategory, JavaDetection, JavaExtractor, JavaPattern, JavaValidator,
};
pub use vue::{
    extract_component, split, ComponentModel, ScriptBlock, SfcBlocks, StyleBlock, VueCategory,
    VueDetection, VuePattern, VueValidator, VueVersion,
};
pub use service::{
    java_patterns, vue_patterns, CatalogEntry, Language, PatternService, ValidationReport,
};
pub use logging::init_logging;
pub use errors::{ConfigError, ServiceError};
