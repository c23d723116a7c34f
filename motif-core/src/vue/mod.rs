//! Vue single-file component validation.
//!
//! A regex-based splitter separates template, script, and style blocks, an
//! extraction pass builds a [`ComponentModel`] with an inferred target
//! version, then two catalogs run over the model: non-violating pattern
//! detections and version-aware violation rules. Reported line numbers are
//! local to the block they were found in.

mod extractor;
mod patterns;
mod practices;
mod sfc;
mod types;

pub use extractor::extract_component;
pub use sfc::{split, ScriptBlock, SfcBlocks, StyleBlock};
pub use types::{ComponentModel, VueCategory, VueDetection, VuePattern, VueVersion};

use crate::config::VueConfig;
use crate::report::{Location, Severity, Violation};

/// Validates Vue single-file components against the pattern catalog.
pub struct VueValidator {
    config: VueConfig,
}

impl VueValidator {
    pub fn new(config: VueConfig) -> Self {
        Self { config }
    }

    /// Splits, extracts, and evaluates one component.
    ///
    /// A source with no template and no script yields a single sentinel
    /// violation and nothing else.
    pub fn validate(&self, source: &str, filename: &str) -> (Vec<VueDetection>, Vec<Violation>) {
        let Some(blocks) = sfc::split(source) else {
            let sentinel = Violation::new(
                "parse-error",
                "parser",
                Severity::Error,
                "Failed to parse Vue component: no template or script block found",
                Location::default().with_file(filename),
            )
            .with_suggestion("Check the file for syntax errors");
            return (Vec::new(), vec![sentinel]);
        };
        let model = extract_component(blocks, filename);

        let mut detections = Vec::new();
        if self.config.composables.enabled {
            detections.extend(patterns::detect_composable_functions(&model));
        }
        if self.config.components.enabled {
            detections.extend(patterns::detect_smart_dumb(&model));
            detections.extend(patterns::detect_scoped_slots(&model));
            detections.extend(patterns::detect_renderless(&model));
        }
        // options-API structure reports are version findings, not opt-outs
        if model.uses_options_api && model.version == VueVersion::V2 {
            detections.extend(patterns::detect_options_api_structure(&model));
            detections.extend(patterns::detect_mixin_usage(&model));
            detections.extend(patterns::detect_filter_usage(&model));
            detections.extend(patterns::detect_watch_pattern(&model));
        }

        let mut violations = Vec::new();
        if self.config.anti_patterns.enabled {
            practices::check_anti_patterns(&model, &self.config, &mut violations);
        }
        if self.config.best_practices.enabled {
            practices::check_best_practices(&model, &self.config, &mut violations);
        }
        if self.config.template.enabled {
            practices::check_template(&model, &self.config, &mut violations);
        }

        for detection in &mut detections {
            detection.location.file = Some(filename.to_string());
        }
        for violation in &mut violations {
            violation.location.file = Some(filename.to_string());
        }

        tracing::debug!(
            component = %model.name,
            version = %model.version,
            detections = detections.len(),
            violations = violations.len(),
            "vue validation finished"
        );

        (detections, violations)
    }
}

impl Default for VueValidator {
    fn default() -> Self {
        Self::new(VueConfig::default())
    }
}
