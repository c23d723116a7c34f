//! Vue component model and the detection catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::{Confidence, Location};

use super::sfc::{ScriptBlock, StyleBlock};

/// Framework major version inferred from structural signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VueVersion {
    #[serde(rename = "2")]
    V2,
    #[serde(rename = "3")]
    V3,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl VueVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            VueVersion::V2 => "2",
            VueVersion::V3 => "3",
            VueVersion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VueVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything extracted from one single-file component.
///
/// Name lists keep first-occurrence order and are deduplicated. The model is
/// built fresh per validation call and read-only for every rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentModel {
    pub name: String,
    pub version: VueVersion,
    pub is_script_setup: bool,
    pub has_typescript: bool,
    pub uses_options_api: bool,
    pub uses_composition_api: bool,
    /// Module paths of import statements.
    pub imports: Vec<String>,
    /// Composable functions declared in the script.
    pub composables: Vec<String>,
    pub props: Vec<String>,
    pub emits: Vec<String>,
    /// Call sites of use-prefixed composables.
    pub composable_calls: Vec<String>,
    pub mixins: Vec<String>,
    pub filters: Vec<String>,
    /// Keys of the object returned by the options-API `data()` function.
    pub data: Vec<String>,
    pub methods: Vec<String>,
    pub computed: Vec<String>,
    pub watchers: Vec<String>,
    pub template: Option<String>,
    pub script: Option<ScriptBlock>,
    pub script_setup: Option<ScriptBlock>,
    pub styles: Vec<StyleBlock>,
}

impl ComponentModel {
    /// The script text rules scan: the setup block when present, the plain
    /// script otherwise.
    pub fn active_script(&self) -> &str {
        self.script_setup
            .as_ref()
            .or(self.script.as_ref())
            .map(|block| block.content.as_str())
            .unwrap_or("")
    }

    pub fn plain_script(&self) -> &str {
        self.script
            .as_ref()
            .map(|block| block.content.as_str())
            .unwrap_or("")
    }
}

/// Families for the non-violating detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VueCategory {
    #[serde(rename = "composables")]
    Composables,
    #[serde(rename = "components")]
    Components,
    #[serde(rename = "optionsAPI")]
    OptionsApi,
}

impl VueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VueCategory::Composables => "composables",
            VueCategory::Components => "components",
            VueCategory::OptionsApi => "optionsAPI",
        }
    }
}

impl fmt::Display for VueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed Vue pattern catalog, in detection order within each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VuePattern {
    // composables
    ComposableFunction,
    // components
    SmartDumbComponent,
    ScopedSlots,
    RenderlessComponent,
    // options API, reported only for version-2 components
    OptionsApiStructure,
    MixinUsage,
    FilterUsage,
    WatchPattern,
}

impl VuePattern {
    /// Every pattern, in catalog order.
    pub const ALL: [VuePattern; 8] = [
        VuePattern::ComposableFunction,
        VuePattern::SmartDumbComponent,
        VuePattern::ScopedSlots,
        VuePattern::RenderlessComponent,
        VuePattern::OptionsApiStructure,
        VuePattern::MixinUsage,
        VuePattern::FilterUsage,
        VuePattern::WatchPattern,
    ];

    /// Stable kebab-case identifier.
    pub fn id(&self) -> &'static str {
        match self {
            VuePattern::ComposableFunction => "composable-function",
            VuePattern::SmartDumbComponent => "smart-dumb-component",
            VuePattern::ScopedSlots => "scoped-slots",
            VuePattern::RenderlessComponent => "renderless-component",
            VuePattern::OptionsApiStructure => "options-api-structure",
            VuePattern::MixinUsage => "mixin-usage",
            VuePattern::FilterUsage => "filter-usage",
            VuePattern::WatchPattern => "watch-pattern",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VuePattern::ComposableFunction => "Composable Function",
            VuePattern::SmartDumbComponent => "Smart/Dumb Component",
            VuePattern::ScopedSlots => "Scoped Slots",
            VuePattern::RenderlessComponent => "Renderless Component",
            VuePattern::OptionsApiStructure => "Options API Structure",
            VuePattern::MixinUsage => "Mixin Usage",
            VuePattern::FilterUsage => "Filter Usage",
            VuePattern::WatchPattern => "Watch Pattern",
        }
    }

    pub fn category(&self) -> VueCategory {
        match self {
            VuePattern::ComposableFunction => VueCategory::Composables,
            VuePattern::SmartDumbComponent
            | VuePattern::ScopedSlots
            | VuePattern::RenderlessComponent => VueCategory::Components,
            VuePattern::OptionsApiStructure
            | VuePattern::MixinUsage
            | VuePattern::FilterUsage
            | VuePattern::WatchPattern => VueCategory::OptionsApi,
        }
    }

    /// One-line description for catalog listings.
    pub fn summary(&self) -> &'static str {
        match self {
            VuePattern::ComposableFunction => "use-prefixed function sharing reactive logic",
            VuePattern::SmartDumbComponent => "Props-driven split between logic and presentation",
            VuePattern::ScopedSlots => "Named or scoped slots handing render control to the parent",
            VuePattern::RenderlessComponent => "Slot-only template providing behavior without markup",
            VuePattern::OptionsApiStructure => "data/methods/computed organised the Vue 2 way",
            VuePattern::MixinUsage => "Shared behavior mixed into a Vue 2 component",
            VuePattern::FilterUsage => "Vue 2 template formatting filters",
            VuePattern::WatchPattern => "Watchers reacting to state changes",
        }
    }
}

/// A positively identified component pattern with its supporting evidence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VueDetection {
    pub pattern: VuePattern,
    pub category: VueCategory,
    pub confidence: Confidence,
    pub location: Location,
    pub evidence: Vec<String>,
    pub antipatterns: Vec<String>,
    pub suggestions: Vec<String>,
}

impl VueDetection {
    pub(crate) fn new(pattern: VuePattern, confidence: Confidence, location: Location) -> Self {
        Self {
            pattern,
            category: pattern.category(),
            confidence,
            location,
            evidence: Vec::new(),
            antipatterns: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_serializes_as_bare_digits() {
        assert_eq!(serde_json::to_string(&VueVersion::V2).unwrap(), "\"2\"");
        assert_eq!(
            serde_json::to_string(&VueVersion::Unknown).unwrap(),
            "\"unknown\""
        );
        assert_eq!(VueVersion::default(), VueVersion::Unknown);
    }

    #[test]
    fn pattern_ids_are_kebab_case() {
        for pattern in VuePattern::ALL {
            assert_eq!(
                serde_json::to_string(&pattern).unwrap(),
                format!("\"{}\"", pattern.id())
            );
        }
        assert_eq!(VuePattern::OptionsApiStructure.id(), "options-api-structure");
    }

    #[test]
    fn options_category_keeps_upper_case_api() {
        assert_eq!(VueCategory::OptionsApi.as_str(), "optionsAPI");
        assert_eq!(
            serde_json::to_string(&VueCategory::OptionsApi).unwrap(),
            "\"optionsAPI\""
        );
    }

    #[test]
    fn active_script_prefers_the_setup_block() {
        let model = ComponentModel {
            script: Some(ScriptBlock {
                content: "plain".to_string(),
                lang: None,
            }),
            script_setup: Some(ScriptBlock {
                content: "setup".to_string(),
                lang: None,
            }),
            ..ComponentModel::default()
        };
        assert_eq!(model.active_script(), "setup");
        assert_eq!(model.plain_script(), "plain");
    }
}
