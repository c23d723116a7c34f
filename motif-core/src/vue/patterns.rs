//! Non-violating pattern detections: composables, component shapes, and
//! the options-API structure reports for version-2 components.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::{Confidence, Location};

use super::extractor::{function_parts, line_of};
use super::types::{ComponentModel, VueDetection, VuePattern};

static COMPOSABLE_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:export\s+)?function\s+(use[A-Z]\w*)\s*\(").unwrap());
static REACTIVE_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"return\s*\{[^}]*(?:ref|reactive|computed|readonly)").unwrap());
static OPTIONS_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:options|config|params)\s*[=:]").unwrap());
static FLEXIBLE_ARGUMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:unref|toRefs?)\s*\(").unwrap());
static LIFECYCLE_HOOKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:onMounted|onUnmounted|onBeforeMount|onBeforeUnmount|onUpdated|onActivated|onDeactivated)\s*\(",
    )
    .unwrap()
});
static BUSINESS_LOGIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:const|let|var)\s+\w+\s*=\s*(?:computed|ref|reactive|watch)").unwrap());
static SLOT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<slot[\s>]").unwrap());
static NAMED_SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<slot\s+name=").unwrap());
static SCOPED_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<slot\s+[^>]*:|<slot\s+v-bind").unwrap());
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SLOT_ONLY_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<slot[\s/>]").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)").unwrap());

/// One detection per `use`-prefixed function declaration, with the
/// brace-matched body scanned for composable conventions.
pub(super) fn detect_composable_functions(model: &ComponentModel) -> Vec<VueDetection> {
    let script = model.active_script();
    let mut detections = Vec::new();
    for caps in COMPOSABLE_FN.captures_iter(script) {
        let name = &caps[1];
        let at = caps.get(0).map_or(0, |m| m.start());
        let (params, body) = function_parts(script, at).unwrap_or(("", ""));

        let mut detection = VueDetection::new(
            VuePattern::ComposableFunction,
            Confidence::High,
            Location::for_class(&model.name)
                .with_method(name)
                .with_line(line_of(script, at)),
        );
        detection
            .evidence
            .push(format!("Composable function: {name}"));
        detection
            .evidence
            .push("Follows the use-prefix naming convention".to_string());
        if REACTIVE_RETURN.is_match(body) {
            detection.evidence.push("Returns reactive state".to_string());
        } else {
            detection
                .suggestions
                .push("Consider returning reactive state from the composable".to_string());
        }
        if OPTIONS_PARAMETER.is_match(params) {
            detection
                .evidence
                .push("Accepts an options parameter".to_string());
        }
        if FLEXIBLE_ARGUMENTS.is_match(body) {
            detection
                .evidence
                .push("Handles ref-or-raw arguments with unref/toRef".to_string());
        }
        if LIFECYCLE_HOOKS.is_match(body) {
            detection
                .evidence
                .push("Registers lifecycle hooks".to_string());
        }
        detections.push(detection);
    }
    detections
}

/// Script-setup components with props split into "smart" (reactive business
/// logic declared locally) and presentational.
pub(super) fn detect_smart_dumb(model: &ComponentModel) -> Option<VueDetection> {
    if !model.is_script_setup || model.props.is_empty() {
        return None;
    }
    let smart = BUSINESS_LOGIC.is_match(model.active_script());

    let mut detection = VueDetection::new(
        VuePattern::SmartDumbComponent,
        if smart {
            Confidence::Medium
        } else {
            Confidence::High
        },
        Location::for_class(&model.name).with_line(1),
    );
    detection
        .evidence
        .push("Uses <script setup> (Composition API)".to_string());
    detection.evidence.push(format!(
        "Declares {} prop(s) with defineProps",
        model.props.len()
    ));
    if !model.emits.is_empty() {
        detection
            .evidence
            .push(format!("Emits {} event(s)", model.emits.len()));
    }
    if smart {
        detection
            .evidence
            .push("Declares reactive business logic in the component".to_string());
        detection
            .suggestions
            .push("Consider extracting business logic into composables".to_string());
    } else {
        detection.evidence.push(
            "Presentational component: props in, events out, no local business logic".to_string(),
        );
    }
    Some(detection)
}

pub(super) fn detect_scoped_slots(model: &ComponentModel) -> Option<VueDetection> {
    let template = model.template.as_deref()?;
    if !SLOT_TAG.is_match(template) {
        return None;
    }
    let named = NAMED_SLOT.is_match(template);
    let scoped = SCOPED_SLOT.is_match(template);
    if !named && !scoped {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::ScopedSlots,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    if named {
        detection.evidence.push("Named slots detected".to_string());
    }
    if scoped {
        detection.evidence.push("Scoped slots detected".to_string());
    }
    Some(detection)
}

/// A template whose only elements are slots, backed by a script block.
pub(super) fn detect_renderless(model: &ComponentModel) -> Option<VueDetection> {
    if model.script.is_none() && model.script_setup.is_none() {
        return None;
    }
    let template = model.template.as_deref()?;
    let stripped = HTML_COMMENT.replace_all(template, "");
    let trimmed = stripped.trim();
    if !SLOT_ONLY_START.is_match(trimmed) {
        return None;
    }
    if ANY_TAG.captures_iter(trimmed).any(|caps| &caps[1] != "slot") {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::RenderlessComponent,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    detection
        .evidence
        .push("Template contains only slot elements".to_string());
    detection
        .evidence
        .push("Rendering is delegated to the consumer".to_string());
    Some(detection)
}

pub(super) fn detect_options_api_structure(model: &ComponentModel) -> Option<VueDetection> {
    if model.data.is_empty() && model.methods.is_empty() && model.computed.is_empty() {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::OptionsApiStructure,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    detection.evidence.push("Uses the Options API".to_string());
    if !model.data.is_empty() {
        detection
            .evidence
            .push(format!("Declares {} data key(s)", model.data.len()));
    }
    if !model.methods.is_empty() {
        detection
            .evidence
            .push(format!("Declares {} method(s)", model.methods.len()));
    }
    if !model.computed.is_empty() {
        let count = model.computed.len();
        detection.evidence.push(format!(
            "Declares {} computed propert{}",
            count,
            if count == 1 { "y" } else { "ies" }
        ));
    }
    if !model.watchers.is_empty() {
        detection
            .evidence
            .push(format!("Declares {} watcher(s)", model.watchers.len()));
    }
    Some(detection)
}

pub(super) fn detect_mixin_usage(model: &ComponentModel) -> Option<VueDetection> {
    if model.mixins.is_empty() {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::MixinUsage,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    detection.evidence.push(format!(
        "Uses {} mixin(s): {}",
        model.mixins.len(),
        model.mixins.join(", ")
    ));
    detection
        .evidence
        .push("Accepted Vue 2 pattern for sharing behavior".to_string());
    detection
        .suggestions
        .push("Convert mixins to composables when migrating to Vue 3".to_string());
    Some(detection)
}

pub(super) fn detect_filter_usage(model: &ComponentModel) -> Option<VueDetection> {
    if model.filters.is_empty() {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::FilterUsage,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    detection.evidence.push(format!(
        "Uses {} filter(s): {}",
        model.filters.len(),
        model.filters.join(", ")
    ));
    detection
        .evidence
        .push("Accepted Vue 2 pattern for template formatting".to_string());
    detection
        .suggestions
        .push("Convert filters to computed properties or methods when migrating to Vue 3".to_string());
    Some(detection)
}

pub(super) fn detect_watch_pattern(model: &ComponentModel) -> Option<VueDetection> {
    if model.watchers.is_empty() {
        return None;
    }

    let mut detection = VueDetection::new(
        VuePattern::WatchPattern,
        Confidence::High,
        Location::for_class(&model.name).with_line(1),
    );
    detection.evidence.push(format!(
        "Declares {} watcher(s) over reactive state",
        model.watchers.len()
    ));
    detection
        .evidence
        .push(format!("Watchers: {}", model.watchers.join(", ")));
    Some(detection)
}
