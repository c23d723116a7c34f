//! Violation rules: anti-patterns, best practices, and template checks.
//!
//! The rules are version-aware. Identical structural facts can be an accepted
//! pattern under version 2 and a violation under version 3.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::VueConfig;
use crate::report::{Location, Violation};

use super::extractor::line_of;
use super::types::{ComponentModel, VueVersion};

static V_IF_WITH_V_FOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\w+[^>]*v-for[^>]*v-if|<\w+[^>]*v-if[^>]*v-for").unwrap());
static PARENT_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$parent|\$children|\$root").unwrap());
static RUNTIME_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"type:\s*(?:String|Number|Boolean|Array|Object|Function)").unwrap());
static KEBAB_EVENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap());
static TEMPLATE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\w+[^>]*>").unwrap());

pub(super) fn check_anti_patterns(
    model: &ComponentModel,
    config: &VueConfig,
    violations: &mut Vec<Violation>,
) {
    let rules = &config.anti_patterns;

    if rules.mixins.enabled && model.version == VueVersion::V3 && !model.mixins.is_empty() {
        let line = keyword_line(model.plain_script(), "mixins");
        violations.push(
            Violation::new(
                "mixin-usage",
                "antiPatterns",
                rules.mixins.severity,
                "Mixin usage detected; Vue 3 favors composables",
                Location::for_class(&model.name).with_line(line),
            )
            .with_suggestion("Migrate shared logic to composables"),
        );
    }

    if rules.filter_deprecated.enabled
        && model.version == VueVersion::V3
        && !model.filters.is_empty()
    {
        let line = keyword_line(model.plain_script(), "filters");
        violations.push(
            Violation::new(
                "filter-deprecated",
                "migration",
                rules.filter_deprecated.severity,
                "Filters were removed in Vue 3",
                Location::for_class(&model.name).with_line(line),
            )
            .with_suggestion("Use computed properties or methods instead"),
        );
    }

    if rules.v_if_with_v_for.enabled {
        if let Some(template) = model.template.as_deref() {
            for m in V_IF_WITH_V_FOR.find_iter(template) {
                violations.push(
                    Violation::new(
                        "v-if-with-v-for",
                        "antiPatterns",
                        rules.v_if_with_v_for.severity,
                        "v-if and v-for on the same element",
                        Location::for_class(&model.name)
                            .with_line(line_of(template, m.start())),
                    )
                    .with_suggestion(
                        "Move the v-if to a wrapper element or filter the list in a computed property",
                    ),
                );
            }
        }
    }

    if rules.prop_mutation.enabled {
        let script = model.active_script();
        for prop in &model.props {
            if let Some(line) = first_mutation_line(script, prop) {
                violations.push(
                    Violation::new(
                        "prop-mutation",
                        "antiPatterns",
                        rules.prop_mutation.severity,
                        format!("Direct mutation of prop \"{prop}\" detected"),
                        Location::for_class(&model.name).with_line(line),
                    )
                    .with_suggestion("Emit an event and let the parent update the value"),
                );
            }
        }
    }

    if rules.parent_access.enabled && PARENT_ACCESS.is_match(model.active_script()) {
        violations.push(
            Violation::new(
                "parent-access",
                "antiPatterns",
                rules.parent_access.severity,
                "Accessing $parent/$children/$root couples the component to its surroundings",
                Location::for_class(&model.name).with_line(1),
            )
            .with_suggestion("Communicate through props and events instead"),
        );
    }

    if rules.god_component.enabled {
        let lines = line_count(model.active_script());
        let max = config.components.max_component_size;
        if lines > max {
            violations.push(
                Violation::new(
                    "god-component",
                    "antiPatterns",
                    rules.god_component.severity,
                    format!("Component script spans {lines} lines (max recommended {max})"),
                    Location::for_class(&model.name).with_line(1),
                )
                .with_suggestion("Split the component into smaller components or composables"),
            );
        }
    }
}

pub(super) fn check_best_practices(
    model: &ComponentModel,
    config: &VueConfig,
    violations: &mut Vec<Violation>,
) {
    let rules = &config.best_practices;

    if rules.prop_validation.enabled && !model.props.is_empty() {
        let script = model.active_script();
        let typed = script.contains("defineProps<") || RUNTIME_TYPE.is_match(script);
        if !typed {
            violations.push(
                Violation::new(
                    "prop-validation",
                    "bestPractices",
                    rules.prop_validation.severity,
                    "Props are declared without type validation",
                    Location::for_class(&model.name).with_line(1),
                )
                .with_suggestion(
                    "Declare prop types with defineProps<T>() or runtime type entries",
                ),
            );
        }
    }

    if rules.event_naming.enabled {
        for event in &model.emits {
            if !KEBAB_EVENT.is_match(event) {
                violations.push(
                    Violation::new(
                        "event-naming",
                        "bestPractices",
                        rules.event_naming.severity,
                        format!("Event \"{event}\" is not kebab-case"),
                        Location::for_class(&model.name).with_line(1),
                    )
                    .with_suggestion("Use kebab-case event names, e.g. \"update-value\""),
                );
            }
        }
    }

    if rules.script_setup.enabled && !model.is_script_setup && model.script.is_some() {
        violations.push(
            Violation::new(
                "script-setup-usage",
                "bestPractices",
                rules.script_setup.severity,
                "Component uses a plain <script> block",
                Location::for_class(&model.name).with_line(1),
            )
            .with_suggestion("Prefer <script setup> for new components"),
        );
    }
}

pub(super) fn check_template(
    model: &ComponentModel,
    config: &VueConfig,
    violations: &mut Vec<Violation>,
) {
    if !config.template.v_for_key.enabled {
        return;
    }
    let Some(template) = model.template.as_deref() else {
        return;
    };
    // `:key` after the v-for also covers the spelled-out v-bind:key form
    for m in TEMPLATE_TAG.find_iter(template) {
        let tag = m.as_str();
        let Some(at) = tag.find("v-for") else {
            continue;
        };
        if !tag[at..].contains(":key") {
            violations.push(
                Violation::new(
                    "v-for-key",
                    "template",
                    config.template.v_for_key.severity,
                    "v-for without a :key attribute",
                    Location::for_class(&model.name).with_line(line_of(template, m.start())),
                )
                .with_suggestion("Bind a stable :key so list state survives reorders"),
            );
        }
    }
}

/// Line of the first assignment to `prop` or `prop.value`. Equality
/// comparisons and arrow parameters are not assignments.
fn first_mutation_line(script: &str, prop: &str) -> Option<u32> {
    let pattern = format!(r"\b{}(?:\.value)?\s*=", regex::escape(prop));
    let re = Regex::new(&pattern).ok()?;
    for m in re.find_iter(script) {
        match script.as_bytes().get(m.end()).copied() {
            Some(b'=') | Some(b'>') => continue,
            _ => return Some(line_of(script, m.start())),
        }
    }
    None
}

fn keyword_line(text: &str, keyword: &str) -> u32 {
    text.find(keyword).map_or(1, |at| line_of(text, at))
}

fn line_count(text: &str) -> u32 {
    text.bytes().filter(|b| *b == b'\n').count() as u32 + 1
}
