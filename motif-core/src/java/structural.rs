//! Structural pattern rules: adapter, decorator, facade, proxy, composite,
//! bridge, flyweight.

use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern};

pub(super) fn detect_adapter(class: &ClassModel) -> Option<JavaDetection> {
    let named = class.name_contains("adapter") || class.name_contains("wrapper");
    if !named || class.fields.is_empty() || class.implements.is_empty() {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Adapter,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push("class name indicates adaptation".to_string());
    detection.evidence.push(format!(
        "wraps {} field(s) behind interface {}",
        class.fields.len(),
        class.implements.join(", ")
    ));
    Some(detection)
}

pub(super) fn detect_decorator(class: &ClassModel) -> Option<JavaDetection> {
    if !class.implements.is_empty() {
        return None;
    }
    let named = class.name_contains("decorator");
    let wraps_parent =
        class.extends.is_some() && class.fields.iter().any(|f| !f.is_static);
    if !named && !wraps_parent {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Decorator,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    if named {
        detection
            .evidence
            .push("class name indicates decoration".to_string());
    }
    if let Some(parent) = &class.extends {
        if wraps_parent {
            detection.evidence.push(format!(
                "extends {} while holding wrapped state",
                parent
            ));
        }
    }
    Some(detection)
}

pub(super) fn detect_facade(class: &ClassModel) -> Option<JavaDetection> {
    let named = class.name_contains("facade");
    let subsystem_fields = class.fields.iter().filter(|f| !f.is_static).count();
    let entry_points = class
        .regular_methods()
        .filter(|m| m.is_public && !m.is_static)
        .count();
    let structural = subsystem_fields >= 2 && entry_points >= 2;
    if !named && !structural {
        return None;
    }

    let confidence = if named {
        Confidence::High
    } else {
        Confidence::Medium
    };
    let mut detection = JavaDetection::new(
        JavaPattern::Facade,
        confidence,
        Location::for_class(&class.name).with_line(class.line),
    );
    if named {
        detection
            .evidence
            .push("class name indicates a facade".to_string());
    }
    if structural {
        detection.evidence.push(format!(
            "fronts {} subsystem field(s) with {} public method(s)",
            subsystem_fields, entry_points
        ));
    }
    Some(detection)
}

pub(super) fn detect_proxy(class: &ClassModel) -> Option<JavaDetection> {
    if !class.name_contains("proxy") || class.implements.is_empty() {
        return None;
    }
    let subject = class
        .fields
        .iter()
        .find(|f| f.is_private && !f.is_static)?;

    let mut detection = JavaDetection::new(
        JavaPattern::Proxy,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "implements {} while delegating to private field '{}'",
        class.implements.join(", "),
        subject.name
    ));
    Some(detection)
}

pub(super) fn detect_composite(class: &ClassModel) -> Option<JavaDetection> {
    let children = class.fields.iter().find(|f| {
        f.type_contains("List") || f.type_contains("Set") || f.type_contains("Collection")
    })?;
    let has_add = class.has_method_containing("add");
    let has_remove = class.has_method_containing("remove");
    if !has_add || !has_remove {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Composite,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "child collection '{}' with add/remove management",
        children.name
    ));
    Some(detection)
}

pub(super) fn detect_bridge(class: &ClassModel) -> Option<JavaDetection> {
    if !class.is_abstract {
        return None;
    }
    let implementor = class.fields.iter().find(|f| {
        let t = f.field_type.to_lowercase();
        t.contains("impl") || t.contains("implementation")
    })?;

    let mut detection = JavaDetection::new(
        JavaPattern::Bridge,
        Confidence::Low,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "abstraction delegates to implementor field '{}'",
        implementor.name
    ));
    Some(detection)
}

pub(super) fn detect_flyweight(class: &ClassModel) -> Option<JavaDetection> {
    let pool = class.fields.iter().find(|f| {
        f.is_static
            && (f.type_contains("Map") || f.type_contains("HashMap") || f.type_contains("Cache"))
    })?;
    let accessor = class
        .regular_methods()
        .find(|m| m.is_static && m.name_contains("get"))?;

    let mut detection = JavaDetection::new(
        JavaPattern::Flyweight,
        Confidence::Low,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "static pool '{}' accessed via '{}'",
        pool.name, accessor.name
    ));
    Some(detection)
}
