//! Creational pattern rules: singleton, builder, factory method,
//! abstract factory, prototype.

use crate::config::JavaRule;
use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern, MethodModel};

/// Private constructor plus a static instance anchor. Both anchors are
/// structural, so a match is always high confidence.
pub(super) fn detect_singleton(class: &ClassModel, rule: &JavaRule) -> Option<JavaDetection> {
    let private_ctor = class.constructors().any(|c| c.is_private);
    let instance_field = class
        .fields
        .iter()
        .find(|f| f.is_static && f.is_final && f.field_type == class.name);
    let accessor = class
        .regular_methods()
        .find(|m| m.is_static && m.is_public && m.name_contains("instance"));

    if !private_ctor || (instance_field.is_none() && accessor.is_none()) {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Singleton,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push("private constructor prevents external instantiation".to_string());
    if let Some(field) = instance_field {
        detection
            .evidence
            .push(format!("static final instance field '{}'", field.name));
    }
    if let Some(method) = accessor {
        detection
            .evidence
            .push(format!("static accessor method '{}'", method.name));
    }

    if rule.detect_antipatterns {
        if let Some(field) = class
            .fields
            .iter()
            .find(|f| f.is_static && f.field_type == class.name && !f.is_final)
        {
            detection
                .antipatterns
                .push(format!("instance field '{}' is not final", field.name));
        }
        if !class.has_method_containing("clone") {
            detection
                .antipatterns
                .push("no clone() override guarding against duplication".to_string());
        }
        if class.implements.iter().any(|i| i == "Serializable")
            && !class.has_method_named("readResolve")
        {
            detection
                .antipatterns
                .push("implements Serializable without readResolve()".to_string());
        }
    }

    Some(detection)
}

/// A builder anchor (name, companion class, or non-void build()) plus at
/// least two fluent methods returning the declaring type.
pub(super) fn detect_builder(class: &ClassModel, classes: &[ClassModel]) -> Option<JavaDetection> {
    let named_builder = class.name_contains("builder");
    let companion = classes.iter().any(|other| {
        other.name == format!("{}Builder", class.name)
            || other.name.contains(&format!("{}.Builder", class.name))
    });
    let build_method = class
        .regular_methods()
        .any(|m| m.name == "build" && m.returns_value());

    let fluent: Vec<&MethodModel> = class
        .regular_methods()
        .filter(|m| {
            m.return_type.as_deref() == Some(class.name.as_str())
                && (m.name.starts_with("with") || m.name.starts_with("set"))
        })
        .collect();

    if !(named_builder || companion || build_method) || fluent.len() < 2 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Builder,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    if named_builder {
        detection
            .evidence
            .push("class name indicates a builder".to_string());
    }
    if companion {
        detection
            .evidence
            .push(format!("companion builder class for '{}'", class.name));
    }
    if build_method {
        detection
            .evidence
            .push("non-void build() method".to_string());
    }
    let names: Vec<&str> = fluent.iter().map(|m| m.name.as_str()).collect();
    detection.evidence.push(format!(
        "{} fluent methods returning {}: {}",
        fluent.len(),
        class.name,
        names.join(", ")
    ));
    Some(detection)
}

/// Static public methods that create instances, keyed by name. A pure
/// name heuristic, so confidence stays medium regardless of count.
pub(super) fn detect_factory_method(class: &ClassModel) -> Option<JavaDetection> {
    let factories: Vec<&MethodModel> = class
        .regular_methods()
        .filter(|m| {
            m.is_static
                && m.is_public
                && m.returns_value()
                && ["create", "factory", "new", "get"]
                    .iter()
                    .any(|k| m.name_contains(k))
        })
        .collect();
    if factories.is_empty() {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::FactoryMethod,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    let names: Vec<&str> = factories.iter().map(|m| m.name.as_str()).collect();
    detection.evidence.push(format!(
        "{} static factory method(s): {}",
        factories.len(),
        names.join(", ")
    ));
    Some(detection)
}

/// Abstract type declaring a family of create methods.
pub(super) fn detect_abstract_factory(class: &ClassModel) -> Option<JavaDetection> {
    if !class.is_interface && !class.is_abstract {
        return None;
    }
    let creators: Vec<&MethodModel> = class
        .regular_methods()
        .filter(|m| m.returns_value() && m.name_contains("create"))
        .collect();
    if creators.len() < 2 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::AbstractFactory,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(if class.is_interface {
        "interface declares the factory family".to_string()
    } else {
        "abstract class declares the factory family".to_string()
    });
    let names: Vec<&str> = creators.iter().map(|m| m.name.as_str()).collect();
    detection.evidence.push(format!(
        "{} creation methods: {}",
        creators.len(),
        names.join(", ")
    ));
    Some(detection)
}

pub(super) fn detect_prototype(class: &ClassModel) -> Option<JavaDetection> {
    let cloneable = class.implements.iter().any(|i| i == "Cloneable");
    let clone = class
        .regular_methods()
        .any(|m| m.name == "clone" && m.is_public);
    if !cloneable || !clone {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Prototype,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push("implements Cloneable".to_string());
    detection
        .evidence
        .push("public clone() method".to_string());
    Some(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::types::{FieldModel, ParameterModel};

    fn class(name: &str) -> ClassModel {
        ClassModel {
            name: name.to_string(),
            is_interface: false,
            is_abstract: false,
            methods: vec![],
            fields: vec![],
            implements: vec![],
            extends: None,
            annotations: vec![],
            modifiers: vec![],
            line: 1,
        }
    }

    fn method(name: &str, return_type: Option<&str>) -> MethodModel {
        MethodModel {
            name: name.to_string(),
            is_abstract: false,
            is_static: false,
            is_private: false,
            is_public: true,
            return_type: return_type.map(str::to_string),
            parameters: vec![],
            annotations: vec![],
            line: 1,
        }
    }

    fn field(name: &str, field_type: &str) -> FieldModel {
        FieldModel {
            name: name.to_string(),
            field_type: field_type.to_string(),
            is_static: false,
            is_final: false,
            is_private: false,
            modifiers: vec![],
            line: 1,
        }
    }

    fn rule() -> crate::config::JavaRule {
        crate::config::JavaRule::default()
    }

    #[test]
    fn singleton_requires_private_constructor() {
        let mut cls = class("ConfigurationManager");
        let mut ctor = method("ConfigurationManager", None);
        ctor.is_public = false;
        ctor.is_private = true;
        cls.methods.push(ctor);
        let mut instance = field("INSTANCE", "ConfigurationManager");
        instance.is_static = true;
        instance.is_final = true;
        cls.fields.push(instance);
        let mut accessor = method("getInstance", Some("ConfigurationManager"));
        accessor.is_static = true;
        cls.methods.push(accessor);

        let detection = detect_singleton(&cls, &rule()).unwrap();
        assert_eq!(detection.confidence, crate::report::Confidence::High);
        assert!(detection.evidence.len() >= 2);

        // Same anchors with a public constructor: no match.
        cls.methods[0].is_private = false;
        assert!(detect_singleton(&cls, &rule()).is_none());
    }

    #[test]
    fn singleton_antipatterns_gated_by_rule_flag() {
        let mut cls = class("Registry");
        let mut ctor = method("Registry", None);
        ctor.is_private = true;
        cls.methods.push(ctor);
        let mut instance = field("instance", "Registry");
        instance.is_static = true;
        cls.fields.push(instance); // not final

        let mut on = rule();
        on.detect_antipatterns = true;
        let detection = detect_singleton(&cls, &on);
        // Non-final static field still anchors the detection but is flagged.
        let detection = detection.unwrap();
        assert!(detection
            .antipatterns
            .iter()
            .any(|a| a.contains("not final")));

        let mut off = rule();
        off.detect_antipatterns = false;
        assert!(detect_singleton(&cls, &off).unwrap().antipatterns.is_empty());
    }

    #[test]
    fn builder_needs_two_fluent_methods() {
        let mut cls = class("RequestBuilder");
        cls.methods.push(method("withTimeout", Some("RequestBuilder")));
        assert!(detect_builder(&cls, std::slice::from_ref(&cls)).is_none());

        cls.methods.push(method("withRetries", Some("RequestBuilder")));
        let detection = detect_builder(&cls, std::slice::from_ref(&cls)).unwrap();
        assert!(detection.evidence.iter().any(|e| e.contains("fluent")));
    }

    #[test]
    fn builder_detected_via_companion_class() {
        let mut subject = class("Request");
        subject.methods.push(method("setUrl", Some("Request")));
        subject.methods.push(method("setBody", Some("Request")));
        let companion = class("RequestBuilder");
        let classes = vec![subject.clone(), companion];
        let detection = detect_builder(&classes[0], &classes).unwrap();
        assert!(detection.evidence.iter().any(|e| e.contains("companion")));
    }

    #[test]
    fn factory_method_stays_medium() {
        let mut cls = class("Connections");
        let mut creator = method("createConnection", Some("Connection"));
        creator.is_static = true;
        cls.methods.push(creator);
        let detection = detect_factory_method(&cls).unwrap();
        assert_eq!(detection.confidence, crate::report::Confidence::Medium);
    }

    #[test]
    fn factory_method_ignores_void_and_instance_methods() {
        let mut cls = class("Connections");
        cls.methods.push(method("createConnection", Some("void")));
        let mut instance_creator = method("newConnection", Some("Connection"));
        instance_creator.is_static = false;
        cls.methods.push(instance_creator);
        assert!(detect_factory_method(&cls).is_none());
    }

    #[test]
    fn abstract_factory_requires_abstract_type() {
        let mut cls = class("WidgetFactory");
        cls.methods.push(method("createButton", Some("Button")));
        cls.methods.push(method("createWindow", Some("Window")));
        assert!(detect_abstract_factory(&cls).is_none());

        cls.is_interface = true;
        assert!(detect_abstract_factory(&cls).is_some());
    }

    #[test]
    fn prototype_needs_cloneable_and_public_clone() {
        let mut cls = class("Document");
        cls.implements.push("Cloneable".to_string());
        assert!(detect_prototype(&cls).is_none());
        cls.methods.push(method("clone", Some("Document")));
        assert!(detect_prototype(&cls).is_some());
    }

    #[test]
    fn constructor_does_not_leak_into_name_heuristics() {
        // A class whose constructor name contains "new" via the class name
        // must not count as a factory.
        let mut cls = class("NewsFeed");
        let ctor = MethodModel {
            name: "NewsFeed".to_string(),
            is_abstract: false,
            is_static: false,
            is_private: false,
            is_public: true,
            return_type: None,
            parameters: vec![ParameterModel {
                name: "source".to_string(),
                param_type: "String".to_string(),
            }],
            annotations: vec![],
            line: 2,
        };
        cls.methods.push(ctor);
        assert!(detect_factory_method(&cls).is_none());
    }
}
