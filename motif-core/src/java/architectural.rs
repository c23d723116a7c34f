//! Architectural rules. MVC correlates classes across the whole unit, so it
//! takes the full class list; the other two stay per-class.

use crate::config::JavaRule;
use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern};

fn is_controller(class: &ClassModel) -> bool {
    class.name_contains("controller")
        || class.has_annotation("Controller")
        || class.has_annotation("RestController")
}

fn is_model(class: &ClassModel) -> bool {
    class.name_contains("model") || class.has_annotation("Entity")
}

/// One detection for the unit when it pairs controller-role and model-role
/// classes. No class location; the unit itself is the subject.
pub(super) fn detect_mvc(classes: &[ClassModel]) -> Option<JavaDetection> {
    let controllers = classes.iter().filter(|c| is_controller(c)).count();
    let models = classes.iter().filter(|c| is_model(c)).count();
    if controllers == 0 || models == 0 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Mvc,
        Confidence::High,
        Location::default(),
    );
    detection
        .evidence
        .push(format!("{} controller class(es)", controllers));
    detection.evidence.push(format!("{} model class(es)", models));
    let views = classes
        .iter()
        .filter(|c| c.name_contains("view"))
        .count();
    detection.evidence.push(if views > 0 {
        format!("{} view class(es)", views)
    } else {
        "views likely handled by templates".to_string()
    });
    Some(detection)
}

pub(super) fn detect_front_controller(class: &ClassModel) -> Option<JavaDetection> {
    let annotated =
        class.has_annotation("ControllerAdvice") || class.has_annotation("WebFilter");
    let named =
        class.name_contains("dispatcherservlet") || class.name_contains("frontcontroller");
    if !annotated && !named {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::FrontController,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(if annotated {
        "centralized request handling annotation".to_string()
    } else {
        "class name indicates a front controller".to_string()
    });
    Some(detection)
}

pub(super) fn detect_service_locator(
    class: &ClassModel,
    rule: &JavaRule,
) -> Option<JavaDetection> {
    if !class.name_contains("servicelocator") && !class.name_contains("servicefactory") {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::ServiceLocator,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push("central lookup point for services".to_string());
    if rule.detect_antipatterns {
        detection.antipatterns.push(
            "service location hides dependencies; prefer dependency injection".to_string(),
        );
    }
    Some(detection)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn mvc_requires_both_roles() {
        let controller = class("UserController");
        assert!(detect_mvc(std::slice::from_ref(&controller)).is_none());

        let classes = vec![controller, class("UserModel")];
        let detection = detect_mvc(&classes).unwrap();
        assert!(detection.location.class_name.is_none());
        assert!(detection
            .evidence
            .iter()
            .any(|e| e.contains("templates")));
    }

    #[test]
    fn mvc_roles_via_annotations() {
        let mut controller = class("Accounts");
        controller.annotations.push("RestController".to_string());
        let mut model = class("Account");
        model.annotations.push("Entity".to_string());
        let classes = vec![controller, model, class("AccountView")];
        let detection = detect_mvc(&classes).unwrap();
        assert!(detection.evidence.iter().any(|e| e.contains("1 view")));
    }

    #[test]
    fn front_controller_by_annotation_or_name() {
        let mut advice = class("GlobalErrors");
        advice.annotations.push("ControllerAdvice".to_string());
        assert!(detect_front_controller(&advice).is_some());

        let named = class("AppFrontController");
        assert!(detect_front_controller(&named).is_some());

        assert!(detect_front_controller(&class("UserController")).is_none());
    }

    #[test]
    fn service_locator_discouragement_is_gated() {
        let cls = class("ServiceLocator");
        let mut rule = JavaRule::default();
        assert!(!detect_service_locator(&cls, &rule)
            .unwrap()
            .antipatterns
            .is_empty());
        rule.detect_antipatterns = false;
        assert!(detect_service_locator(&cls, &rule)
            .unwrap()
            .antipatterns
            .is_empty());
    }
}
