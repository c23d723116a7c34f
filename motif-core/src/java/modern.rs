//! Modern-stack rules: dependency injection, circuit breaker, event
//! sourcing, CQRS.

use crate::config::JavaRule;
use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern};

pub(super) fn detect_dependency_injection(
    class: &ClassModel,
    rule: &JavaRule,
) -> Option<JavaDetection> {
    let field_injection = class
        .fields
        .iter()
        .any(|f| f.has_modifier("Autowired"));
    let class_injection =
        class.has_annotation("Autowired") || class.has_annotation("Inject");
    let ctor_injection = class
        .constructors()
        .any(|c| !c.parameters.is_empty())
        && class.fields.iter().any(|f| f.is_final);
    if !field_injection && !class_injection && !ctor_injection {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::DependencyInjection,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    if field_injection {
        detection
            .evidence
            .push("@Autowired field injection".to_string());
    }
    if class_injection {
        detection
            .evidence
            .push("injection annotation on the class".to_string());
    }
    if ctor_injection {
        detection
            .evidence
            .push("constructor injection into final fields".to_string());
    }
    if rule.detect_antipatterns && field_injection && !ctor_injection {
        detection.antipatterns.push(
            "field injection without constructor injection hinders testing".to_string(),
        );
    }
    Some(detection)
}

pub(super) fn detect_circuit_breaker(class: &ClassModel) -> Option<JavaDetection> {
    let annotated = class.has_annotation("CircuitBreaker")
        || class.has_annotation("HystrixCommand")
        || class
            .regular_methods()
            .any(|m| {
                m.annotations.iter().any(|a| a == "CircuitBreaker" || a == "HystrixCommand")
            });
    let named = class.name_contains("circuitbreaker");
    let state_constants = class.fields.iter().any(|f| {
        f.name.contains("OPEN") || f.name.contains("CLOSED") || f.name.contains("HALF_OPEN")
    });
    if !annotated && !named && !state_constants {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::CircuitBreaker,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    if annotated {
        detection
            .evidence
            .push("circuit breaker annotation".to_string());
    }
    if named {
        detection
            .evidence
            .push("class name indicates a circuit breaker".to_string());
    }
    if state_constants {
        detection
            .evidence
            .push("OPEN/CLOSED/HALF_OPEN state constants".to_string());
    }
    Some(detection)
}

pub(super) fn detect_event_sourcing(class: &ClassModel) -> Option<JavaDetection> {
    if !class.name_contains("event") {
        return None;
    }
    let applies = class
        .regular_methods()
        .find(|m| m.name_contains("apply"))?;

    let mut detection = JavaDetection::new(
        JavaPattern::EventSourcing,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "event-centric type rebuilt through '{}'",
        applies.name
    ));
    Some(detection)
}

pub(super) fn detect_cqrs(class: &ClassModel) -> Option<JavaDetection> {
    let command_side =
        class.name_contains("command") && !class.regular_methods().any(|m| m.returns_value());
    let query_side =
        class.name_contains("query") && class.regular_methods().any(|m| m.returns_value());
    if !command_side && !query_side {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Cqrs,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(if command_side {
        "command type mutates without returning state".to_string()
    } else {
        "query type returns state without mutating".to_string()
    });
    Some(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::types::{FieldModel, MethodModel, ParameterModel};

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

    fn rule() -> JavaRule {
        JavaRule::default()
    }

    #[test]
    fn field_injection_without_ctor_is_flagged() {
        let mut cls = class("OrderHandler");
        let mut wired = field("repository", "OrderRepository");
        wired.modifiers.push("Autowired".to_string());
        cls.fields.push(wired);
        let detection = detect_dependency_injection(&cls, &rule()).unwrap();
        assert!(detection
            .antipatterns
            .iter()
            .any(|a| a.contains("constructor injection")));
    }

    #[test]
    fn constructor_injection_clears_the_flag() {
        let mut cls = class("OrderHandler");
        let mut wired = field("repository", "OrderRepository");
        wired.modifiers.push("Autowired".to_string());
        wired.is_final = true;
        cls.fields.push(wired);
        let mut ctor = method("OrderHandler", None);
        ctor.parameters.push(ParameterModel {
            name: "repository".to_string(),
            param_type: "OrderRepository".to_string(),
        });
        cls.methods.push(ctor);
        let detection = detect_dependency_injection(&cls, &rule()).unwrap();
        assert!(detection.antipatterns.is_empty());
        assert!(detection
            .evidence
            .iter()
            .any(|e| e.contains("constructor injection")));
    }

    #[test]
    fn circuit_breaker_by_state_constants() {
        let mut cls = class("PaymentGateway");
        let mut state = field("STATE_HALF_OPEN", "String");
        state.is_static = true;
        cls.fields.push(state);
        assert!(detect_circuit_breaker(&cls).is_some());
        assert!(detect_circuit_breaker(&class("PaymentGateway")).is_none());
    }

    #[test]
    fn circuit_breaker_by_method_annotation() {
        let mut cls = class("RemoteClient");
        let mut call = method("fetch", Some("Response"));
        call.annotations.push("CircuitBreaker".to_string());
        cls.methods.push(call);
        assert!(detect_circuit_breaker(&cls).is_some());
    }

    #[test]
    fn event_sourcing_needs_apply() {
        let mut cls = class("AccountEventStore");
        assert!(detect_event_sourcing(&cls).is_none());
        cls.methods.push(method("applyEvent", Some("void")));
        assert!(detect_event_sourcing(&cls).is_some());
    }

    #[test]
    fn cqrs_sides_judge_regular_methods_only() {
        // The constructor's missing return type must not count as a value
        // return on either side.
        let mut command = class("CreateOrderCommand");
        command.methods.push(method("CreateOrderCommand", None));
        command.methods.push(method("execute", Some("void")));
        assert!(detect_cqrs(&command).is_some());

        let mut query = class("OrderQuery");
        query.methods.push(method("OrderQuery", None));
        assert!(detect_cqrs(&query).is_none());
        query.methods.push(method("fetch", Some("List<Order>")));
        assert!(detect_cqrs(&query).is_some());
    }
}
