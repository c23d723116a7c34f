//! Behavioral pattern rules: observer, strategy, template method, command,
//! state, iterator, chain of responsibility, mediator, memento, visitor,
//! interpreter.

use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern};

pub(super) fn detect_observer(class: &ClassModel) -> Option<JavaDetection> {
    let registry = class.fields.iter().find(|f| {
        (f.type_contains("List") || f.type_contains("Set"))
            && (f.name_contains("observer") || f.name_contains("listener"))
    })?;
    let notifies = class
        .regular_methods()
        .any(|m| m.name_contains("notify") || m.name_contains("update"));
    let registers = class.regular_methods().any(|m| {
        m.name_contains("add") && (m.name_contains("observer") || m.name_contains("listener"))
    });
    if !notifies || !registers {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Observer,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "subscriber collection '{}' with registration and notification",
        registry.name
    ));
    Some(detection)
}

pub(super) fn detect_strategy(class: &ClassModel) -> Option<JavaDetection> {
    if class.is_interface && !class.methods.is_empty() {
        let mut detection = JavaDetection::new(
            JavaPattern::Strategy,
            Confidence::High,
            Location::for_class(&class.name).with_line(class.line),
        );
        detection.evidence.push(format!(
            "interface abstracts {} interchangeable operation(s)",
            class.methods.len()
        ));
        return Some(detection);
    }

    let holder = class.fields.iter().find(|f| {
        let t = f.field_type.to_lowercase();
        t.contains("strategy") || t.contains("algorithm")
    })?;
    let invokes = class.regular_methods().any(|m| {
        m.name_contains("execute") || m.name_contains("perform") || m.name_contains("calculate")
    });
    if !invokes {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Strategy,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("delegates to strategy field '{}'", holder.name));
    Some(detection)
}

pub(super) fn detect_template_method(class: &ClassModel) -> Option<JavaDetection> {
    if !class.is_abstract {
        return None;
    }
    let hooks = class.regular_methods().filter(|m| m.is_abstract).count();
    if hooks == 0 {
        return None;
    }
    let template = class.regular_methods().find(|m| {
        m.is_public
            && !m.is_abstract
            && (m.name_contains("template") || m.name_contains("execute") || m.name_contains("run"))
    })?;

    let mut detection = JavaDetection::new(
        JavaPattern::TemplateMethod,
        Confidence::High,
        Location::for_class(&class.name)
            .with_method(&template.name)
            .with_line(template.line),
    );
    detection.evidence.push(format!(
        "'{}' orchestrates {} abstract step(s)",
        template.name, hooks
    ));
    Some(detection)
}

pub(super) fn detect_command(class: &ClassModel) -> Option<JavaDetection> {
    if !class.has_method_named("execute") {
        return None;
    }
    let named = class.name_contains("command");
    let undoable = class.has_method_named("undo");
    if !named && !undoable {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Command,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push("execute() entry point".to_string());
    if undoable {
        detection.evidence.push("undo() support".to_string());
    }
    Some(detection)
}

pub(super) fn detect_state(class: &ClassModel) -> Option<JavaDetection> {
    if class.is_interface && class.name_contains("state") {
        let mut detection = JavaDetection::new(
            JavaPattern::State,
            Confidence::Medium,
            Location::for_class(&class.name).with_line(class.line),
        );
        detection
            .evidence
            .push("state interface for interchangeable behavior".to_string());
        return Some(detection);
    }

    let holder = class
        .fields
        .iter()
        .find(|f| f.field_type.to_lowercase().contains("state"))?;
    let transitions = class
        .regular_methods()
        .any(|m| m.name_contains("state") || m.name_contains("transition"));
    if !transitions {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::State,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("state field '{}' with transitions", holder.name));
    Some(detection)
}

pub(super) fn detect_iterator(class: &ClassModel) -> Option<JavaDetection> {
    let declared = class
        .implements
        .iter()
        .any(|i| i == "Iterator" || i.starts_with("Iterator<"));
    let structural = class.has_method_named("next") && class.has_method_named("hasNext");
    if !declared && !structural {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Iterator,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(if declared {
        "implements Iterator".to_string()
    } else {
        "next()/hasNext() traversal protocol".to_string()
    });
    Some(detection)
}

pub(super) fn detect_chain_of_responsibility(class: &ClassModel) -> Option<JavaDetection> {
    let link = class.fields.iter().find(|f| {
        f.field_type.to_lowercase().contains("handler") || f.name_contains("next")
    })?;
    let handles = class
        .regular_methods()
        .any(|m| m.name_contains("handle") || m.name_contains("process"));
    if !handles {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::ChainOfResponsibility,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("successor link '{}'", link.name));
    Some(detection)
}

pub(super) fn detect_mediator(class: &ClassModel) -> Option<JavaDetection> {
    if !class.name_contains("mediator") {
        return None;
    }
    let colleagues = class.fields.iter().find(|f| {
        f.type_contains("List") || f.type_contains("Set") || f.type_contains("Collection")
    })?;
    let coordinates = class
        .regular_methods()
        .any(|m| m.name_contains("notify") || m.name_contains("mediate"));
    if !coordinates {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Mediator,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("coordinates colleagues in '{}'", colleagues.name));
    Some(detection)
}

pub(super) fn detect_memento(class: &ClassModel, classes: &[ClassModel]) -> Option<JavaDetection> {
    if !class.name_contains("memento") {
        return None;
    }
    let frozen = class
        .fields
        .iter()
        .filter(|f| f.is_private && f.is_final)
        .count();
    if frozen == 0 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Memento,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("{} immutable snapshot field(s)", frozen));
    if let Some(caretaker) = classes.iter().find(|c| c.name_contains("caretaker")) {
        detection
            .evidence
            .push(format!("caretaker class '{}' in the same unit", caretaker.name));
    }
    Some(detection)
}

pub(super) fn detect_visitor(class: &ClassModel) -> Option<JavaDetection> {
    let visits = class
        .regular_methods()
        .filter(|m| m.name.starts_with("visit"))
        .count();
    let declared = class.name_contains("visitor") && visits >= 2;
    let accepts = class.has_method_named("accept");
    if !declared && !accepts {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Visitor,
        Confidence::Low,
        Location::for_class(&class.name).with_line(class.line),
    );
    if declared {
        detection
            .evidence
            .push(format!("{} visit methods", visits));
    }
    if accepts {
        detection
            .evidence
            .push("accept() double-dispatch entry".to_string());
    }
    Some(detection)
}

pub(super) fn detect_interpreter(class: &ClassModel) -> Option<JavaDetection> {
    if !class.name_contains("expression") {
        return None;
    }
    let interprets = class
        .regular_methods()
        .find(|m| m.name_contains("interpret") || m.name_contains("evaluate"))?;

    let mut detection = JavaDetection::new(
        JavaPattern::Interpreter,
        Confidence::Low,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("expression type with '{}'", interprets.name));
    Some(detection)
}
