//! Enterprise pattern rules: DAO, repository, DTO, service layer, value
//! object, data mapper, active record.

use crate::config::JavaRule;
use crate::report::{Confidence, Location};

use super::types::{ClassModel, JavaDetection, JavaPattern, MethodModel};

/// Scores a class on the four CRUD axes. "save" is an exact-name match and
/// counts toward both create and update; a save-style upsert satisfies both.
fn crud_count(class: &ClassModel) -> u32 {
    let is_save = |m: &MethodModel| m.name == "save";
    let creates = class
        .regular_methods()
        .any(|m| m.name_contains("create") || m.name_contains("insert") || is_save(m));
    let reads = class
        .regular_methods()
        .any(|m| m.name_contains("read") || m.name_contains("find") || m.name_contains("get"));
    let updates = class
        .regular_methods()
        .any(|m| m.name_contains("update") || is_save(m));
    let deletes = class
        .regular_methods()
        .any(|m| m.name_contains("delete") || m.name_contains("remove"));
    [creates, reads, updates, deletes]
        .iter()
        .filter(|present| **present)
        .count() as u32
}

pub(super) fn detect_dao(class: &ClassModel, rule: &JavaRule) -> Option<JavaDetection> {
    if !class.name_contains("dao") && !class.name_contains("dataaccess") {
        return None;
    }
    let crud = crud_count(class);
    if crud < 3 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Dao,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("covers {} of 4 CRUD operations", crud));
    if rule.detect_antipatterns && !class.is_interface {
        detection
            .antipatterns
            .push("concrete DAO class; extract an interface".to_string());
    }
    Some(detection)
}

pub(super) fn detect_repository(class: &ClassModel, rule: &JavaRule) -> Option<JavaDetection> {
    let named = class.name_contains("repository");
    let framework_parent = class
        .extends
        .as_deref()
        .is_some_and(|parent| parent.contains("Repository"))
        || class.implements.iter().any(|i| i.contains("Repository"));
    if !named && !framework_parent {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Repository,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    if named {
        detection
            .evidence
            .push("class name indicates a repository".to_string());
    }
    if framework_parent {
        detection
            .evidence
            .push("extends a framework repository type".to_string());
    }
    let domain: Vec<&str> = class
        .regular_methods()
        .filter(|m| {
            m.name.starts_with("findBy")
                || m.name.starts_with("getBy")
                || m.name == "save"
                || m.name_contains("delete")
        })
        .map(|m| m.name.as_str())
        .collect();
    if !domain.is_empty() {
        detection
            .evidence
            .push(format!("domain query methods: {}", domain.join(", ")));
    }
    if rule.detect_antipatterns && !class.is_interface && !framework_parent {
        detection
            .antipatterns
            .push("concrete repository without a framework supertype".to_string());
    }
    Some(detection)
}

fn is_accessor(m: &MethodModel) -> bool {
    m.name.starts_with("get") || m.name.starts_with("set") || m.name.starts_with("is")
}

fn is_object_contract(m: &MethodModel) -> bool {
    matches!(m.name.as_str(), "toString" | "hashCode" | "equals")
}

pub(super) fn detect_dto(class: &ClassModel, rule: &JavaRule) -> Option<JavaDetection> {
    if class.fields.is_empty() {
        return None;
    }
    let business_logic: Vec<&str> = class
        .regular_methods()
        .filter(|m| !is_accessor(m) && !is_object_contract(m))
        .map(|m| m.name.as_str())
        .collect();
    let named = class.name_contains("dto") || class.name_contains("data");
    let accessor_shape = class.fields.len() >= 2
        && business_logic.is_empty()
        && class.regular_methods().all(|m| is_accessor(m) || is_object_contract(m));
    if !named && !accessor_shape {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::Dto,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    if named {
        detection
            .evidence
            .push("class name indicates a transfer object".to_string());
    }
    if accessor_shape {
        detection.evidence.push(format!(
            "{} fields exposed through accessors only",
            class.fields.len()
        ));
    }
    if rule.detect_antipatterns && !business_logic.is_empty() {
        detection.antipatterns.push(format!(
            "business logic in a transfer object: {}",
            business_logic.join(", ")
        ));
    }
    Some(detection)
}

pub(super) fn detect_service_layer(class: &ClassModel, rule: &JavaRule) -> Option<JavaDetection> {
    let named = class.name_contains("service") || class.has_annotation("Service");
    if !named {
        return None;
    }
    let operations = class
        .regular_methods()
        .filter(|m| m.is_public && !m.is_static)
        .count();
    if operations < 2 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::ServiceLayer,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("{} public service operations", operations));
    if class.has_annotation("Service") {
        detection.evidence.push("@Service annotation".to_string());
    }
    if rule.detect_antipatterns {
        if let Some(mutable) = class
            .fields
            .iter()
            .find(|f| !f.is_final && !f.is_static)
        {
            detection.antipatterns.push(format!(
                "mutable service state in field '{}'",
                mutable.name
            ));
        }
        if let Some(dao) = class
            .fields
            .iter()
            .find(|f| f.field_type.to_lowercase().contains("dao"))
        {
            detection.antipatterns.push(format!(
                "direct DAO dependency '{}'; prefer a repository seam",
                dao.name
            ));
        }
    }
    Some(detection)
}

pub(super) fn detect_value_object(class: &ClassModel) -> Option<JavaDetection> {
    if class.fields.is_empty() {
        return None;
    }
    let immutable = class.fields.iter().all(|f| f.is_final || f.is_static);
    let identity = class.has_method_named("equals") && class.has_method_named("hashCode");
    let no_setters = !class.regular_methods().any(|m| m.name.starts_with("set"));
    if !immutable || !identity || !no_setters {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::ValueObject,
        Confidence::High,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection.evidence.push(format!(
        "{} immutable field(s) with value equality",
        class.fields.len()
    ));
    Some(detection)
}

pub(super) fn detect_data_mapper(class: &ClassModel) -> Option<JavaDetection> {
    if !class.name_contains("mapper") {
        return None;
    }
    let mappings: Vec<&str> = class
        .regular_methods()
        .filter(|m| m.name_contains("map") || m.name_contains("to") || m.name_contains("from"))
        .map(|m| m.name.as_str())
        .collect();
    if mappings.len() < 2 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::DataMapper,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push(format!("mapping methods: {}", mappings.join(", ")));
    Some(detection)
}

pub(super) fn detect_active_record(class: &ClassModel) -> Option<JavaDetection> {
    if class.fields.is_empty() {
        return None;
    }
    let persists_itself = class
        .regular_methods()
        .any(|m| m.name == "save" && !m.is_static);
    if !persists_itself || crud_count(class) < 2 {
        return None;
    }

    let mut detection = JavaDetection::new(
        JavaPattern::ActiveRecord,
        Confidence::Medium,
        Location::for_class(&class.name).with_line(class.line),
    );
    detection
        .evidence
        .push("entity persists itself through save()".to_string());
    Some(detection)
}
