//! Java pattern validation.
//!
//! A tree-sitter extraction pass builds [`ClassModel`]s for every class and
//! interface in a compilation unit, then a fixed catalog of structural rules
//! runs over the models. Each rule is a pure predicate from model to optional
//! detection; configuration gates which rules run and how loudly they report.

mod architectural;
mod behavioral;
mod creational;
mod enterprise;
mod extractor;
mod modern;
mod structural;
mod types;

pub use extractor::JavaExtractor;
pub use types::{
    ClassModel, FieldModel, JavaCategory, JavaDetection, JavaPattern, MethodModel, ParameterModel,
};

use crate::config::{JavaConfig, JavaRule};
use crate::report::{Location, Severity, Violation};

/// Applies one per-class rule across the unit, skipping disabled rules.
/// Classes are visited in declaration order, which keeps output stable.
fn run_rule(
    rule: &JavaRule,
    classes: &[ClassModel],
    out: &mut Vec<JavaDetection>,
    detect: impl Fn(&ClassModel) -> Option<JavaDetection>,
) {
    if !rule.enabled {
        return;
    }
    out.extend(classes.iter().filter_map(|class| detect(class)));
}

/// Validates Java source against the pattern catalog.
pub struct JavaValidator {
    extractor: JavaExtractor,
    config: JavaConfig,
}

impl JavaValidator {
    pub fn new(config: JavaConfig) -> Result<Self, String> {
        Ok(Self {
            extractor: JavaExtractor::new()?,
            config,
        })
    }

    /// Parses, detects, and aggregates detections into violations.
    ///
    /// A parse failure yields a single sentinel violation and nothing else;
    /// no partial extraction is attempted on a malformed tree.
    pub fn validate(&mut self, source: &str, filename: &str) -> Vec<Violation> {
        let classes = match self.extractor.extract(source) {
            Ok(classes) => classes,
            Err(message) => {
                return vec![Violation::new(
                    "parse-error",
                    "parser",
                    Severity::Error,
                    format!("Failed to parse Java source: {message}"),
                    Location::default().with_file(filename),
                )
                .with_suggestion("Check the file for syntax errors")];
            }
        };
        let detections = self.detect(&classes);
        tracing::debug!(
            classes = classes.len(),
            detections = detections.len(),
            "java validation finished"
        );
        detections
            .into_iter()
            .map(|detection| self.to_violation(detection, filename))
            .collect()
    }

    /// Runs every enabled rule over the extracted class list.
    ///
    /// Output order is fixed: categories in catalog order, rules in
    /// declaration order within a category, classes in source order within a
    /// rule. Identical input always produces identical output.
    pub fn detect(&self, classes: &[ClassModel]) -> Vec<JavaDetection> {
        let rules = &self.config.rules;
        let mut out = Vec::new();

        run_rule(&rules.creational.singleton, classes, &mut out, |c| {
            creational::detect_singleton(c, &rules.creational.singleton)
        });
        run_rule(&rules.creational.builder, classes, &mut out, |c| {
            creational::detect_builder(c, classes)
        });
        run_rule(
            &rules.creational.factory_method,
            classes,
            &mut out,
            creational::detect_factory_method,
        );
        run_rule(
            &rules.creational.abstract_factory,
            classes,
            &mut out,
            creational::detect_abstract_factory,
        );
        run_rule(
            &rules.creational.prototype,
            classes,
            &mut out,
            creational::detect_prototype,
        );

        run_rule(
            &rules.structural.adapter,
            classes,
            &mut out,
            structural::detect_adapter,
        );
        run_rule(
            &rules.structural.decorator,
            classes,
            &mut out,
            structural::detect_decorator,
        );
        run_rule(
            &rules.structural.facade,
            classes,
            &mut out,
            structural::detect_facade,
        );
        run_rule(
            &rules.structural.proxy,
            classes,
            &mut out,
            structural::detect_proxy,
        );
        run_rule(
            &rules.structural.composite,
            classes,
            &mut out,
            structural::detect_composite,
        );
        run_rule(
            &rules.structural.bridge,
            classes,
            &mut out,
            structural::detect_bridge,
        );
        run_rule(
            &rules.structural.flyweight,
            classes,
            &mut out,
            structural::detect_flyweight,
        );

        run_rule(
            &rules.behavioral.observer,
            classes,
            &mut out,
            behavioral::detect_observer,
        );
        run_rule(
            &rules.behavioral.strategy,
            classes,
            &mut out,
            behavioral::detect_strategy,
        );
        run_rule(
            &rules.behavioral.template_method,
            classes,
            &mut out,
            behavioral::detect_template_method,
        );
        run_rule(
            &rules.behavioral.command,
            classes,
            &mut out,
            behavioral::detect_command,
        );
        run_rule(
            &rules.behavioral.state,
            classes,
            &mut out,
            behavioral::detect_state,
        );
        run_rule(
            &rules.behavioral.iterator,
            classes,
            &mut out,
            behavioral::detect_iterator,
        );
        run_rule(
            &rules.behavioral.chain_of_responsibility,
            classes,
            &mut out,
            behavioral::detect_chain_of_responsibility,
        );
        run_rule(
            &rules.behavioral.mediator,
            classes,
            &mut out,
            behavioral::detect_mediator,
        );
        run_rule(&rules.behavioral.memento, classes, &mut out, |c| {
            behavioral::detect_memento(c, classes)
        });
        run_rule(
            &rules.behavioral.visitor,
            classes,
            &mut out,
            behavioral::detect_visitor,
        );
        run_rule(
            &rules.behavioral.interpreter,
            classes,
            &mut out,
            behavioral::detect_interpreter,
        );

        run_rule(&rules.enterprise.dao, classes, &mut out, |c| {
            enterprise::detect_dao(c, &rules.enterprise.dao)
        });
        run_rule(&rules.enterprise.repository, classes, &mut out, |c| {
            enterprise::detect_repository(c, &rules.enterprise.repository)
        });
        run_rule(&rules.enterprise.dto, classes, &mut out, |c| {
            enterprise::detect_dto(c, &rules.enterprise.dto)
        });
        run_rule(&rules.enterprise.service_layer, classes, &mut out, |c| {
            enterprise::detect_service_layer(c, &rules.enterprise.service_layer)
        });
        run_rule(
            &rules.enterprise.value_object,
            classes,
            &mut out,
            enterprise::detect_value_object,
        );
        run_rule(
            &rules.enterprise.data_mapper,
            classes,
            &mut out,
            enterprise::detect_data_mapper,
        );
        run_rule(
            &rules.enterprise.active_record,
            classes,
            &mut out,
            enterprise::detect_active_record,
        );

        // MVC correlates classes across the unit, so it runs once rather
        // than per class.
        if rules.architectural.mvc.enabled {
            out.extend(architectural::detect_mvc(classes));
        }
        run_rule(
            &rules.architectural.front_controller,
            classes,
            &mut out,
            architectural::detect_front_controller,
        );
        run_rule(&rules.architectural.service_locator, classes, &mut out, |c| {
            architectural::detect_service_locator(c, &rules.architectural.service_locator)
        });

        run_rule(&rules.modern.dependency_injection, classes, &mut out, |c| {
            modern::detect_dependency_injection(c, &rules.modern.dependency_injection)
        });
        run_rule(
            &rules.modern.circuit_breaker,
            classes,
            &mut out,
            modern::detect_circuit_breaker,
        );
        run_rule(
            &rules.modern.event_sourcing,
            classes,
            &mut out,
            modern::detect_event_sourcing,
        );
        run_rule(&rules.modern.cqrs, classes, &mut out, modern::detect_cqrs);

        out
    }

    fn rule_for(&self, pattern: JavaPattern) -> &JavaRule {
        let rules = &self.config.rules;
        match pattern {
            JavaPattern::Singleton => &rules.creational.singleton,
            JavaPattern::Builder => &rules.creational.builder,
            JavaPattern::FactoryMethod => &rules.creational.factory_method,
            JavaPattern::AbstractFactory => &rules.creational.abstract_factory,
            JavaPattern::Prototype => &rules.creational.prototype,
            JavaPattern::Adapter => &rules.structural.adapter,
            JavaPattern::Decorator => &rules.structural.decorator,
            JavaPattern::Facade => &rules.structural.facade,
            JavaPattern::Proxy => &rules.structural.proxy,
            JavaPattern::Composite => &rules.structural.composite,
            JavaPattern::Bridge => &rules.structural.bridge,
            JavaPattern::Flyweight => &rules.structural.flyweight,
            JavaPattern::Observer => &rules.behavioral.observer,
            JavaPattern::Strategy => &rules.behavioral.strategy,
            JavaPattern::TemplateMethod => &rules.behavioral.template_method,
            JavaPattern::Command => &rules.behavioral.command,
            JavaPattern::State => &rules.behavioral.state,
            JavaPattern::Iterator => &rules.behavioral.iterator,
            JavaPattern::ChainOfResponsibility => &rules.behavioral.chain_of_responsibility,
            JavaPattern::Mediator => &rules.behavioral.mediator,
            JavaPattern::Memento => &rules.behavioral.memento,
            JavaPattern::Visitor => &rules.behavioral.visitor,
            JavaPattern::Interpreter => &rules.behavioral.interpreter,
            JavaPattern::Dao => &rules.enterprise.dao,
            JavaPattern::Repository => &rules.enterprise.repository,
            JavaPattern::Dto => &rules.enterprise.dto,
            JavaPattern::ServiceLayer => &rules.enterprise.service_layer,
            JavaPattern::ValueObject => &rules.enterprise.value_object,
            JavaPattern::DataMapper => &rules.enterprise.data_mapper,
            JavaPattern::ActiveRecord => &rules.enterprise.active_record,
            JavaPattern::Mvc => &rules.architectural.mvc,
            JavaPattern::FrontController => &rules.architectural.front_controller,
            JavaPattern::ServiceLocator => &rules.architectural.service_locator,
            JavaPattern::DependencyInjection => &rules.modern.dependency_injection,
            JavaPattern::CircuitBreaker => &rules.modern.circuit_breaker,
            JavaPattern::EventSourcing => &rules.modern.event_sourcing,
            JavaPattern::Cqrs => &rules.modern.cqrs,
        }
    }

    /// Maps a detection onto the violation dialect. Severity always comes
    /// from the rule's configuration; anti-pattern notes ride along as
    /// prefixed evidence.
    fn to_violation(&self, detection: JavaDetection, filename: &str) -> Violation {
        let severity = self.rule_for(detection.pattern).severity;
        let mut violation = Violation::new(
            &format!("pattern-{}", detection.pattern.id()),
            detection.category.as_str(),
            severity,
            format!(
                "Detected {} pattern ({}, {} confidence)",
                detection.pattern.display_name(),
                detection.category,
                detection.confidence
            ),
            detection.location.with_file(filename),
        );
        let mut evidence = detection.evidence;
        evidence.extend(
            detection
                .antipatterns
                .into_iter()
                .map(|a| format!("anti-pattern: {a}")),
        );
        if !evidence.is_empty() {
            violation = violation.with_evidence(evidence);
        }
        if !detection.suggestions.is_empty() {
            violation = violation.with_suggestion(detection.suggestions.join("; "));
        }
        violation
    }
}

impl Default for JavaValidator {
    fn default() -> Self {
        Self::new(JavaConfig::default()).expect("Failed to create Java validator")
    }
}
