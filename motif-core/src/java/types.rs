//! Java structural models and the detection catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::{Confidence, Location};

/// A class or interface extracted from a compilation unit.
///
/// Nested declarations are flattened into the same list in declaration
/// order; members attach to the nearest enclosing declaration only.
/// Constructors are carried in `methods` with a `None` return type; rule
/// predicates over "methods" use [`ClassModel::regular_methods`] so a class
/// named after a keyword never matches through its own constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassModel {
    pub name: String,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub methods: Vec<MethodModel>,
    pub fields: Vec<FieldModel>,
    /// Implemented interfaces; for interfaces, the extended interfaces.
    pub implements: Vec<String>,
    pub extends: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    pub line: u32,
}

impl ClassModel {
    /// Case-insensitive name test, the workhorse of name-substring rules.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Methods excluding constructors.
    pub fn regular_methods(&self) -> impl Iterator<Item = &MethodModel> {
        self.methods.iter().filter(|m| !m.is_constructor())
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodModel> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    pub fn has_method_named(&self, name: &str) -> bool {
        self.regular_methods().any(|m| m.name == name)
    }

    pub fn has_method_containing(&self, needle: &str) -> bool {
        self.regular_methods()
            .any(|m| m.name.to_lowercase().contains(needle))
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a == name)
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodModel {
    pub name: String,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_private: bool,
    pub is_public: bool,
    /// `None` for constructors, `Some("void")` for void methods.
    pub return_type: Option<String>,
    pub parameters: Vec<ParameterModel>,
    pub annotations: Vec<String>,
    pub line: u32,
}

impl MethodModel {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// Returns a value: a non-void, non-constructor return type.
    pub fn returns_value(&self) -> bool {
        matches!(self.return_type.as_deref(), Some(t) if t != "void")
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// A field; one model per declarator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldModel {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub is_static: bool,
    pub is_final: bool,
    pub is_private: bool,
    /// Modifier keywords plus annotation names (`["private", "Autowired"]`).
    pub modifiers: Vec<String>,
    pub line: u32,
}

impl FieldModel {
    /// Case-sensitive type-text test; generic arguments are part of the
    /// text, so `List<Observer>` matches `"List"`.
    pub fn type_contains(&self, needle: &str) -> bool {
        self.field_type.contains(needle)
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterModel {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// Rule families, in catalog scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaCategory {
    Creational,
    Structural,
    Behavioral,
    Enterprise,
    Architectural,
    Modern,
}

impl JavaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaCategory::Creational => "creational",
            JavaCategory::Structural => "structural",
            JavaCategory::Behavioral => "behavioral",
            JavaCategory::Enterprise => "enterprise",
            JavaCategory::Architectural => "architectural",
            JavaCategory::Modern => "modern",
        }
    }
}

impl fmt::Display for JavaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed Java pattern catalog, in detection order within each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JavaPattern {
    // creational
    Singleton,
    Builder,
    FactoryMethod,
    AbstractFactory,
    Prototype,
    // structural
    Adapter,
    Decorator,
    Facade,
    Proxy,
    Composite,
    Bridge,
    Flyweight,
    // behavioral
    Observer,
    Strategy,
    TemplateMethod,
    Command,
    State,
    Iterator,
    ChainOfResponsibility,
    Mediator,
    Memento,
    Visitor,
    Interpreter,
    // enterprise
    Dao,
    Repository,
    Dto,
    ServiceLayer,
    ValueObject,
    DataMapper,
    ActiveRecord,
    // architectural
    Mvc,
    FrontController,
    ServiceLocator,
    // modern
    DependencyInjection,
    CircuitBreaker,
    EventSourcing,
    Cqrs,
}

impl JavaPattern {
    /// Every pattern, in catalog order.
    pub const ALL: [JavaPattern; 37] = [
        JavaPattern::Singleton,
        JavaPattern::Builder,
        JavaPattern::FactoryMethod,
        JavaPattern::AbstractFactory,
        JavaPattern::Prototype,
        JavaPattern::Adapter,
        JavaPattern::Decorator,
        JavaPattern::Facade,
        JavaPattern::Proxy,
        JavaPattern::Composite,
        JavaPattern::Bridge,
        JavaPattern::Flyweight,
        JavaPattern::Observer,
        JavaPattern::Strategy,
        JavaPattern::TemplateMethod,
        JavaPattern::Command,
        JavaPattern::State,
        JavaPattern::Iterator,
        JavaPattern::ChainOfResponsibility,
        JavaPattern::Mediator,
        JavaPattern::Memento,
        JavaPattern::Visitor,
        JavaPattern::Interpreter,
        JavaPattern::Dao,
        JavaPattern::Repository,
        JavaPattern::Dto,
        JavaPattern::ServiceLayer,
        JavaPattern::ValueObject,
        JavaPattern::DataMapper,
        JavaPattern::ActiveRecord,
        JavaPattern::Mvc,
        JavaPattern::FrontController,
        JavaPattern::ServiceLocator,
        JavaPattern::DependencyInjection,
        JavaPattern::CircuitBreaker,
        JavaPattern::EventSourcing,
        JavaPattern::Cqrs,
    ];

    /// Stable kebab-case identifier, also used in violation rule ids.
    pub fn id(&self) -> &'static str {
        match self {
            JavaPattern::Singleton => "singleton",
            JavaPattern::Builder => "builder",
            JavaPattern::FactoryMethod => "factory-method",
            JavaPattern::AbstractFactory => "abstract-factory",
            JavaPattern::Prototype => "prototype",
            JavaPattern::Adapter => "adapter",
            JavaPattern::Decorator => "decorator",
            JavaPattern::Facade => "facade",
            JavaPattern::Proxy => "proxy",
            JavaPattern::Composite => "composite",
            JavaPattern::Bridge => "bridge",
            JavaPattern::Flyweight => "flyweight",
            JavaPattern::Observer => "observer",
            JavaPattern::Strategy => "strategy",
            JavaPattern::TemplateMethod => "template-method",
            JavaPattern::Command => "command",
            JavaPattern::State => "state",
            JavaPattern::Iterator => "iterator",
            JavaPattern::ChainOfResponsibility => "chain-of-responsibility",
            JavaPattern::Mediator => "mediator",
            JavaPattern::Memento => "memento",
            JavaPattern::Visitor => "visitor",
            JavaPattern::Interpreter => "interpreter",
            JavaPattern::Dao => "dao",
            JavaPattern::Repository => "repository",
            JavaPattern::Dto => "dto",
            JavaPattern::ServiceLayer => "service-layer",
            JavaPattern::ValueObject => "value-object",
            JavaPattern::DataMapper => "data-mapper",
            JavaPattern::ActiveRecord => "active-record",
            JavaPattern::Mvc => "mvc",
            JavaPattern::FrontController => "front-controller",
            JavaPattern::ServiceLocator => "service-locator",
            JavaPattern::DependencyInjection => "dependency-injection",
            JavaPattern::CircuitBreaker => "circuit-breaker",
            JavaPattern::EventSourcing => "event-sourcing",
            JavaPattern::Cqrs => "cqrs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            JavaPattern::Singleton => "Singleton",
            JavaPattern::Builder => "Builder",
            JavaPattern::FactoryMethod => "Factory Method",
            JavaPattern::AbstractFactory => "Abstract Factory",
            JavaPattern::Prototype => "Prototype",
            JavaPattern::Adapter => "Adapter",
            JavaPattern::Decorator => "Decorator",
            JavaPattern::Facade => "Facade",
            JavaPattern::Proxy => "Proxy",
            JavaPattern::Composite => "Composite",
            JavaPattern::Bridge => "Bridge",
            JavaPattern::Flyweight => "Flyweight",
            JavaPattern::Observer => "Observer",
            JavaPattern::Strategy => "Strategy",
            JavaPattern::TemplateMethod => "Template Method",
            JavaPattern::Command => "Command",
            JavaPattern::State => "State",
            JavaPattern::Iterator => "Iterator",
            JavaPattern::ChainOfResponsibility => "Chain of Responsibility",
            JavaPattern::Mediator => "Mediator",
            JavaPattern::Memento => "Memento",
            JavaPattern::Visitor => "Visitor",
            JavaPattern::Interpreter => "Interpreter",
            JavaPattern::Dao => "DAO",
            JavaPattern::Repository => "Repository",
            JavaPattern::Dto => "DTO",
            JavaPattern::ServiceLayer => "Service Layer",
            JavaPattern::ValueObject => "Value Object",
            JavaPattern::DataMapper => "Data Mapper",
            JavaPattern::ActiveRecord => "Active Record",
            JavaPattern::Mvc => "MVC",
            JavaPattern::FrontController => "Front Controller",
            JavaPattern::ServiceLocator => "Service Locator",
            JavaPattern::DependencyInjection => "Dependency Injection",
            JavaPattern::CircuitBreaker => "Circuit Breaker",
            JavaPattern::EventSourcing => "Event Sourcing",
            JavaPattern::Cqrs => "CQRS",
        }
    }

    pub fn category(&self) -> JavaCategory {
        match self {
            JavaPattern::Singleton
            | JavaPattern::Builder
            | JavaPattern::FactoryMethod
            | JavaPattern::AbstractFactory
            | JavaPattern::Prototype => JavaCategory::Creational,
            JavaPattern::Adapter
            | JavaPattern::Decorator
            | JavaPattern::Facade
            | JavaPattern::Proxy
            | JavaPattern::Composite
            | JavaPattern::Bridge
            | JavaPattern::Flyweight => JavaCategory::Structural,
            JavaPattern::Observer
            | JavaPattern::Strategy
            | JavaPattern::TemplateMethod
            | JavaPattern::Command
            | JavaPattern::State
            | JavaPattern::Iterator
            | JavaPattern::ChainOfResponsibility
            | JavaPattern::Mediator
            | JavaPattern::Memento
            | JavaPattern::Visitor
            | JavaPattern::Interpreter => JavaCategory::Behavioral,
            JavaPattern::Dao
            | JavaPattern::Repository
            | JavaPattern::Dto
            | JavaPattern::ServiceLayer
            | JavaPattern::ValueObject
            | JavaPattern::DataMapper
            | JavaPattern::ActiveRecord => JavaCategory::Enterprise,
            JavaPattern::Mvc | JavaPattern::FrontController | JavaPattern::ServiceLocator => {
                JavaCategory::Architectural
            }
            JavaPattern::DependencyInjection
            | JavaPattern::CircuitBreaker
            | JavaPattern::EventSourcing
            | JavaPattern::Cqrs => JavaCategory::Modern,
        }
    }

    /// One-line description for catalog listings.
    pub fn summary(&self) -> &'static str {
        match self {
            JavaPattern::Singleton => "Single shared instance behind a private constructor",
            JavaPattern::Builder => "Fluent step-by-step object construction",
            JavaPattern::FactoryMethod => "Static methods that create and return instances",
            JavaPattern::AbstractFactory => "Abstract type declaring families of create methods",
            JavaPattern::Prototype => "Cloneable objects copied from a prototype instance",
            JavaPattern::Adapter => "Wraps another type behind an expected interface",
            JavaPattern::Decorator => "Extends behavior by wrapping the same supertype",
            JavaPattern::Facade => "Single entry point coordinating several subsystems",
            JavaPattern::Proxy => "Stand-in controlling access to a wrapped implementation",
            JavaPattern::Composite => "Tree of parts addressed through one interface",
            JavaPattern::Bridge => "Abstraction holding a separate implementation hierarchy",
            JavaPattern::Flyweight => "Shared instances cached behind a static lookup",
            JavaPattern::Observer => "Registered listeners notified of state changes",
            JavaPattern::Strategy => "Interchangeable algorithm behind one interface",
            JavaPattern::TemplateMethod => "Abstract skeleton with overridable steps",
            JavaPattern::Command => "Requests reified as executable objects",
            JavaPattern::State => "Behavior delegated to a swappable state object",
            JavaPattern::Iterator => "Sequential access via next/hasNext",
            JavaPattern::ChainOfResponsibility => "Handlers passing requests along a chain",
            JavaPattern::Mediator => "Central coordinator between colleague objects",
            JavaPattern::Memento => "Captured snapshots of private state",
            JavaPattern::Visitor => "Double-dispatch operations over an object structure",
            JavaPattern::Interpreter => "Expression objects evaluating a small language",
            JavaPattern::Dao => "Data-access type exposing CRUD operations",
            JavaPattern::Repository => "Collection-style access to domain aggregates",
            JavaPattern::Dto => "Accessor-only data carrier without business logic",
            JavaPattern::ServiceLayer => "Stateless service exposing business operations",
            JavaPattern::ValueObject => "Immutable value with equals/hashCode identity",
            JavaPattern::DataMapper => "Maps between domain objects and records",
            JavaPattern::ActiveRecord => "Domain object that persists itself",
            JavaPattern::Mvc => "Controllers and models split across the unit",
            JavaPattern::FrontController => "Single dispatch point for incoming requests",
            JavaPattern::ServiceLocator => "Central registry used to look up services",
            JavaPattern::DependencyInjection => "Dependencies supplied from outside",
            JavaPattern::CircuitBreaker => "Guards calls with open/closed failure states",
            JavaPattern::EventSourcing => "State rebuilt by applying recorded events",
            JavaPattern::Cqrs => "Write-only command types split from read-side queries",
        }
    }
}

/// A positively identified pattern usage with its supporting evidence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaDetection {
    pub pattern: JavaPattern,
    pub category: JavaCategory,
    pub confidence: Confidence,
    pub location: Location,
    pub evidence: Vec<String>,
    pub antipatterns: Vec<String>,
    pub suggestions: Vec<String>,
}

impl JavaDetection {
    pub(crate) fn new(pattern: JavaPattern, confidence: Confidence, location: Location) -> Self {
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
    fn catalog_ids_are_kebab_case_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for pattern in JavaPattern::ALL {
            let id = pattern.id();
            assert!(seen.insert(id), "duplicate id {id}");
            assert!(!id.contains(' ') && id.to_lowercase() == id);
        }
    }

    #[test]
    fn serde_id_matches_id_method() {
        let json = serde_json::to_string(&JavaPattern::ChainOfResponsibility).unwrap();
        assert_eq!(json, "\"chain-of-responsibility\"");
        let json = serde_json::to_string(&JavaPattern::Cqrs).unwrap();
        assert_eq!(json, "\"cqrs\"");
    }

    #[test]
    fn catalog_is_grouped_by_category_in_scan_order() {
        let categories: Vec<JavaCategory> = JavaPattern::ALL.iter().map(|p| p.category()).collect();
        let mut deduped = categories.clone();
        deduped.dedup();
        assert_eq!(
            deduped,
            vec![
                JavaCategory::Creational,
                JavaCategory::Structural,
                JavaCategory::Behavioral,
                JavaCategory::Enterprise,
                JavaCategory::Architectural,
                JavaCategory::Modern,
            ]
        );
    }

    #[test]
    fn constructor_modeling() {
        let ctor = MethodModel {
            name: "Widget".to_string(),
            is_abstract: false,
            is_static: false,
            is_private: true,
            is_public: false,
            return_type: None,
            parameters: vec![],
            annotations: vec![],
            line: 3,
        };
        assert!(ctor.is_constructor());
        assert!(!ctor.returns_value());
    }
}
