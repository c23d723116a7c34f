//! Naming convention rules for script units.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NamingConfig;
use crate::report::{Location, Severity, Violation};

use super::ast::{
    walk, ClassNode, DeclKind, FunctionKind, FunctionNode, MethodKind, MethodNode, ScriptAst,
    ScriptVisitor, VarDeclaratorNode,
};

static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Z][a-zA-Z0-9]*$").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-z][a-zA-Z0-9]*$").unwrap());
static UNDERSCORE_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new("_([a-z])").unwrap());

/// Naive case fold: `_x` becomes `X`, nothing else moves. Abbreviations can
/// come out wrong; the suggestion is a starting point, not a refactor.
fn fold_underscores(name: &str) -> String {
    UNDERSCORE_LOWER
        .replace_all(name, |caps: &regex::Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

pub(super) fn to_camel_case(name: &str) -> String {
    let folded = fold_underscores(name);
    let mut chars = folded.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(super) fn to_pascal_case(name: &str) -> String {
    let folded = fold_underscores(name);
    let mut chars = folded.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct NamingVisitor<'a> {
    config: &'a NamingConfig,
    violations: &'a mut Vec<Violation>,
}

impl ScriptVisitor for NamingVisitor<'_> {
    fn enter_class(&mut self, class: &ClassNode) {
        let Some(name) = &class.name else { return };
        if PASCAL_CASE.is_match(name) {
            return;
        }
        self.violations.push(
            Violation::new(
                "naming-class-pascalcase",
                "naming",
                self.config.severity,
                format!(
                    "Class name '{}' should follow {} convention",
                    name, self.config.patterns.classes
                ),
                Location::for_class(name).with_line(class.line),
            )
            .with_suggestion(format!("Rename to '{}'", to_pascal_case(name))),
        );
    }

    fn enter_function(&mut self, function: &FunctionNode) {
        // Expressions and arrows are usually named by their binding, which
        // the const-convention rule covers.
        if function.kind != FunctionKind::Declaration {
            return;
        }
        let Some(name) = &function.name else { return };
        if CAMEL_CASE.is_match(name) {
            return;
        }
        self.violations.push(
            Violation::new(
                "naming-function-camelcase",
                "naming",
                self.config.severity,
                format!(
                    "Function name '{}' should follow {} convention",
                    name, self.config.patterns.functions
                ),
                Location::at_line(function.line).with_method(name),
            )
            .with_suggestion(format!("Rename to '{}'", to_camel_case(name))),
        );
    }

    fn enter_method(&mut self, method: &MethodNode) {
        if method.kind != MethodKind::Method {
            return;
        }
        if CAMEL_CASE.is_match(&method.name) {
            return;
        }
        self.violations.push(
            Violation::new(
                "naming-method-camelcase",
                "naming",
                self.config.severity,
                format!(
                    "Method name '{}' should follow {} convention",
                    method.name, self.config.patterns.functions
                ),
                Location::at_line(method.line).with_method(&method.name),
            )
            .with_suggestion(format!("Rename to '{}'", to_camel_case(&method.name))),
        );
    }

    fn enter_declarator(&mut self, declarator: &VarDeclaratorNode) {
        if declarator.decl_kind != DeclKind::Const {
            return;
        }
        let name = &declarator.name;
        // snake_case consts are neither screaming constants nor camelCase
        // bindings. Informational regardless of the configured severity.
        if !name.contains('_') || *name == name.to_uppercase() {
            return;
        }
        self.violations.push(
            Violation::new(
                "naming-const-convention",
                "naming",
                Severity::Info,
                format!(
                    "Constant '{}' should use {} or {} naming",
                    name, self.config.patterns.constants, self.config.patterns.variables
                ),
                Location::at_line(declarator.line),
            )
            .with_suggestion(format!("Rename to '{}'", to_camel_case(name))),
        );
    }
}

pub(super) fn check(ast: &ScriptAst, config: &NamingConfig, violations: &mut Vec<Violation>) {
    let mut visitor = NamingVisitor { config, violations };
    walk(&ast.root, &mut visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ast::ScriptParser;
    use proptest::prelude::*;

    fn run(source: &str) -> Vec<Violation> {
        let mut parser = ScriptParser::new().unwrap();
        let ast = parser.parse(source).unwrap();
        let mut violations = Vec::new();
        check(&ast, &NamingConfig::default(), &mut violations);
        violations
    }

    #[test]
    fn snake_case_const_is_informational_with_rename() {
        let violations = run("const bad_snake_case = 1;");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule, "naming-const-convention");
        assert_eq!(v.severity, Severity::Info);
        assert_eq!(v.suggestion.as_deref(), Some("Rename to 'badSnakeCase'"));
        assert!(v.message.contains("UPPER_CASE"));
    }

    #[test]
    fn screaming_and_camel_consts_pass() {
        assert!(run("const MAX_RETRIES = 3;").is_empty());
        assert!(run("const apiKey = 'k';").is_empty());
        assert!(run("let lower_case = 1;").is_empty());
    }

    #[test]
    fn class_names_must_be_pascal_case() {
        let violations = run("class orderService {}");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "naming-class-pascalcase");
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(
            violations[0].suggestion.as_deref(),
            Some("Rename to 'OrderService'")
        );
        assert!(run("class OrderService {}").is_empty());
    }

    #[test]
    fn function_declarations_must_be_camel_case() {
        let violations = run("function DoWork() { return 1; }");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "naming-function-camelcase");
        assert_eq!(violations[0].suggestion.as_deref(), Some("Rename to 'doWork'"));
    }

    #[test]
    fn methods_checked_but_constructor_exempt() {
        let violations = run(
            r#"
            class Api {
                constructor() {}
                Fetch_data() { return 1; }
            }
            "#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "naming-method-camelcase");
        assert_eq!(
            violations[0].suggestion.as_deref(),
            Some("Rename to 'fetchData'")
        );
    }

    #[test]
    fn case_conversion_examples() {
        assert_eq!(to_camel_case("bad_snake_case"), "badSnakeCase");
        assert_eq!(to_pascal_case("my_class"), "MyClass");
        assert_eq!(to_camel_case("DoWork"), "doWork");
        // Uppercase after an underscore does not fold; known limitation.
        assert_eq!(to_camel_case("FOO_BAR"), "fOO_BAR");
    }

    proptest! {
        #[test]
        fn snake_case_folds_to_camel(
            segments in proptest::collection::vec("[a-z]{1,6}", 1..4)
        ) {
            let snake = segments.join("_");
            let camel = to_camel_case(&snake);
            prop_assert!(!camel.contains('_'));
            prop_assert!(camel.chars().next().unwrap().is_ascii_lowercase());
            // Folding never loses letters.
            let letters = |s: &str| s.chars().filter(|c| c.is_ascii_alphabetic()).count();
            prop_assert_eq!(letters(&snake), letters(&camel));
        }

        #[test]
        fn pascal_output_satisfies_class_rule(
            segments in proptest::collection::vec("[a-z]{1,6}", 1..4)
        ) {
            let snake = segments.join("_");
            prop_assert!(PASCAL_CASE.is_match(&to_pascal_case(&snake)));
        }
    }
}
