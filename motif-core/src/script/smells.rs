//! Size thresholds and code smells for script units.
//!
//! Threshold rules compare structural sizes against the configured limits;
//! smell rules work line-wise over the raw source. Each rule fires
//! independently, so one oversized function can collect several violations.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::ScriptConfig;
use crate::report::{Location, Severity, Violation};

use super::ast::{
    walk, ClassNode, FunctionNode, IdentNode, IdentifierRole, MethodNode, ScriptAst,
    ScriptVisitor, VarDeclaratorNode,
};

struct ThresholdVisitor<'a> {
    config: &'a ScriptConfig,
    violations: &'a mut Vec<Violation>,
}

impl ThresholdVisitor<'_> {
    fn check_parameters(&mut self, label: &str, name: Option<&str>, count: u32, line: u32) {
        if count <= self.config.solid.max_parameters {
            return;
        }
        let shown = name.unwrap_or("anonymous function");
        let mut location = Location::at_line(line);
        if let Some(name) = name {
            location = location.with_method(name);
        }
        self.violations.push(
            Violation::new(
                "solid-too-many-parameters",
                "solid",
                self.config.solid.severity,
                format!(
                    "{} '{}' has {} parameters (max {})",
                    label, shown, count, self.config.solid.max_parameters
                ),
                location,
            )
            .with_suggestion("Group related parameters into an options object"),
        );
    }

    fn check_length(&mut self, rule: &str, label: &str, name: Option<&str>, line: u32, end_line: u32) {
        if !self.config.code_smells.detect_long_methods {
            return;
        }
        let lines = end_line.saturating_sub(line);
        if lines <= self.config.solid.max_function_lines {
            return;
        }
        let shown = name.unwrap_or("anonymous function");
        let mut location = Location::at_line(line);
        if let Some(name) = name {
            location = location.with_method(name);
        }
        self.violations.push(
            Violation::new(
                rule,
                "solid",
                self.config.solid.severity,
                format!(
                    "{} '{}' spans {} lines (max {})",
                    label, shown, lines, self.config.solid.max_function_lines
                ),
                location,
            )
            .with_suggestion("Split it into smaller functions"),
        );
    }
}

impl ScriptVisitor for ThresholdVisitor<'_> {
    fn enter_class(&mut self, class: &ClassNode) {
        if !self.config.code_smells.detect_god_classes {
            return;
        }
        let methods = class.method_count() as u32;
        if methods <= self.config.solid.max_class_methods {
            return;
        }
        let name = class.name.as_deref().unwrap_or("anonymous class");
        self.violations.push(
            Violation::new(
                "solid-god-class",
                "solid",
                self.config.solid.severity,
                format!(
                    "Class '{}' has {} methods (max {})",
                    name, methods, self.config.solid.max_class_methods
                ),
                Location::for_class(name).with_line(class.line),
            )
            .with_suggestion("Split responsibilities across smaller classes"),
        );
    }

    fn enter_function(&mut self, function: &FunctionNode) {
        let name = function.name.as_deref();
        self.check_parameters("Function", name, function.param_count, function.line);
        self.check_length(
            "solid-function-too-long",
            "Function",
            name,
            function.line,
            function.end_line,
        );
    }

    fn enter_method(&mut self, method: &MethodNode) {
        self.check_parameters("Method", Some(&method.name), method.param_count, method.line);
        self.check_length(
            "solid-method-too-long",
            "Method",
            Some(&method.name),
            method.line,
            method.end_line,
        );
    }
}

/// Pass 1 records declarations in order, pass 2 marks reference uses; both
/// happen in a single walk because hooks are independent.
#[derive(Default)]
struct UnusedVisitor {
    declared: Vec<(String, u32)>,
    used: FxHashSet<String>,
}

impl ScriptVisitor for UnusedVisitor {
    fn enter_declarator(&mut self, declarator: &VarDeclaratorNode) {
        self.declared.push((declarator.name.clone(), declarator.line));
    }

    fn enter_ident(&mut self, ident: &IdentNode) {
        if ident.role == IdentifierRole::Reference {
            self.used.insert(ident.name.clone());
        }
    }
}

fn check_unused(ast: &ScriptAst, config: &ScriptConfig, violations: &mut Vec<Violation>) {
    let mut visitor = UnusedVisitor::default();
    walk(&ast.root, &mut visitor);

    let mut reported: FxHashSet<&str> = FxHashSet::default();
    for (name, line) in &visitor.declared {
        if visitor.used.contains(name) || !reported.insert(name) {
            continue;
        }
        violations.push(
            Violation::new(
                "smell-unused-variable",
                "codeSmells",
                config.code_smells.severity,
                format!("Variable '{}' is declared but never used", name),
                Location::at_line(*line),
            )
            .with_suggestion("Remove the unused declaration"),
        );
    }
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('*') || line.starts_with("/*")
}

/// Line-based duplication, not an AST clone detector. Trimmed non-comment
/// lines over 20 characters are grouped by exact text; a group needs more
/// than 2 occurrences to report.
fn check_duplication(source: &str, violations: &mut Vec<Violation>) {
    let mut groups: FxHashMap<&str, Vec<u32>> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.len() <= 20 || is_comment_line(line) {
            continue;
        }
        if !groups.contains_key(line) {
            order.push(line);
        }
        groups.entry(line).or_default().push(idx as u32 + 1);
    }

    for key in order {
        let occurrences = &groups[key];
        if occurrences.len() <= 2 {
            continue;
        }
        let lines: Vec<String> = occurrences.iter().map(|l| l.to_string()).collect();
        violations.push(
            Violation::new(
                "smell-duplicate-code",
                "codeSmells",
                Severity::Info,
                format!(
                    "Same line appears {} times (lines {})",
                    occurrences.len(),
                    lines.join(", ")
                ),
                Location::at_line(occurrences[0]),
            )
            .with_evidence(vec![key.to_string()])
            .with_suggestion("Extract the repeated logic into a helper"),
        );
    }
}

fn check_comment_density(source: &str, violations: &mut Vec<Violation>) {
    let mut code_lines = 0u32;
    let mut comment_lines = 0u32;
    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if is_comment_line(line) {
            comment_lines += 1;
        } else {
            code_lines += 1;
        }
    }
    if code_lines > 50 && f64::from(comment_lines) < f64::from(code_lines) * 0.05 {
        violations.push(
            Violation::new(
                "smell-sparse-comments",
                "codeSmells",
                Severity::Info,
                format!(
                    "{} comment line(s) across {} code lines",
                    comment_lines, code_lines
                ),
                Location::default(),
            )
            .with_suggestion("Document the non-obvious parts"),
        );
    }
}

pub(super) fn check(
    ast: &ScriptAst,
    source: &str,
    config: &ScriptConfig,
    violations: &mut Vec<Violation>,
) {
    if config.solid.enabled {
        let mut thresholds = ThresholdVisitor { config, violations };
        walk(&ast.root, &mut thresholds);
    }

    if config.code_smells.enabled {
        if config.code_smells.detect_dead_code {
            check_unused(ast, config, violations);
        }
        if config.code_smells.detect_duplication {
            check_duplication(source, violations);
        }
        check_comment_density(source, violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ast::{FunctionKind, FunctionNode, ScriptNode, ScriptParser};
    use proptest::prelude::*;

    fn run(source: &str) -> Vec<Violation> {
        run_with(source, &ScriptConfig::default())
    }

    fn run_with(source: &str, config: &ScriptConfig) -> Vec<Violation> {
        let mut parser = ScriptParser::new().unwrap();
        let ast = parser.parse(source).unwrap();
        let mut violations = Vec::new();
        check(&ast, source, config, &mut violations);
        violations
    }

    fn rules(violations: &[Violation], rule: &str) -> usize {
        violations.iter().filter(|v| v.rule == rule).count()
    }

    #[test]
    fn god_class_cites_the_method_count() {
        let methods: String = (0..11).map(|i| format!("    m{}() {{}}\n", i)).collect();
        let source = format!("class Everything {{\n{}}}\n", methods);
        let violations = run(&source);
        assert_eq!(rules(&violations, "solid-god-class"), 1);
        let v = violations
            .iter()
            .find(|v| v.rule == "solid-god-class")
            .unwrap();
        assert!(v.message.contains("11 methods"));
        assert_eq!(v.location.class_name.as_deref(), Some("Everything"));
    }

    #[test]
    fn ten_methods_is_still_fine() {
        let methods: String = (0..10).map(|i| format!("    m{}() {{}}\n", i)).collect();
        let source = format!("class Everything {{\n{}}}\n", methods);
        assert_eq!(rules(&run(&source), "solid-god-class"), 0);
    }

    #[test]
    fn parameter_threshold_applies_to_functions_and_methods() {
        let source = r#"
            function wide(a, b, c, d, e, f) { return a; }
            class Api {
                narrow(a, b) { return a; }
                wideMethod(a, b, c, d, e, f) { return a; }
            }
        "#;
        let violations = run(source);
        assert_eq!(rules(&violations, "solid-too-many-parameters"), 2);
        assert!(violations
            .iter()
            .any(|v| v.message.starts_with("Function 'wide'")));
        assert!(violations
            .iter()
            .any(|v| v.message.starts_with("Method 'wideMethod'")));
    }

    #[test]
    fn long_function_reported_once() {
        let body = "    work();\n".repeat(55);
        let source = format!("function long() {{\n{}}}\n", body);
        let violations = run(&source);
        assert_eq!(rules(&violations, "solid-function-too-long"), 1);
        assert_eq!(rules(&violations, "solid-method-too-long"), 0);
    }

    #[test]
    fn long_method_reported_as_method_not_function() {
        let body = "        work();\n".repeat(55);
        let source = format!("class Job {{\n    run() {{\n{}    }}\n}}\n", body);
        let violations = run(&source);
        assert_eq!(rules(&violations, "solid-method-too-long"), 1);
        assert_eq!(rules(&violations, "solid-function-too-long"), 0);
    }

    #[test]
    fn unused_variable_reported_at_declaration() {
        let source = r#"
            const used = 1;
            const unused = 2;
            console.log(used);
        "#;
        let violations = run(source);
        assert_eq!(rules(&violations, "smell-unused-variable"), 1);
        let v = violations
            .iter()
            .find(|v| v.rule == "smell-unused-variable")
            .unwrap();
        assert!(v.message.contains("'unused'"));
        assert_eq!(v.location.line, Some(3));
    }

    #[test]
    fn reassignment_counts_as_use() {
        let source = "let counter = 0; counter = 5;";
        assert_eq!(rules(&run(source), "smell-unused-variable"), 0);
    }

    #[test]
    fn dead_code_toggle_silences_unused() {
        let mut config = ScriptConfig::default();
        config.code_smells.detect_dead_code = false;
        let violations = run_with("const unused = 2;", &config);
        assert_eq!(rules(&violations, "smell-unused-variable"), 0);
    }

    #[test]
    fn duplication_needs_three_occurrences() {
        let line = "const resultValue = computeEverything(input);";
        let twice = format!("{}\n{}\n", line, line);
        assert_eq!(rules(&run(&twice), "smell-duplicate-code"), 0);

        let thrice = format!("{}\n{}\n{}\n", line, line, line);
        let violations = run(&thrice);
        assert_eq!(rules(&violations, "smell-duplicate-code"), 1);
        let v = violations
            .iter()
            .find(|v| v.rule == "smell-duplicate-code")
            .unwrap();
        assert!(v.message.contains("lines 1, 2, 3"));
        assert_eq!(v.location.line, Some(1));
    }

    #[test]
    fn sparse_comments_flagged_on_large_units() {
        let code = "work();\n".repeat(60);
        let violations = run(&code);
        assert_eq!(rules(&violations, "smell-sparse-comments"), 1);

        let commented = format!("// explains the loop\n// and the batching\n// and the retries\n{}", code);
        assert_eq!(rules(&run(&commented), "smell-sparse-comments"), 0);
    }

    proptest! {
        #[test]
        fn parameter_threshold_is_exact(count in 0u32..12) {
            let config = ScriptConfig::default();
            let ast = ScriptAst {
                root: vec![ScriptNode::Function(FunctionNode {
                    name: Some("probe".to_string()),
                    kind: FunctionKind::Declaration,
                    line: 1,
                    end_line: 2,
                    param_count: count,
                    children: vec![],
                })],
            };
            let mut violations = Vec::new();
            check(&ast, "", &config, &mut violations);
            let flagged = violations.iter().any(|v| v.rule == "solid-too-many-parameters");
            prop_assert_eq!(flagged, count > config.solid.max_parameters);
        }
    }
}
