//! Script parsing into a closed structural AST.
//!
//! The TypeScript grammar parses plain JavaScript too, so one parser covers
//! both script languages. Only the node shapes the rules care about are
//! modeled; everything else collapses into [`ScriptNode::Other`] so visitors
//! still reach every identifier underneath.

use tree_sitter::{Node, Parser, Point};

/// How an identifier occurrence is used at its site.
///
/// Only `Reference` occurrences count as uses in dead-code analysis;
/// property keys, member accesses and labels name things without using a
/// binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierRole {
    Reference,
    PropertyKey,
    MemberProperty,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Getter,
    Setter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Const,
    Let,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    pub name: Option<String>,
    pub line: u32,
    pub members: Vec<ScriptNode>,
}

impl ClassNode {
    /// Non-constructor method members, the count god-class rules use.
    pub fn method_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| {
                matches!(m, ScriptNode::Method(method) if method.kind == MethodKind::Method)
            })
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub name: Option<String>,
    pub kind: FunctionKind,
    pub line: u32,
    pub end_line: u32,
    pub param_count: u32,
    pub children: Vec<ScriptNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    pub name: String,
    pub kind: MethodKind,
    pub line: u32,
    pub end_line: u32,
    pub param_count: u32,
    pub children: Vec<ScriptNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaratorNode {
    pub name: String,
    pub decl_kind: DeclKind,
    pub line: u32,
    /// Initializer subtree, when the declarator has one.
    pub init: Vec<ScriptNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentNode {
    pub name: String,
    pub role: IdentifierRole,
    pub line: u32,
}

/// Closed node alphabet for script rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptNode {
    Class(ClassNode),
    Function(FunctionNode),
    Method(MethodNode),
    VarDeclarator(VarDeclaratorNode),
    Ident(IdentNode),
    /// Structure the rules do not model; children remain reachable.
    Other(Vec<ScriptNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptAst {
    pub root: Vec<ScriptNode>,
}

/// Structural visitor over a [`ScriptAst`].
///
/// `walk` drives the recursion; implementors override only the hooks they
/// need. Hooks fire before the node's children are walked.
pub trait ScriptVisitor {
    fn enter_class(&mut self, _class: &ClassNode) {}
    fn enter_function(&mut self, _function: &FunctionNode) {}
    fn enter_method(&mut self, _method: &MethodNode) {}
    fn enter_declarator(&mut self, _declarator: &VarDeclaratorNode) {}
    fn enter_ident(&mut self, _ident: &IdentNode) {}
}

pub fn walk<V: ScriptVisitor>(nodes: &[ScriptNode], visitor: &mut V) {
    for node in nodes {
        match node {
            ScriptNode::Class(class) => {
                visitor.enter_class(class);
                walk(&class.members, visitor);
            }
            ScriptNode::Function(function) => {
                visitor.enter_function(function);
                walk(&function.children, visitor);
            }
            ScriptNode::Method(method) => {
                visitor.enter_method(method);
                walk(&method.children, visitor);
            }
            ScriptNode::VarDeclarator(declarator) => {
                visitor.enter_declarator(declarator);
                walk(&declarator.init, visitor);
            }
            ScriptNode::Ident(ident) => visitor.enter_ident(ident),
            ScriptNode::Other(children) => walk(children, visitor),
        }
    }
}

/// Script parser
pub struct ScriptParser {
    parser: Parser,
}

impl ScriptParser {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| format!("Failed to set language: {}", e))?;
        Ok(Self { parser })
    }

    /// Parse a whole unit. A tree with syntax errors fails as a whole; no
    /// partial AST is returned.
    pub fn parse(&mut self, source: &str) -> Result<ScriptAst, String> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| "parser produced no tree".to_string())?;
        let root = tree.root_node();
        if root.has_error() {
            let detail = match first_error(root) {
                Some(point) => format!(
                    "syntax error at line {}, column {}",
                    point.row + 1,
                    point.column + 1
                ),
                None => "syntax error".to_string(),
            };
            return Err(detail);
        }

        let mut nodes = Vec::new();
        build_children(root, source.as_bytes(), &mut nodes);
        Ok(ScriptAst { root: nodes })
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new().expect("Failed to create script parser")
    }
}

fn build_children(node: Node, source: &[u8], out: &mut Vec<ScriptNode>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        build_node(child, source, out);
    }
}

fn build_node(node: Node, source: &[u8], out: &mut Vec<ScriptNode>) {
    match node.kind() {
        "comment" => {}
        "class_declaration" | "abstract_class_declaration" | "class" => {
            let mut members = Vec::new();
            if let Some(body) = node.child_by_field_name("body") {
                build_children(body, source, &mut members);
            }
            out.push(ScriptNode::Class(ClassNode {
                name: node
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source)),
                line: line_of(node),
                members,
            }));
        }
        "function_declaration" | "generator_function_declaration" => {
            out.push(build_function(node, source, FunctionKind::Declaration));
        }
        "function_expression" | "function" | "generator_function" => {
            out.push(build_function(node, source, FunctionKind::Expression));
        }
        "arrow_function" => {
            out.push(build_function(node, source, FunctionKind::Arrow));
        }
        "method_definition" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(n, source))
                .unwrap_or_default();
            let kind = if name == "constructor" {
                MethodKind::Constructor
            } else if has_token(node, "get") {
                MethodKind::Getter
            } else if has_token(node, "set") {
                MethodKind::Setter
            } else {
                MethodKind::Method
            };
            let mut children = Vec::new();
            if let Some(params) = node.child_by_field_name("parameters") {
                build_children(params, source, &mut children);
            }
            if let Some(body) = node.child_by_field_name("body") {
                build_children(body, source, &mut children);
            }
            out.push(ScriptNode::Method(MethodNode {
                name,
                kind,
                line: line_of(node),
                end_line: node.end_position().row as u32 + 1,
                param_count: count_params(node),
                children,
            }));
        }
        "lexical_declaration" | "variable_declaration" => {
            let decl_kind = match node.child(0).map(|c| c.kind()) {
                Some("let") => DeclKind::Let,
                Some("var") => DeclKind::Var,
                _ => DeclKind::Const,
            };
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let name_node = declarator.child_by_field_name("name");
                match name_node {
                    Some(name) if name.kind() == "identifier" => {
                        let mut init = Vec::new();
                        if let Some(value) = declarator.child_by_field_name("value") {
                            build_node(value, source, &mut init);
                        }
                        out.push(ScriptNode::VarDeclarator(VarDeclaratorNode {
                            name: node_text(name, source),
                            decl_kind,
                            line: line_of(declarator),
                            init,
                        }));
                    }
                    // Destructured declarators are walked generically; their
                    // pattern names surface as plain references and are never
                    // reported unused.
                    _ => build_children(declarator, source, out),
                }
            }
        }
        "member_expression" => {
            if let Some(object) = node.child_by_field_name("object") {
                build_node(object, source, out);
            }
            if let Some(property) = node.child_by_field_name("property") {
                out.push(ScriptNode::Ident(IdentNode {
                    name: node_text(property, source),
                    role: IdentifierRole::MemberProperty,
                    line: line_of(property),
                }));
            }
        }
        "identifier" | "shorthand_property_identifier" | "shorthand_property_identifier_pattern" => {
            out.push(ScriptNode::Ident(IdentNode {
                name: node_text(node, source),
                role: IdentifierRole::Reference,
                line: line_of(node),
            }));
        }
        "property_identifier" => {
            out.push(ScriptNode::Ident(IdentNode {
                name: node_text(node, source),
                role: IdentifierRole::PropertyKey,
                line: line_of(node),
            }));
        }
        "statement_identifier" => {
            out.push(ScriptNode::Ident(IdentNode {
                name: node_text(node, source),
                role: IdentifierRole::Label,
                line: line_of(node),
            }));
        }
        _ => {
            let mut children = Vec::new();
            build_children(node, source, &mut children);
            if !children.is_empty() {
                out.push(ScriptNode::Other(children));
            }
        }
    }
}

fn build_function(node: Node, source: &[u8], kind: FunctionKind) -> ScriptNode {
    let name_node = node.child_by_field_name("name");
    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        // The function's own name is structural, not a reference.
        if Some(child.id()) == name_node.map(|n| n.id()) {
            continue;
        }
        build_node(child, source, &mut children);
    }
    ScriptNode::Function(FunctionNode {
        name: name_node.map(|n| node_text(n, source)),
        kind,
        line: line_of(node),
        end_line: node.end_position().row as u32 + 1,
        param_count: count_params(node),
        children,
    })
}

/// Arrow functions with a single bare parameter use a `parameter` field
/// instead of a parenthesized list.
fn count_params(node: Node) -> u32 {
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        return params
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .count() as u32;
    }
    if node.child_by_field_name("parameter").is_some() {
        return 1;
    }
    0
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == token);
    found
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

fn first_error(node: Node) -> Option<Point> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(point) = first_error(child) {
                return Some(point);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collector {
        classes: Vec<String>,
        functions: Vec<(Option<String>, FunctionKind, u32)>,
        methods: Vec<(String, MethodKind)>,
        declarators: Vec<(String, DeclKind)>,
        references: Vec<String>,
        keys: Vec<String>,
        labels: Vec<String>,
    }

    impl ScriptVisitor for Collector {
        fn enter_class(&mut self, class: &ClassNode) {
            self.classes.push(class.name.clone().unwrap_or_default());
        }
        fn enter_function(&mut self, function: &FunctionNode) {
            self.functions
                .push((function.name.clone(), function.kind, function.param_count));
        }
        fn enter_method(&mut self, method: &MethodNode) {
            self.methods.push((method.name.clone(), method.kind));
        }
        fn enter_declarator(&mut self, declarator: &VarDeclaratorNode) {
            self.declarators
                .push((declarator.name.clone(), declarator.decl_kind));
        }
        fn enter_ident(&mut self, ident: &IdentNode) {
            match ident.role {
                IdentifierRole::Reference => self.references.push(ident.name.clone()),
                IdentifierRole::PropertyKey | IdentifierRole::MemberProperty => {
                    self.keys.push(ident.name.clone())
                }
                IdentifierRole::Label => self.labels.push(ident.name.clone()),
            }
        }
    }

    fn collect(source: &str) -> Collector {
        let mut parser = ScriptParser::new().unwrap();
        let ast = parser.parse(source).unwrap();
        let mut collector = Collector::default();
        walk(&ast.root, &mut collector);
        collector
    }

    #[test]
    fn models_classes_functions_and_declarations() {
        let c = collect(
            r#"
            class Order {
                constructor(total) { this.total = total; }
                get total() { return this._total; }
                ship() { return this.total; }
            }
            function process(order, retries) { return order; }
            const handler = (x) => x + 1;
            let counter = 0;
            var legacy = true;
            "#,
        );
        assert_eq!(c.classes, vec!["Order"]);
        assert!(c
            .methods
            .contains(&("constructor".to_string(), MethodKind::Constructor)));
        assert!(c.methods.contains(&("total".to_string(), MethodKind::Getter)));
        assert!(c.methods.contains(&("ship".to_string(), MethodKind::Method)));
        assert!(c
            .functions
            .contains(&(Some("process".to_string()), FunctionKind::Declaration, 2)));
        assert!(c.functions.contains(&(None, FunctionKind::Arrow, 1)));
        assert!(c.declarators.contains(&("handler".to_string(), DeclKind::Const)));
        assert!(c.declarators.contains(&("counter".to_string(), DeclKind::Let)));
        assert!(c.declarators.contains(&("legacy".to_string(), DeclKind::Var)));
    }

    #[test]
    fn bare_arrow_parameter_counts_as_one() {
        let c = collect("const double = x => x * 2;");
        assert!(c.functions.contains(&(None, FunctionKind::Arrow, 1)));
    }

    #[test]
    fn identifier_roles_separate_uses_from_names() {
        let c = collect(
            r#"
            const config = { mode: "fast" };
            config.mode;
            outer: for (const item of config.items) { break outer; }
            "#,
        );
        // config is referenced; mode appears only as key and member.
        assert!(c.references.contains(&"config".to_string()));
        assert!(!c.references.contains(&"mode".to_string()));
        assert!(c.keys.contains(&"mode".to_string()));
        assert!(c.labels.contains(&"outer".to_string()));
    }

    #[test]
    fn destructured_names_are_references_not_declarators() {
        let c = collect("const { host, port } = settings;");
        assert!(c.declarators.is_empty());
        assert!(c.references.contains(&"host".to_string()));
        assert!(c.references.contains(&"settings".to_string()));
    }

    #[test]
    fn function_own_name_is_not_a_reference() {
        let c = collect("function solo() { return 1; }");
        assert!(!c.references.contains(&"solo".to_string()));
    }

    #[test]
    fn method_count_ignores_constructor_and_accessors() {
        let mut parser = ScriptParser::new().unwrap();
        let ast = parser
            .parse(
                r#"
                class Widget {
                    constructor() {}
                    get size() { return 1; }
                    draw() {}
                    resize() {}
                }
                "#,
            )
            .unwrap();
        let class = ast
            .root
            .iter()
            .find_map(|n| match n {
                ScriptNode::Class(c) => Some(c),
                _ => None,
            })
            .unwrap();
        assert_eq!(class.method_count(), 2);
    }

    #[test]
    fn syntax_error_fails_whole_unit() {
        let mut parser = ScriptParser::new().unwrap();
        let err = parser.parse("function broken( {").unwrap_err();
        assert!(err.contains("syntax error"), "got: {err}");
    }

    #[test]
    fn typescript_annotations_parse() {
        let c = collect(
            r#"
            interface Props { id: number; }
            const count: number = compute(limit);
            function tag(input: string): string { return input; }
            "#,
        );
        assert!(c.declarators.contains(&("count".to_string(), DeclKind::Const)));
        assert!(c.references.contains(&"limit".to_string()));
        assert!(c
            .functions
            .contains(&(Some("tag".to_string()), FunctionKind::Declaration, 1)));
    }
}
