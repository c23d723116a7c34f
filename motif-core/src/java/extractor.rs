//! Java structural extraction using native tree-sitter
//!
//! Builds [`ClassModel`]s from class and interface declarations, including
//! nested types, with members attached to the nearest enclosing declaration.

use tree_sitter::{Node, Parser, Point, Query, QueryCursor};

use super::types::{ClassModel, FieldModel, MethodModel, ParameterModel};

/// Java extractor
pub struct JavaExtractor {
    parser: Parser,
    declaration_query: Query,
}

impl JavaExtractor {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| format!("Failed to set language: {}", e))?;

        let declaration_query = Query::new(
            &language.into(),
            r#"
            (class_declaration) @class

            (interface_declaration) @interface
            "#,
        )
        .map_err(|e| format!("Failed to create declaration query: {}", e))?;

        Ok(Self {
            parser,
            declaration_query,
        })
    }

    /// Extract every class and interface, flattened in declaration order.
    ///
    /// A malformed unit fails as a whole: extraction never returns a
    /// partial model from a tree with syntax errors.
    pub fn extract(&mut self, source: &str) -> Result<Vec<ClassModel>, String> {
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

        let source_bytes = source.as_bytes();
        let mut declarations: Vec<Node> = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.declaration_query, root, source_bytes);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                declarations.push(capture.node);
            }
        }
        declarations.sort_by_key(|n| n.start_byte());

        Ok(declarations
            .iter()
            .map(|node| build_class(*node, source_bytes))
            .collect())
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new().expect("Failed to create Java extractor")
    }
}

fn build_class(node: Node, source: &[u8]) -> ClassModel {
    let is_interface = node.kind() == "interface_declaration";
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let (modifiers, annotations) = collect_modifiers(node, source);
    let is_abstract = modifiers.iter().any(|m| m == "abstract");

    let mut extends = None;
    let mut implements = Vec::new();
    if is_interface {
        // Interfaces list their supertypes in an extends_interfaces clause.
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "extends_interfaces" {
                collect_type_list(child, source, &mut implements);
            }
        }
    } else {
        if let Some(superclass) = node.child_by_field_name("superclass") {
            extends = superclass.named_child(0).map(|n| node_text(n, source));
        }
        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            collect_type_list(interfaces, source, &mut implements);
        }
    }

    let mut methods = Vec::new();
    let mut fields = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_declaration" => methods.push(build_method(member, source)),
                "constructor_declaration" => methods.push(build_constructor(member, source)),
                "field_declaration" | "constant_declaration" => {
                    build_fields(member, source, &mut fields)
                }
                // Nested types are captured by the declaration query and
                // built as their own models.
                _ => {}
            }
        }
    }

    ClassModel {
        name,
        is_interface,
        is_abstract,
        methods,
        fields,
        implements,
        extends,
        annotations,
        modifiers,
        line: node.start_position().row as u32 + 1,
    }
}

fn build_method(node: Node, source: &[u8]) -> MethodModel {
    let (modifiers, annotations) = collect_modifiers(node, source);
    MethodModel {
        name: node
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
            .unwrap_or_default(),
        is_abstract: modifiers.iter().any(|m| m == "abstract"),
        is_static: modifiers.iter().any(|m| m == "static"),
        is_private: modifiers.iter().any(|m| m == "private"),
        is_public: modifiers.iter().any(|m| m == "public"),
        return_type: node
            .child_by_field_name("type")
            .map(|n| node_text(n, source)),
        parameters: collect_parameters(node, source),
        annotations,
        line: node.start_position().row as u32 + 1,
    }
}

fn build_constructor(node: Node, source: &[u8]) -> MethodModel {
    let (modifiers, annotations) = collect_modifiers(node, source);
    MethodModel {
        name: node
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
            .unwrap_or_default(),
        is_abstract: false,
        is_static: false,
        is_private: modifiers.iter().any(|m| m == "private"),
        is_public: modifiers.iter().any(|m| m == "public"),
        return_type: None,
        parameters: collect_parameters(node, source),
        annotations,
        line: node.start_position().row as u32 + 1,
    }
}

/// One [`FieldModel`] per declarator; `int a, b;` yields two.
fn build_fields(node: Node, source: &[u8], fields: &mut Vec<FieldModel>) {
    let (keywords, annotations) = collect_modifiers(node, source);
    let field_type = node
        .child_by_field_name("type")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let is_static = keywords.iter().any(|m| m == "static");
    let is_final = keywords.iter().any(|m| m == "final");
    let is_private = keywords.iter().any(|m| m == "private");

    // Field modifiers carry annotation names alongside keywords, so rules
    // can test for markers like Autowired without a separate lookup.
    let mut modifiers = keywords;
    modifiers.extend(annotations);

    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        let name = declarator
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
            .unwrap_or_default();
        fields.push(FieldModel {
            name,
            field_type: field_type.clone(),
            is_static,
            is_final,
            is_private,
            modifiers: modifiers.clone(),
            line: declarator.start_position().row as u32 + 1,
        });
    }
}

/// Split a declaration's modifier list into keywords and annotation names.
fn collect_modifiers(node: Node, source: &[u8]) -> (Vec<String>, Vec<String>) {
    let mut keywords = Vec::new();
    let mut annotations = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            match modifier.kind() {
                "marker_annotation" | "annotation" => {
                    if let Some(name) = modifier.child_by_field_name("name") {
                        let text = node_text(name, source);
                        // Qualified annotations reduce to their simple name.
                        let simple = text.rsplit('.').next().unwrap_or(&text).to_string();
                        annotations.push(simple);
                    }
                }
                _ => keywords.push(node_text(modifier, source)),
            }
        }
    }
    (keywords, annotations)
}

fn collect_parameters(node: Node, source: &[u8]) -> Vec<ParameterModel> {
    let mut parameters = Vec::new();
    let Some(params) = node.child_by_field_name("parameters") else {
        return parameters;
    };
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => {
                parameters.push(ParameterModel {
                    name: param
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source))
                        .unwrap_or_default(),
                    param_type: param
                        .child_by_field_name("type")
                        .map(|n| node_text(n, source))
                        .unwrap_or_default(),
                });
            }
            "spread_parameter" => {
                // seq(type, "...", declarator); the declarator names it.
                let mut inner = param.walk();
                let name = param
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "variable_declarator")
                    .and_then(|d| d.child_by_field_name("name"))
                    .map(|n| node_text(n, source))
                    .unwrap_or_default();
                let param_type = param
                    .named_child(0)
                    .map(|n| node_text(n, source))
                    .unwrap_or_default();
                parameters.push(ParameterModel { name, param_type });
            }
            _ => {}
        }
    }
    parameters
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

fn collect_type_list(clause: Node, source: &[u8], out: &mut Vec<String>) {
    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut inner = child.walk();
            for ty in child.named_children(&mut inner) {
                out.push(node_text(ty, source));
            }
        }
    }
}
