//! Script (TypeScript/JavaScript) validation.
//!
//! The primary validator: always available, no configuration file required.
//! Source is parsed into a closed structural AST, then naming, threshold and
//! smell rules run over it in a fixed order.

mod ast;
mod naming;
mod smells;

pub use ast::{
    walk, ClassNode, DeclKind, FunctionKind, FunctionNode, IdentNode, IdentifierRole, MethodKind,
    MethodNode, ScriptAst, ScriptNode, ScriptParser, ScriptVisitor, VarDeclaratorNode,
};

use crate::config::ScriptConfig;
use crate::report::{Location, Severity, Violation};

/// Validates TypeScript and JavaScript sources.
pub struct ScriptValidator {
    parser: ScriptParser,
    config: ScriptConfig,
}

impl ScriptValidator {
    pub fn new(config: ScriptConfig) -> Result<Self, String> {
        Ok(Self {
            parser: ScriptParser::new()?,
            config,
        })
    }

    /// Runs naming, threshold and smell rules over one unit.
    ///
    /// A parse failure yields a single sentinel violation; style rules never
    /// run over a partial tree.
    pub fn validate(&mut self, source: &str, filename: &str) -> Vec<Violation> {
        let ast = match self.parser.parse(source) {
            Ok(ast) => ast,
            Err(message) => {
                return vec![Violation::new(
                    "parse-error",
                    "parser",
                    Severity::Warning,
                    format!("Failed to parse script source: {message}"),
                    Location::default().with_file(filename),
                )
                .with_suggestion("Check the file for syntax errors")];
            }
        };

        let mut violations = Vec::new();
        if self.config.naming.enabled {
            naming::check(&ast, &self.config.naming, &mut violations);
        }
        smells::check(&ast, source, &self.config, &mut violations);
        for violation in &mut violations {
            violation.location.file = Some(filename.to_string());
        }
        tracing::debug!(violations = violations.len(), "script validation finished");
        violations
    }
}

impl Default for ScriptValidator {
    fn default() -> Self {
        Self::new(ScriptConfig::default()).expect("Failed to create script validator")
    }
}
