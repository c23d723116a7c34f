//! Validation service façade.
//!
//! Owns the three validators and dispatches by language tag. The script
//! validator is always present; the Java and Vue validators are optional and
//! stay disabled for the process lifetime when their configuration cannot be
//! loaded. A disabled validator surfaces as
//! [`ServiceError::ValidatorUnavailable`], never as a panic mid-call.

mod catalog;

pub use catalog::{java_patterns, vue_patterns, CatalogEntry};

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{JavaConfig, VueConfig, JAVA_CONFIG_FILE, VUE_CONFIG_FILE};
use crate::errors::ServiceError;
use crate::java::JavaValidator;
use crate::report::Violation;
use crate::script::ScriptValidator;
use crate::vue::{VueDetection, VueValidator};

/// Languages the service dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    JavaScript,
    Java,
    Vue,
}

impl Language {
    /// Placeholder used for location messages when the caller gives no name.
    fn default_filename(self) -> &'static str {
        match self {
            Language::TypeScript | Language::JavaScript => "unknown.ts",
            Language::Java => "Unknown.java",
            Language::Vue => "Component.vue",
        }
    }
}

impl FromStr for Language {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "javascript" | "js" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "vue" => Ok(Language::Vue),
            _ => Err(ServiceError::UnknownLanguage {
                language: value.to_string(),
            }),
        }
    }
}

/// Output of a dispatched validation. Script and Java report violations
/// only; the component language pairs them with pattern detections.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ValidationReport {
    Script(Vec<Violation>),
    Java(Vec<Violation>),
    Vue {
        detections: Vec<VueDetection>,
        violations: Vec<Violation>,
    },
}

/// Façade over the three validators.
pub struct PatternService {
    script: ScriptValidator,
    java: Option<JavaValidator>,
    vue: Option<VueValidator>,
}

impl PatternService {
    /// Builds every validator from compiled-in defaults. The script
    /// validator is required; a Java grammar failure only disables Java.
    pub fn new() -> Self {
        let java = match JavaValidator::new(JavaConfig::default()) {
            Ok(validator) => Some(validator),
            Err(reason) => {
                tracing::warn!(%reason, "java validator disabled");
                None
            }
        };
        Self {
            script: ScriptValidator::default(),
            java,
            vue: Some(VueValidator::new(VueConfig::default())),
        }
    }

    /// Loads the two optional rule configurations from `dir`. A missing or
    /// invalid file disables that validator with a warning; it does not
    /// fail construction.
    pub fn from_config_dir(dir: &Path) -> Self {
        let java = match JavaConfig::from_file(&dir.join(JAVA_CONFIG_FILE)) {
            Ok(config) => match JavaValidator::new(config) {
                Ok(validator) => Some(validator),
                Err(reason) => {
                    tracing::warn!(%reason, "java validator disabled");
                    None
                }
            },
            Err(error) => {
                tracing::warn!(error = %error, "java validator disabled: no usable configuration");
                None
            }
        };
        let vue = match VueConfig::from_file(&dir.join(VUE_CONFIG_FILE)) {
            Ok(config) => Some(VueValidator::new(config)),
            Err(error) => {
                tracing::warn!(error = %error, "vue validator disabled: no usable configuration");
                None
            }
        };
        Self {
            script: ScriptValidator::default(),
            java,
            vue,
        }
    }

    /// Parses the language tag and dispatches to the matching validator,
    /// substituting a per-language placeholder filename when none is given.
    pub fn validate_code(
        &mut self,
        language: &str,
        source: &str,
        filename: Option<&str>,
    ) -> Result<ValidationReport, ServiceError> {
        let language = Language::from_str(language)?;
        let filename = filename.unwrap_or_else(|| language.default_filename());
        match language {
            Language::TypeScript | Language::JavaScript => Ok(ValidationReport::Script(
                self.validate_typescript(source, filename),
            )),
            Language::Java => Ok(ValidationReport::Java(self.validate_java(source, filename)?)),
            Language::Vue => {
                let (detections, violations) = self.validate_vue(source, filename)?;
                Ok(ValidationReport::Vue {
                    detections,
                    violations,
                })
            }
        }
    }

    pub fn validate_typescript(&mut self, source: &str, filename: &str) -> Vec<Violation> {
        self.script.validate(source, filename)
    }

    pub fn validate_java(
        &mut self,
        source: &str,
        filename: &str,
    ) -> Result<Vec<Violation>, ServiceError> {
        let validator = self.java.as_mut().ok_or_else(|| unavailable("java"))?;
        Ok(validator.validate(source, filename))
    }

    pub fn validate_vue(
        &mut self,
        source: &str,
        filename: &str,
    ) -> Result<(Vec<VueDetection>, Vec<Violation>), ServiceError> {
        let validator = self.vue.as_ref().ok_or_else(|| unavailable("vue"))?;
        Ok(validator.validate(source, filename))
    }

    pub fn validate_typescript_file(&mut self, path: &Path) -> Result<Vec<Violation>, ServiceError> {
        let source = read_source(path)?;
        Ok(self.validate_typescript(&source, &path.display().to_string()))
    }

    pub fn validate_java_file(&mut self, path: &Path) -> Result<Vec<Violation>, ServiceError> {
        let source = read_source(path)?;
        self.validate_java(&source, &path.display().to_string())
    }

    /// Reads a component file. A "path" that contains template or script
    /// markup is inline source passed by mistake, and gets corrective
    /// guidance instead of a filesystem error.
    pub fn validate_vue_file(
        &mut self,
        path: &Path,
    ) -> Result<(Vec<VueDetection>, Vec<Violation>), ServiceError> {
        let text = path.to_string_lossy();
        if text.contains("<template>") || text.contains("<script>") {
            return Err(ServiceError::InputShapeMismatch {
                hint: "pass the component source to validate_vue instead".to_string(),
            });
        }
        let source = read_source(path)?;
        self.validate_vue(&source, &path.display().to_string())
    }
}

impl Default for PatternService {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable(validator: &str) -> ServiceError {
    ServiceError::ValidatorUnavailable {
        validator: validator.to_string(),
        reason: "configuration failed to load at startup".to_string(),
    }
}

fn read_source(path: &Path) -> Result<String, ServiceError> {
    std::fs::read_to_string(path).map_err(|error| ServiceError::FileRead {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn typescript_dispatch_uses_the_default_filename() {
        let mut service = PatternService::new();
        let report = service
            .validate_code("typescript", "const bad_name = 1;", None)
            .unwrap();
        let ValidationReport::Script(violations) = report else {
            panic!("expected a script report");
        };
        assert!(!violations.is_empty());
        assert!(violations
            .iter()
            .all(|v| v.location.file.as_deref() == Some("unknown.ts")));
    }

    #[test]
    fn java_dispatch_keeps_the_caller_filename() {
        let source = r#"
            public class ConfigurationManager {
                private static final ConfigurationManager INSTANCE = new ConfigurationManager();
                private ConfigurationManager() {}
                public static ConfigurationManager getInstance() { return INSTANCE; }
            }
        "#;
        let mut service = PatternService::new();
        let report = service
            .validate_code("java", source, Some("Custom.java"))
            .unwrap();
        let ValidationReport::Java(violations) = report else {
            panic!("expected a java report");
        };
        assert!(violations.iter().any(|v| v.rule == "pattern-singleton"));
        assert!(violations
            .iter()
            .all(|v| v.location.file.as_deref() == Some("Custom.java")));
    }

    #[test]
    fn vue_dispatch_returns_detections_and_violations() {
        let source = "<template><div>{{ id }}</div></template>\n\
                      <script setup lang=\"ts\">\nconst props = defineProps<{id: number}>()\n</script>";
        let mut service = PatternService::new();
        let report = service.validate_code("vue", source, None).unwrap();
        let ValidationReport::Vue {
            detections,
            violations,
        } = report
        else {
            panic!("expected a vue report");
        };
        assert_eq!(detections.len(), 1);
        assert_eq!(
            detections[0].location.file.as_deref(),
            Some("Component.vue")
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut service = PatternService::new();
        let error = service.validate_code("kotlin", "", None).unwrap_err();
        assert!(matches!(error, ServiceError::UnknownLanguage { .. }));
        assert!("ts".parse::<Language>().is_ok());
    }

    #[test]
    fn empty_config_dir_disables_the_optional_validators() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = PatternService::from_config_dir(dir.path());

        assert!(matches!(
            service.validate_java("class A {}", "A.java"),
            Err(ServiceError::ValidatorUnavailable { .. })
        ));
        assert!(matches!(
            service.validate_vue("<template><div/></template>", "A.vue"),
            Err(ServiceError::ValidatorUnavailable { .. })
        ));
        // the script validator has no file to lose
        assert!(service
            .validate_code("js", "const x = 1; console.log(x);", None)
            .is_ok());
    }

    #[test]
    fn config_dir_with_a_vue_file_enables_vue() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(VUE_CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(file, r#"{{ "components": {{ "maxComponentSize": 100 }} }}"#).unwrap();

        let mut service = PatternService::from_config_dir(dir.path());
        assert!(service
            .validate_vue("<template><div/></template>", "A.vue")
            .is_ok());
        assert!(service.validate_java("class A {}", "A.java").is_err());
    }

    #[test]
    fn vue_file_entry_rejects_inline_markup() {
        let mut service = PatternService::new();
        let error = service
            .validate_vue_file(Path::new("<template><div/></template>"))
            .unwrap_err();
        assert!(matches!(error, ServiceError::InputShapeMismatch { .. }));
    }

    #[test]
    fn file_entry_points_surface_read_failures() {
        let mut service = PatternService::new();
        let error = service
            .validate_typescript_file(Path::new("/nonexistent/source.ts"))
            .unwrap_err();
        assert!(matches!(error, ServiceError::FileRead { .. }));
    }

    #[test]
    fn file_entry_points_delegate_to_code_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "const bad_name = 1;").unwrap();

        let mut service = PatternService::new();
        let violations = service.validate_typescript_file(file.path()).unwrap();
        let expected = file.path().display().to_string();
        assert!(!violations.is_empty());
        assert_eq!(
            violations[0].location.file.as_deref(),
            Some(expected.as_str())
        );
    }
}
