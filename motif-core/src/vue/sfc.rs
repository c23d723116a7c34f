//! Single-file component splitting.
//!
//! Block recognition is tag-based: at most one `<template>`, at most one
//! plain `<script>`, at most one `<script setup>`, and any number of
//! `<style>` blocks. Line numbers reported downstream are local to each
//! block's content.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Greedy body so nested `<template>` tags (scoped-slot templates) stay
/// inside the outer block.
static TEMPLATE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<template[^>]*>(.*)</template>").unwrap());
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<script([^>]*)>(.*?)</script>").unwrap());
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<style([^>]*)>(.*?)</style>").unwrap());
static LANG_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"lang\s*=\s*["']?(\w+)"#).unwrap());

/// A `<script>` or `<script setup>` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptBlock {
    pub content: String,
    pub lang: Option<String>,
}

/// A `<style>` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBlock {
    pub content: String,
    pub scoped: bool,
    pub lang: Option<String>,
}

/// The blocks of one single-file component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SfcBlocks {
    pub template: Option<String>,
    pub script: Option<ScriptBlock>,
    pub script_setup: Option<ScriptBlock>,
    pub styles: Vec<StyleBlock>,
}

/// Splits component source into blocks, or `None` when the source has no
/// template and no script block of either kind.
pub fn split(source: &str) -> Option<SfcBlocks> {
    let mut blocks = SfcBlocks::default();

    if let Some(caps) = TEMPLATE_BLOCK.captures(source) {
        blocks.template = Some(caps[1].to_string());
    }

    for caps in SCRIPT_BLOCK.captures_iter(source) {
        let attrs = &caps[1];
        let block = ScriptBlock {
            content: caps[2].to_string(),
            lang: lang_of(attrs),
        };
        if has_attr(attrs, "setup") {
            if blocks.script_setup.is_none() {
                blocks.script_setup = Some(block);
            }
        } else if blocks.script.is_none() {
            blocks.script = Some(block);
        }
    }

    for caps in STYLE_BLOCK.captures_iter(source) {
        let attrs = &caps[1];
        blocks.styles.push(StyleBlock {
            content: caps[2].to_string(),
            scoped: has_attr(attrs, "scoped"),
            lang: lang_of(attrs),
        });
    }

    if blocks.template.is_none() && blocks.script.is_none() && blocks.script_setup.is_none() {
        return None;
    }
    Some(blocks)
}

fn has_attr(attrs: &str, name: &str) -> bool {
    attrs
        .split_whitespace()
        .any(|token| token == name || token.starts_with(&format!("{name}=")))
}

fn lang_of(attrs: &str) -> Option<String> {
    LANG_ATTR
        .captures(attrs)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_template_script_and_styles() {
        let source = "<template>\n  <div>hi</div>\n</template>\n\
                      <script lang=\"ts\">\nexport default {}\n</script>\n\
                      <style scoped>\n.box {}\n</style>\n";
        let blocks = split(source).unwrap();
        assert!(blocks.template.unwrap().contains("<div>hi</div>"));
        let script = blocks.script.unwrap();
        assert_eq!(script.lang.as_deref(), Some("ts"));
        assert!(script.content.contains("export default"));
        assert!(blocks.script_setup.is_none());
        assert_eq!(blocks.styles.len(), 1);
        assert!(blocks.styles[0].scoped);
    }

    #[test]
    fn script_setup_is_kept_separate_from_plain_script() {
        let source = "<script setup>\nconst a = 1\n</script>\n<script>\nexport default {}\n</script>";
        let blocks = split(source).unwrap();
        assert!(blocks.script_setup.unwrap().content.contains("const a"));
        assert!(blocks.script.unwrap().content.contains("export default"));
    }

    #[test]
    fn nested_templates_stay_in_the_outer_block() {
        let source = "<template>\n  <template #header>x</template>\n  <div/>\n</template>\n\
                      <script>export default {}</script>";
        let template = split(source).unwrap().template.unwrap();
        assert!(template.contains("#header"));
        assert!(template.contains("<div/>"));
    }

    #[test]
    fn styles_alone_do_not_make_a_component() {
        assert!(split("<style>.box {}</style>").is_none());
        assert!(split("plain text").is_none());
    }

    #[test]
    fn lang_and_scoped_attributes_are_optional() {
        let blocks = split("<script>\nlet x = 1\n</script>\n<style>\n.a {}\n</style>").unwrap();
        assert!(blocks.script.unwrap().lang.is_none());
        assert!(!blocks.styles[0].scoped);
    }
}
