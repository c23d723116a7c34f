//! Component model extraction from split SFC blocks.
//!
//! Extraction is text-shaped: composition-API facts come from regex scans
//! over the script text, options-API facts from a brace-matched segmentation
//! of the default-export object. Version inference runs last so it can see
//! every extracted signal.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sfc::SfcBlocks;
use super::types::{ComponentModel, VueVersion};

static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s+(?:\{[^}]+\}|\w+)\s+from\s+['"]([^'"]+)['"]"#).unwrap());
static COMPOSABLE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+(use[A-Z]\w*)\s*\(").unwrap());
static COMPOSABLE_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(use[A-Z]\w*)\s*\(").unwrap());
static DEFINE_PROPS_TYPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"defineProps\s*<\s*([^>]+?)\s*>").unwrap());
static DEFINE_PROPS_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"defineProps\s*\(\s*\{").unwrap());
static DEFINE_EMITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"defineEmits\s*<\s*\{([^}]+)\}|defineEmits\s*\(\s*\[([^\]]+)\]").unwrap()
});
static QUOTED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

static DEFINE_MACROS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"defineProps|defineEmits|defineExpose").unwrap());
static V3_TEMPLATE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<Teleport|<Suspense").unwrap());
static COMPOSITION_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\s+\{\s*[^}]*(?:ref|reactive|computed|onMounted|onUnmounted|watch|watchEffect|toRefs?|unref)[^}]*\}\s+from\s+['"]vue['"]"#,
    )
    .unwrap()
});
static COMPOSITION_IMPORT_CORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+\{\s*[^}]*(?:ref|reactive|computed|onMounted)[^}]*\}\s+from\s+['"]vue['"]"#)
        .unwrap()
});
static SETUP_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"setup\s*\(\s*\)\s*\{").unwrap());
static OPTIONS_API: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"data\s*\(\s*\)\s*\{|methods\s*:|computed\s*:|watch\s*:|mixins\s*:|filters\s*:")
        .unwrap()
});
static LEGACY_HOOKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"beforeDestroy|destroyed").unwrap());

static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"export\s+default\s*\{").unwrap());
static MIXINS_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"mixins\s*:\s*\[").unwrap());
static FILTERS_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"filters\s*:\s*\{").unwrap());
static DATA_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"data\s*\(\s*\)\s*\{").unwrap());
static RETURN_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"return\s*\{").unwrap());
static METHODS_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"methods\s*:\s*\{").unwrap());
static COMPUTED_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"computed\s*:\s*\{").unwrap());
static WATCH_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"watch\s*:\s*\{").unwrap());
static PROPS_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"props\s*:\s*[\{\[]").unwrap());

/// Builds a [`ComponentModel`] from split blocks.
///
/// The filename is advisory: it only feeds the component name.
pub fn extract_component(blocks: SfcBlocks, filename: &str) -> ComponentModel {
    let script_text = blocks
        .script
        .as_ref()
        .map(|block| block.content.clone())
        .unwrap_or_default();
    let setup_text = blocks
        .script_setup
        .as_ref()
        .map(|block| block.content.clone())
        .unwrap_or_default();
    let has_typescript = [&blocks.script, &blocks.script_setup]
        .iter()
        .any(|block| matches!(block.as_ref().and_then(|b| b.lang.as_deref()), Some("ts")));

    let mut model = ComponentModel {
        name: component_name(filename),
        is_script_setup: blocks.script_setup.is_some(),
        has_typescript,
        template: blocks.template,
        script: blocks.script,
        script_setup: blocks.script_setup,
        styles: blocks.styles,
        ..ComponentModel::default()
    };

    if model.script.is_some() {
        extract_script_facts(&mut model, &script_text);
        extract_options_facts(&mut model, &script_text);
    }
    if model.script_setup.is_some() {
        extract_script_facts(&mut model, &setup_text);
    }

    model.uses_options_api = OPTIONS_API.is_match(&script_text);
    model.uses_composition_api = SETUP_FN.is_match(&script_text)
        || !setup_text.is_empty()
        || COMPOSITION_IMPORT_CORE.is_match(&script_text);
    model.version = infer_version(&model, &script_text, &setup_text);

    model
}

fn component_name(filename: &str) -> String {
    let stem = filename.strip_suffix(".vue").unwrap_or(filename);
    let name = stem.rsplit('/').next().unwrap_or(stem);
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

/// Version signals in strict priority order. Composition signals outrank
/// options-style usage because a migrating component may show both.
fn infer_version(model: &ComponentModel, script: &str, setup: &str) -> VueVersion {
    if model.is_script_setup {
        return VueVersion::V3;
    }
    if DEFINE_MACROS.is_match(script) || DEFINE_MACROS.is_match(setup) {
        return VueVersion::V3;
    }
    if V3_TEMPLATE_TAGS.is_match(model.template.as_deref().unwrap_or("")) {
        return VueVersion::V3;
    }
    if COMPOSITION_IMPORT.is_match(script) {
        return VueVersion::V3;
    }
    if SETUP_FN.is_match(script) {
        return VueVersion::V3;
    }
    if !model.filters.is_empty() {
        return VueVersion::V2;
    }
    if LEGACY_HOOKS.is_match(script) {
        return VueVersion::V2;
    }
    if model.uses_options_api && !model.uses_composition_api {
        return VueVersion::V2;
    }
    VueVersion::Unknown
}

/// Imports, composables, and macro-declared props/emits from one script.
fn extract_script_facts(model: &mut ComponentModel, script: &str) {
    for caps in IMPORT.captures_iter(script) {
        push_unique(&mut model.imports, &caps[1]);
    }
    for caps in COMPOSABLE_DECL.captures_iter(script) {
        push_unique(&mut model.composables, &caps[1]);
    }
    for caps in COMPOSABLE_CALL.captures_iter(script) {
        if let Some(name) = caps.get(1) {
            let before = script[..name.start()].trim_end();
            if before.ends_with("function") || before.ends_with('.') {
                continue;
            }
            push_unique(&mut model.composable_calls, name.as_str());
        }
    }

    for caps in DEFINE_PROPS_TYPED.captures_iter(script) {
        let arg = caps[1].trim();
        if arg.len() >= 50 {
            continue;
        }
        if let Some(literal) = arg.strip_prefix('{') {
            let body = literal.strip_suffix('}').unwrap_or(literal);
            for name in top_level_entries(body) {
                push_unique(&mut model.props, name);
            }
        } else if let Some(body) = interface_body(script, arg) {
            for name in top_level_entries(body) {
                push_unique(&mut model.props, name);
            }
        } else {
            push_unique(&mut model.props, "props");
        }
    }
    for m in DEFINE_PROPS_OBJECT.find_iter(script) {
        if let Some(object) = matched_block(script, m.end() - 1) {
            for name in top_level_entries(object) {
                push_unique(&mut model.props, name);
            }
        }
    }

    for caps in DEFINE_EMITS.captures_iter(script) {
        if let Some(content) = caps.get(1).or_else(|| caps.get(2)) {
            for quoted in QUOTED_NAME.captures_iter(content.as_str()) {
                push_unique(&mut model.emits, &quoted[1]);
            }
        }
    }
}

/// Segments the default-export object of an options-API script.
///
/// Each section body is delimited by matching its opening brace or bracket,
/// and entry names are read from the section's top nesting level only.
fn extract_options_facts(model: &mut ComponentModel, script: &str) {
    let Some(open) = EXPORT_DEFAULT.find(script).map(|m| m.end() - 1) else {
        return;
    };
    let Some(options) = matched_block(script, open) else {
        return;
    };

    if let Some((_, body)) = find_section(options, &MIXINS_SECTION) {
        for m in WORD.find_iter(body) {
            push_unique(&mut model.mixins, m.as_str());
        }
    }
    if let Some((_, body)) = find_section(options, &FILTERS_SECTION) {
        for name in top_level_entries(body) {
            push_unique(&mut model.filters, name);
        }
    }
    if let Some((_, body)) = find_section(options, &DATA_FN) {
        if let Some(ret) = RETURN_OBJECT.find(body) {
            if let Some(object) = matched_block(body, ret.end() - 1) {
                for name in top_level_entries(object) {
                    push_unique(&mut model.data, name);
                }
            }
        }
    }
    if let Some((_, body)) = find_section(options, &METHODS_SECTION) {
        for name in top_level_entries(body) {
            push_unique(&mut model.methods, name);
        }
    }
    if let Some((_, body)) = find_section(options, &COMPUTED_SECTION) {
        for name in top_level_entries(body) {
            push_unique(&mut model.computed, name);
        }
    }
    if let Some((_, body)) = find_section(options, &WATCH_SECTION) {
        for name in top_level_entries(body) {
            push_unique(&mut model.watchers, name);
        }
    }
    // macro-declared props win over options-object props
    if model.props.is_empty() {
        if let Some((delimiter, body)) = find_section(options, &PROPS_SECTION) {
            if delimiter == b'{' {
                for name in top_level_entries(body) {
                    push_unique(&mut model.props, name);
                }
            } else {
                for caps in QUOTED_NAME.captures_iter(body) {
                    push_unique(&mut model.props, &caps[1]);
                }
            }
        }
    }
}

/// Body of `interface <name> { ... }` in the same script, if declared.
fn interface_body<'a>(script: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!(r"interface\s+{}\s*\{{", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let m = re.find(script)?;
    matched_block(script, m.end() - 1)
}

/// First top-level match of a section-opening regex, with the body behind
/// its opening delimiter. The regexes all end on the delimiter itself.
fn find_section<'a>(options: &'a str, key: &Regex) -> Option<(u8, &'a str)> {
    for m in key.find_iter(options) {
        if depth_at(options, m.start()) != 0 {
            continue;
        }
        let open = m.end() - 1;
        return matched_block(options, open).map(|body| (options.as_bytes()[open], body));
    }
    None
}

fn push_unique(list: &mut Vec<String>, name: impl Into<String>) {
    let name = name.into();
    if !list.contains(&name) {
        list.push(name);
    }
}

/// 1-based line of a byte offset, local to the scanned block.
pub(super) fn line_of(text: &str, offset: usize) -> u32 {
    text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|b| **b == b'\n')
        .count() as u32
        + 1
}

/// Parameter list and brace-matched body of the function declaration
/// starting at `start`. Default parameter values with braces stay inside
/// the parameter list.
pub(super) fn function_parts(text: &str, start: usize) -> Option<(&str, &str)> {
    let open_paren = start + text[start..].find('(')?;
    let params = matched_block(text, open_paren)?;
    let after_params = open_paren + params.len() + 2;
    let open_brace = after_params + text[after_params..].find('{')?;
    let body = matched_block(text, open_brace)?;
    Some((params, body))
}

/// Inner text of the bracketed block opening at `open`. Strings and
/// comments are skipped so braces inside them stay inert.
fn matched_block(text: &str, open: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let open_byte = *bytes.get(open)?;
    let close_byte = match open_byte {
        b'{' => b'}',
        b'[' => b']',
        b'(' => b')',
        _ => return None,
    };
    let mut depth = 0i32;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' || b == b'"' || b == b'`' {
            i = skip_string(bytes, i);
            continue;
        }
        if b == b'/' {
            let next = skip_comment(bytes, i);
            if next > i + 1 {
                i = next;
                continue;
            }
        }
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(&text[open + 1..i]);
            }
        }
        i += 1;
    }
    None
}

/// Nesting depth at `idx`, or -1 when `idx` sits inside a string or comment.
fn depth_at(text: &str, idx: usize) -> i32 {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < idx.min(bytes.len()) {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' => {
                let next = skip_comment(bytes, i);
                if next > i + 1 {
                    i = next;
                    continue;
                }
                i += 1;
            }
            b'{' | b'[' | b'(' => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' | b')' => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    if i == idx {
        depth
    } else {
        -1
    }
}

/// Entry names at the top nesting level of an object or type-literal body.
///
/// An entry is a possibly-quoted key followed by `:` or `(`, allowing the
/// `?` of optional type members. Identifiers in value position and
/// member-access chains are not entries; quoted keys keep their last dotted
/// segment, matching how watch paths are reported.
fn top_level_entries(body: &str) -> Vec<String> {
    let bytes = body.as_bytes();
    let mut names = Vec::new();
    let mut depth = 0i32;
    let mut expecting_key = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'\'' | b'"' | b'`' => {
                let end = skip_string(bytes, i);
                if depth == 0 && expecting_key {
                    if let Some(name) = quoted_key(&body[i..end]) {
                        if entry_follows(bytes, end) {
                            push_unique(&mut names, name);
                            expecting_key = false;
                        }
                    }
                }
                i = end;
            }
            b'/' => {
                let next = skip_comment(bytes, i);
                i = if next > i + 1 { next } else { i + 1 };
            }
            b'{' | b'[' | b'(' => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' | b')' => {
                depth -= 1;
                i += 1;
            }
            b',' | b';' | b'\n' if depth == 0 => {
                expecting_key = true;
                i += 1;
            }
            _ if depth == 0
                && expecting_key
                && (b.is_ascii_alphabetic() || b == b'_' || b == b'$') =>
            {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
                {
                    i += 1;
                }
                let member_access = start > 0 && bytes[start - 1] == b'.';
                if !member_access && entry_follows(bytes, i) {
                    push_unique(&mut names, &body[start..i]);
                    expecting_key = false;
                }
            }
            _ => i += 1,
        }
    }
    names
}

/// Whether an entry key just ended at `i`: optional `?`, then `:` or `(`.
fn entry_follows(bytes: &[u8], mut i: usize) -> bool {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i).copied() == Some(b'?') {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
    }
    matches!(bytes.get(i).copied(), Some(b':') | Some(b'('))
}

/// Last word segment of a quoted key, `'user.name'` reporting as `name`.
fn quoted_key(quoted: &str) -> Option<String> {
    let inner = quoted.get(1..quoted.len().saturating_sub(1))?.trim();
    let tail_start = inner
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .last()
        .map(|(at, _)| at)?;
    Some(inner[tail_start..].to_string())
}

/// Index just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i] == quote {
            return i + 1;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Index past a `//` or `/* */` comment at `start`, or `start + 1` when the
/// slash opens no comment. Line comments end at their newline so separator
/// handling still sees it.
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    match bytes.get(start + 1).copied() {
        Some(b'/') => {
            let mut i = start + 2;
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            i
        }
        Some(b'*') => {
            let mut i = start + 2;
            while i + 1 < bytes.len() {
                if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                    return i + 2;
                }
                i += 1;
            }
            bytes.len()
        }
        _ => start + 1,
    }
}
