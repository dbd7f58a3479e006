use serde::Serialize;
use unicode_width::UnicodeWidthStr;
use xlit_engine::xlit_core::{MethodDescriptor, MethodRegistry};

#[derive(Serialize)]
struct MethodListing<'a> {
    count: usize,
    methods: &'a [MethodDescriptor],
}

pub fn methods(language: Option<&str>, json: bool) {
    let registry = MethodRegistry::global();
    let list = match language {
        Some(lang) => registry.methods_by_language(lang),
        None => registry.list_methods(),
    };

    if json {
        let listing = MethodListing {
            count: list.len(),
            methods: &list,
        };
        println!("{}", die!(serde_json::to_string_pretty(&listing), "Error: {}"));
        return;
    }

    if list.is_empty() {
        eprintln!("No methods found");
        return;
    }
    let id_width = list.iter().map(|m| m.id.width()).max().unwrap_or(0);
    let lang_width = list.iter().map(|m| m.language.width()).max().unwrap_or(0);
    for m in &list {
        println!(
            "{}  {}  {}{}",
            pad(&m.id, id_width),
            pad(&m.language, lang_width),
            m.language_code,
            if m.supports_match_case { "" } else { "  (case folded)" }
        );
    }
    eprintln!("{} methods", list.len());
}

pub fn languages() {
    let registry = MethodRegistry::global();
    for lang in registry.languages() {
        let count = registry.methods_by_language(&lang).len();
        println!("{lang}\t{count}");
    }
}

/// Left-align by display width rather than byte length.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}
