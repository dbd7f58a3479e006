use std::fs;
use std::process;

use xlit_engine::xlit_core::methods::{builtin_toml, BUILTIN};
use xlit_engine::xlit_core::rules::parse_method_toml;
use xlit_engine::xlit_core::settings;
use xlit_engine::xlit_core::MethodRegistry;

pub fn rules_export(method_id: &str) {
    match builtin_toml(method_id) {
        Some(toml) => print!("{toml}"),
        None => {
            eprintln!("Error: no built-in rule table for '{method_id}'");
            process::exit(1);
        }
    }
}

/// Load the file next to the built-in catalog so id clashes are caught too.
pub fn rules_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let registry = MethodRegistry::from_sources(
        BUILTIN
            .iter()
            .map(|&(name, toml)| (name.to_string(), toml))
            .chain(std::iter::once((file.to_string(), content.as_str()))),
    );
    if let Some(err) = registry.rejected().first() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    let method = die!(parse_method_toml(&content), "Error: {}");
    println!(
        "OK: {} ({} rules, case_mode={:?}, regex={})",
        method.id,
        method.table.len(),
        method.case_mode,
        method.has_regex()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: limits.max_input_chars={}, limits.max_lines={}, batch.workers={}",
        s.limits.max_input_chars, s.limits.max_lines, s.batch.workers
    );
}
