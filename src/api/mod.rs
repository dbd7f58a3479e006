//! UniFFI export layer: type-safe bindings for the transliteration engine.
//!
//! Each public type here maps to a generated foreign class, struct, or enum.

mod engine;
mod types;

pub use engine::XlitEngine;
pub use types::{XlitBatchResult, XlitError, XlitMethod, XlitRequest, XlitValidatedInput};

use std::path::Path;

use xlit_core::registry::MethodRegistry;
use xlit_core::validate::InputValidator;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[uniffi::export]
fn transliterate(method_id: String, text: String, match_case: bool) -> Result<String, XlitError> {
    Ok(xlit_core::transliterate(&method_id, &text, match_case)?)
}

#[uniffi::export]
fn list_methods() -> Vec<XlitMethod> {
    MethodRegistry::global()
        .list_methods()
        .into_iter()
        .map(XlitMethod::from)
        .collect()
}

#[uniffi::export]
fn list_languages() -> Vec<String> {
    MethodRegistry::global().languages()
}

#[uniffi::export]
fn methods_for_language(language: String) -> Vec<XlitMethod> {
    MethodRegistry::global()
        .methods_by_language(&language)
        .into_iter()
        .map(XlitMethod::from)
        .collect()
}

#[uniffi::export]
fn validate_input(
    method_id: String,
    text: String,
    sanitize: bool,
) -> Result<XlitValidatedInput, XlitError> {
    let validated = InputValidator::default()
        .validate(MethodRegistry::global(), &method_id, &text, sanitize)
        .map_err(|e| XlitError::InvalidInput { msg: e.to_string() })?;
    Ok(XlitValidatedInput {
        text: validated.text,
        warnings: validated.warnings,
    })
}

/// Write a TMX file for one transliteration; returns its path.
#[uniffi::export]
fn export_tmx(
    method_id: String,
    source_text: String,
    target_text: String,
    output_dir: String,
) -> Result<String, XlitError> {
    let path = xlit_core::tmx::export_transliteration(
        MethodRegistry::global(),
        &method_id,
        &source_text,
        &target_text,
        Path::new(&output_dir),
    )
    .map_err(|e| match e {
        xlit_core::tmx::TmxError::Io(io) => XlitError::Io {
            msg: format!("{output_dir}: {io}"),
        },
        other => XlitError::InvalidData {
            msg: other.to_string(),
        },
    })?;
    Ok(path.display().to_string())
}

#[uniffi::export]
fn rules_load_extra(paths: Vec<String>) -> Result<(), XlitError> {
    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        let content = std::fs::read_to_string(path).map_err(|e| XlitError::Io {
            msg: format!("{path}: {e}"),
        })?;
        tables.push(content);
    }
    MethodRegistry::init_extra(tables).map_err(|e| XlitError::InvalidData { msg: e.to_string() })
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), XlitError> {
    let content = std::fs::read_to_string(&path).map_err(|e| XlitError::Io {
        msg: format!("{path}: {e}"),
    })?;
    xlit_core::settings::init_custom(content)
        .map_err(|e| XlitError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_default_config() -> String {
    xlit_core::settings::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
