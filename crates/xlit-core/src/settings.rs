//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before the first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::engine::MAX_INPUT_CHARS;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // Custom TOML was validated by init_custom; the default by build.rs and tests.
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: LimitSettings,
    pub tmx: TmxSettings,
    pub batch: BatchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    pub max_input_chars: usize,
    pub max_line_chars: usize,
    pub max_lines: usize,
    pub min_text_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmxSettings {
    pub creation_tool: String,
    pub creation_tool_version: String,
    pub target_lang: String,
    pub admin_lang: String,
    pub datatype: String,
    pub segtype: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    /// 0 selects `std::thread::available_parallelism`.
    pub workers: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive_usize!(limits.max_input_chars);
    check_positive_usize!(limits.max_line_chars);
    check_positive_usize!(limits.max_lines);
    check_positive_usize!(limits.min_text_chars);
    if s.limits.max_input_chars > MAX_INPUT_CHARS {
        return Err(SettingsError::InvalidValue {
            field: "limits.max_input_chars".to_string(),
            reason: format!("must not exceed the engine ceiling of {MAX_INPUT_CHARS}"),
        });
    }
    if s.limits.min_text_chars > s.limits.max_input_chars {
        return Err(SettingsError::InvalidValue {
            field: "limits.min_text_chars".to_string(),
            reason: "must not exceed limits.max_input_chars".to_string(),
        });
    }

    check_non_empty!(tmx.creation_tool);
    check_non_empty!(tmx.creation_tool_version);
    check_non_empty!(tmx.target_lang);
    check_non_empty!(tmx.admin_lang);
    check_non_empty!(tmx.datatype);
    check_non_empty!(tmx.segtype);

    Ok(())
}
