//! Catalog of transliteration methods, keyed by method id.
//!
//! The process-wide registry is built once from the embedded tables plus any
//! user tables passed to [`MethodRegistry::init_extra`] before first use, and
//! is read-only afterwards.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::methods::BUILTIN;
use crate::rules::{parse_method_toml, RuleTable, RuleTableError};

static EXTRA_TABLES: OnceLock<Vec<String>> = OnceLock::new();
static GLOBAL: OnceLock<MethodRegistry> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Rules spell out each case variant; casing is re-applied only on request.
    #[default]
    Declared,
    /// Rules are lowercase and matched case-insensitively; casing is always re-applied.
    Folded,
}

/// One romanization standard with its compiled rule table.
#[derive(Debug, Clone)]
pub struct Method {
    pub id: String,
    pub display_name: String,
    pub language: String,
    /// ISO 639-1 code of the source language.
    pub language_code: String,
    /// ISO 15924 tags.
    pub source_script: String,
    pub target_script: String,
    pub case_mode: CaseMode,
    /// Title-case every output word (scripts without case).
    pub title_case_output: bool,
    pub alphabet: String,
    pub table: RuleTable,
}

impl Method {
    pub fn has_regex(&self) -> bool {
        self.table.has_regex()
    }

    /// Folded tables always re-apply case, so the option is not offered.
    pub fn supports_match_case(&self) -> bool {
        self.case_mode == CaseMode::Declared
    }

    pub fn applies_case(&self, match_case: bool) -> bool {
        self.case_mode == CaseMode::Folded || match_case
    }

    pub fn descriptor(&self) -> MethodDescriptor {
        MethodDescriptor {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            language: self.language.clone(),
            language_code: self.language_code.clone(),
            source_script: self.source_script.clone(),
            target_script: self.target_script.clone(),
            supports_match_case: self.supports_match_case(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub id: String,
    pub display_name: String,
    pub language: String,
    pub language_code: String,
    pub source_script: String,
    pub target_script: String,
    pub supports_match_case: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("rule table {name}: {source}")]
    Table {
        name: String,
        #[source]
        source: RuleTableError,
    },
    #[error("duplicate method id: {0}")]
    DuplicateId(String),
    #[error("method registry already initialized")]
    AlreadyInitialized,
}

pub struct MethodRegistry {
    methods: Vec<Method>,
    index: HashMap<String, usize>,
    rejected: Vec<RegistryError>,
}

impl MethodRegistry {
    /// Register extra user tables before the first `global()` call.
    ///
    /// Fails with `AlreadyInitialized` once the global registry has been
    /// built, since the tables could no longer take effect.
    pub fn init_extra(tables: Vec<String>) -> Result<(), RegistryError> {
        // Validate eagerly, including id clashes with the built-in catalog.
        let candidate = Self::from_sources(
            BUILTIN
                .iter()
                .map(|&(name, toml)| (name.to_string(), toml))
                .chain(extra_sources(&tables)),
        );
        if let Some(err) = candidate.rejected.into_iter().next() {
            return Err(err);
        }
        EXTRA_TABLES
            .set(tables)
            .map_err(|_| RegistryError::AlreadyInitialized)
    }

    /// Get or initialize the global registry.
    pub fn global() -> &'static MethodRegistry {
        GLOBAL.get_or_init(|| {
            // Seals EXTRA_TABLES: a later `init_extra` fails instead of being ignored.
            let extra = EXTRA_TABLES.get_or_init(Vec::new);
            Self::from_sources(
                BUILTIN
                    .iter()
                    .map(|&(name, toml)| (name.to_string(), toml))
                    .chain(extra_sources(extra)),
            )
        })
    }

    /// Registry of the embedded tables only.
    pub fn builtin() -> Self {
        Self::from_sources(BUILTIN.iter().map(|&(name, toml)| (name.to_string(), toml)))
    }

    /// Build a registry from `(name, toml)` pairs. Tables that fail to load
    /// are left out and kept in [`rejected`](Self::rejected).
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (String, &'a str)>) -> Self {
        let mut methods: Vec<Method> = Vec::new();
        let mut index = HashMap::new();
        let mut rejected = Vec::new();

        for (name, toml) in sources {
            let method = match parse_method_toml(toml) {
                Ok(m) => m,
                Err(source) => {
                    warn!(table = %name, error = %source, "rule table excluded");
                    rejected.push(RegistryError::Table { name, source });
                    continue;
                }
            };
            if index.contains_key(&method.id) {
                warn!(table = %name, id = %method.id, "duplicate method id excluded");
                rejected.push(RegistryError::DuplicateId(method.id));
                continue;
            }
            index.insert(method.id.clone(), methods.len());
            methods.push(method);
        }

        info!(
            methods = methods.len(),
            rejected = rejected.len(),
            "method registry built"
        );
        Self {
            methods,
            index,
            rejected,
        }
    }

    pub fn resolve(&self, id: &str) -> Option<&Method> {
        self.index.get(id).map(|&i| &self.methods[i])
    }

    /// Descriptors in catalog order.
    pub fn list_methods(&self) -> Vec<MethodDescriptor> {
        self.methods.iter().map(Method::descriptor).collect()
    }

    /// Distinct language names, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.methods
            .iter()
            .map(|m| m.language.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn methods_by_language(&self, language: &str) -> Vec<MethodDescriptor> {
        self.methods
            .iter()
            .filter(|m| m.language == language)
            .map(Method::descriptor)
            .collect()
    }

    pub fn language_code(&self, id: &str) -> Option<&str> {
        self.resolve(id).map(|m| m.language_code.as_str())
    }

    pub fn rejected(&self) -> &[RegistryError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

fn extra_sources(tables: &[String]) -> impl Iterator<Item = (String, &str)> + '_ {
    tables
        .iter()
        .enumerate()
        .map(|(i, toml)| (format!("extra[{i}]"), toml.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTRA: &str = r#"
id = "Test (Cyrillic)-->English (T)"
display_name = "T"
language = "Test"
language_code = "tt"
alphabet = "аб"

[mappings]
"а" = "a"
"б" = "b"
"#;

    #[test]
    fn builtin_catalog_has_25_methods() {
        let registry = MethodRegistry::builtin();
        assert_eq!(registry.len(), 25);
        assert!(registry.rejected().is_empty());
    }

    #[test]
    fn resolve_known_and_unknown() {
        let registry = MethodRegistry::global();
        let method = registry
            .resolve("Russian (Cyrillic)-->English (IC)")
            .unwrap();
        assert_eq!(method.display_name, "IC");
        assert_eq!(method.source_script, "Cyrl");
        assert_eq!(method.target_script, "Latn");
        assert!(registry.resolve("not-a-method").is_none());
    }

    #[test]
    fn regex_flag_only_on_bulgarian() {
        let registry = MethodRegistry::builtin();
        let with_regex: Vec<String> = registry
            .list_methods()
            .into_iter()
            .filter(|d| registry.resolve(&d.id).is_some_and(Method::has_regex))
            .map(|d| d.language)
            .collect();
        assert_eq!(with_regex, vec!["Bulgarian"]);
    }

    #[test]
    fn languages_sorted_and_grouped() {
        let registry = MethodRegistry::builtin();
        let languages = registry.languages();
        assert_eq!(languages.len(), 16);
        assert!(languages.windows(2).all(|w| w[0] < w[1]));

        let russian = registry.methods_by_language("Russian");
        assert_eq!(russian.len(), 8);
        let ukrainian = registry.methods_by_language("Ukrainian");
        assert_eq!(ukrainian.len(), 3);
        assert!(registry.methods_by_language("Klingon").is_empty());
    }

    #[test]
    fn descriptors_report_match_case_support() {
        let registry = MethodRegistry::builtin();
        let iso = registry
            .resolve("Russian (Cyrillic)-->English (ISO-9)")
            .unwrap();
        assert!(!iso.supports_match_case());
        assert!(iso.applies_case(false));
        let ic = registry
            .resolve("Russian (Cyrillic)-->English (IC)")
            .unwrap();
        assert!(ic.supports_match_case());
        assert!(!ic.applies_case(false));
        assert_eq!(registry.language_code(&ic.id), Some("ru"));
    }

    #[test]
    fn georgian_output_is_title_cased() {
        let registry = MethodRegistry::builtin();
        let ka = registry
            .resolve("Georgian (Cyrillic)-->English (IC)")
            .unwrap();
        assert_eq!(ka.source_script, "Geor");
        assert!(ka.title_case_output);
    }

    #[test]
    fn broken_table_is_excluded_not_fatal() {
        let broken = EXTRA.replace("\"б\" = \"b\"\n", "");
        let registry = MethodRegistry::from_sources([
            ("good".to_string(), BUILTIN[0].1),
            ("broken".to_string(), broken.as_str()),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rejected().len(), 1);
        let msg = registry.rejected()[0].to_string();
        assert!(msg.contains("broken"), "{msg}");
        assert!(msg.contains("'б'"), "{msg}");
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let registry = MethodRegistry::from_sources([
            ("a".to_string(), EXTRA),
            ("b".to_string(), EXTRA),
        ]);
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.rejected()[0],
            RegistryError::DuplicateId(_)
        ));
    }

    #[test]
    fn extra_table_joins_catalog() {
        let registry = MethodRegistry::from_sources(
            BUILTIN
                .iter()
                .map(|&(name, toml)| (name.to_string(), toml))
                .chain(extra_sources(&[EXTRA.to_string()])),
        );
        assert_eq!(registry.len(), 26);
        assert_eq!(
            registry.language_code("Test (Cyrillic)-->English (T)"),
            Some("tt")
        );
    }

    #[test]
    fn extra_tables_after_first_use_are_refused() {
        let before = MethodRegistry::global().len();
        let err = MethodRegistry::init_extra(vec![EXTRA.to_string()]).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyInitialized));
        let registry = MethodRegistry::global();
        assert_eq!(registry.len(), before);
        assert!(registry.resolve("Test (Cyrillic)-->English (T)").is_none());
    }
}
