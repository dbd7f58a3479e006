use std::collections::BTreeMap;

use regex::RegexBuilder;
use serde::Deserialize;

use super::{Context, Pattern, Rule, RuleTable};
use crate::registry::{CaseMode, Method};
use crate::unicode::{fold_char, fold_str};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodConfig {
    id: String,
    display_name: String,
    language: String,
    language_code: String,
    #[serde(default = "default_source_script")]
    source_script: String,
    #[serde(default = "default_target_script")]
    target_script: String,
    #[serde(default)]
    case_mode: CaseMode,
    #[serde(default)]
    title_case_output: bool,
    alphabet: String,
    mappings: BTreeMap<String, String>,
    #[serde(default)]
    rules: Vec<RuleConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleConfig {
    from: Option<String>,
    regex: Option<String>,
    to: String,
    priority: Option<i32>,
    #[serde(default)]
    word_start: bool,
    #[serde(default)]
    word_end: bool,
    after: Option<String>,
    before: Option<String>,
}

fn default_source_script() -> String {
    "Cyrl".to_string()
}

fn default_target_script() -> String {
    "Latn".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("rule #{0}: exactly one of `from` or `regex` is required")]
    PatternKind(usize),
    #[error("empty source pattern")]
    EmptyPattern,
    #[error("empty context set on rule {0:?}")]
    EmptyContextSet(String),
    #[error("malformed rule pattern {pattern:?}: {reason}")]
    MalformedRulePattern { pattern: String, reason: String },
    #[error("rules for {pattern:?} share priority {priority}; give each an explicit distinct priority")]
    AmbiguousPriority { pattern: String, priority: i32 },
    #[error("alphabet character {0:?} has no context-free single-character rule")]
    UncoveredCharacter(char),
    #[error("folded table key {0:?} is not lowercase")]
    NotLowercase(String),
}

/// Parse one method's rule table from TOML and run the load-time integrity checks.
pub fn parse_method_toml(toml_str: &str) -> Result<Method, RuleTableError> {
    let config: MethodConfig =
        toml::from_str(toml_str).map_err(|e| RuleTableError::Parse(e.to_string()))?;

    if config.id.trim().is_empty() {
        return Err(RuleTableError::EmptyField("id"));
    }
    if config.display_name.trim().is_empty() {
        return Err(RuleTableError::EmptyField("display_name"));
    }
    if config.alphabet.is_empty() {
        return Err(RuleTableError::EmptyField("alphabet"));
    }
    if config.mappings.is_empty() {
        return Err(RuleTableError::EmptyField("mappings"));
    }

    let folded = config.case_mode == CaseMode::Folded;
    let mut rules = Vec::with_capacity(config.mappings.len() + config.rules.len());

    for (from, to) in &config.mappings {
        let chars = literal_chars(from, folded)?;
        rules.push(Rule {
            priority: chars.len() as i32,
            pattern: Pattern::Literal(chars),
            replacement: to.clone(),
            context: Context::default(),
            order: rules.len(),
        });
    }

    for (index, rule) in config.rules.into_iter().enumerate() {
        let order = rules.len();
        rules.push(build_rule(index, rule, order, folded)?);
    }

    let table = RuleTable::compile(rules, folded, &config.alphabet)?;

    Ok(Method {
        id: config.id,
        display_name: config.display_name,
        language: config.language,
        language_code: config.language_code,
        source_script: config.source_script,
        target_script: config.target_script,
        case_mode: config.case_mode,
        title_case_output: config.title_case_output,
        alphabet: config.alphabet,
        table,
    })
}

fn literal_chars(from: &str, folded: bool) -> Result<Vec<char>, RuleTableError> {
    if from.is_empty() {
        return Err(RuleTableError::EmptyPattern);
    }
    if folded && fold_str(from) != from {
        return Err(RuleTableError::NotLowercase(from.to_string()));
    }
    Ok(from.chars().collect())
}

fn context_set(
    set: Option<String>,
    folded: bool,
    rule: &str,
) -> Result<Option<Vec<char>>, RuleTableError> {
    match set {
        None => Ok(None),
        Some(s) if s.is_empty() => Err(RuleTableError::EmptyContextSet(rule.to_string())),
        Some(s) => Ok(Some(
            s.chars()
                .map(|c| if folded { fold_char(c) } else { c })
                .collect(),
        )),
    }
}

fn build_rule(
    index: usize,
    rule: RuleConfig,
    order: usize,
    folded: bool,
) -> Result<Rule, RuleTableError> {
    let (pattern, default_priority) = match (rule.from, rule.regex) {
        (Some(from), None) => {
            let chars = literal_chars(&from, folded)?;
            let len = chars.len() as i32;
            (Pattern::Literal(chars), Some(len))
        }
        (None, Some(source)) => (compile_regex(&source, folded)?, None),
        _ => return Err(RuleTableError::PatternKind(index)),
    };

    let name = match &pattern {
        Pattern::Literal(chars) => chars.iter().collect(),
        Pattern::Regex { source, .. } => source.clone(),
    };
    // Regex rules compete with literals of unknown length, so their rank must be explicit.
    let priority = match rule.priority.or(default_priority) {
        Some(p) => p,
        None => {
            return Err(RuleTableError::MalformedRulePattern {
                pattern: name,
                reason: "regex rules require an explicit priority".to_string(),
            })
        }
    };

    let context = Context {
        word_start: rule.word_start,
        word_end: rule.word_end,
        after: context_set(rule.after, folded, &name)?,
        before: context_set(rule.before, folded, &name)?,
    };

    Ok(Rule {
        pattern,
        replacement: rule.to,
        priority,
        context,
        order,
    })
}

fn compile_regex(source: &str, folded: bool) -> Result<Pattern, RuleTableError> {
    if source.is_empty() {
        return Err(RuleTableError::EmptyPattern);
    }
    let regex = RegexBuilder::new(&format!("^(?:{source})"))
        .case_insensitive(folded)
        .build()
        .map_err(|e| RuleTableError::MalformedRulePattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
    if regex.is_match("") {
        return Err(RuleTableError::MalformedRulePattern {
            pattern: source.to_string(),
            reason: "pattern matches the empty string".to_string(),
        });
    }
    Ok(Pattern::Regex {
        source: source.to_string(),
        regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"
id = "Test (Cyrillic)-->English (T)"
display_name = "T"
language = "Test"
language_code = "tt"
"#;

    fn table(body: &str) -> String {
        format!("{HEADER}{body}")
    }

    #[test]
    fn parse_minimal_table() {
        let toml = table(
            r#"
alphabet = "аб"

[mappings]
"а" = "a"
"б" = "b"
"аб" = "ab"
"#,
        );
        let method = parse_method_toml(&toml).unwrap();
        assert_eq!(method.id, "Test (Cyrillic)-->English (T)");
        assert_eq!(method.source_script, "Cyrl");
        assert_eq!(method.target_script, "Latn");
        assert_eq!(method.case_mode, CaseMode::Declared);
        assert!(!method.title_case_output);
        assert!(!method.has_regex());
        assert_eq!(method.table.len(), 3);
        let digraph = method
            .table
            .rules()
            .iter()
            .find(|r| r.source() == "аб")
            .unwrap();
        assert_eq!(digraph.priority, 2);
    }

    #[test]
    fn parse_all_builtin_tables() {
        for (name, toml) in crate::methods::BUILTIN {
            let method = parse_method_toml(toml)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(!method.table.is_empty(), "{name}");
        }
    }

    #[test]
    fn error_regex_without_priority() {
        let toml = table(
            r#"
alphabet = "и"

[mappings]
"и" = "i"

[[rules]]
regex = "ия\\b"
to = "ia"
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::MalformedRulePattern { .. }));
        assert!(err.to_string().contains("explicit priority"));
    }

    #[test]
    fn error_regex_does_not_compile() {
        let toml = table(
            r#"
alphabet = "и"

[mappings]
"и" = "i"

[[rules]]
regex = "(ия"
to = "ia"
priority = 5
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        match err {
            RuleTableError::MalformedRulePattern { pattern, .. } => assert_eq!(pattern, "(ия"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_regex_matches_empty() {
        let toml = table(
            r#"
alphabet = "и"

[mappings]
"и" = "i"

[[rules]]
regex = "я*"
to = "ya"
priority = 5
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("empty string"));
    }

    #[test]
    fn error_both_pattern_kinds() {
        let toml = table(
            r#"
alphabet = "и"

[mappings]
"и" = "i"

[[rules]]
from = "и"
regex = "и"
to = "i"
priority = 3
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::PatternKind(0)));
    }

    #[test]
    fn error_folded_uppercase_key() {
        let toml = table(
            r#"
case_mode = "folded"
alphabet = "и"

[mappings]
"И" = "i"
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::NotLowercase(_)));
    }

    #[test]
    fn error_empty_context_set() {
        let toml = table(
            r#"
alphabet = "е"

[mappings]
"е" = "e"

[[rules]]
from = "е"
to = "ye"
priority = 2
after = ""
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::EmptyContextSet(_)));
    }

    #[test]
    fn error_unknown_key() {
        let toml = table(
            r#"
alphabet = "а"
colour = "blue"

[mappings]
"а" = "a"
"#,
        );
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::Parse(_)));
    }

    #[test]
    fn error_empty_mappings() {
        let toml = table("alphabet = \"а\"\n\n[mappings]\n");
        let err = parse_method_toml(&toml).unwrap_err();
        assert!(matches!(err, RuleTableError::EmptyField("mappings")));
    }
}
