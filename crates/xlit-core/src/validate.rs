//! Input checks a caller runs before handing text to the engine.
//!
//! The validator reports every violated limit at once, optionally strips
//! markup-like payloads and control characters first, and warns about
//! suspicious content that survives.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::registry::MethodRegistry;
use crate::settings::{settings, LimitSettings};

/// Labels and sources of the markup patterns stripped by sanitization.
const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    ("script tag", r"<script[^>]*>.*?</script>"),
    ("javascript: url", r"javascript:"),
    ("base64 data url", r"data:.*base64"),
    ("vbscript: url", r"vbscript:"),
    ("event handler", r"on\w+\s*="),
];

fn dangerous_patterns() -> &'static [(&'static str, Regex)] {
    static COMPILED: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        DANGEROUS_PATTERNS
            .iter()
            .map(|&(label, src)| {
                let re = RegexBuilder::new(src)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .expect("built-in pattern must compile");
                (label, re)
            })
            .collect()
    })
}

/// General category C (control, format, private use, unassigned) except
/// the whitespace controls kept for formatting.
fn other_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{C}&&[^\n\r\t]]").expect("built-in pattern must compile"))
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{4,}").expect("built-in pattern must compile"))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("text must contain at least {min} non-blank character(s)")]
    TooShort { min: usize },
    #[error("text exceeds maximum length of {max} characters ({len})")]
    TooLong { len: usize, max: usize },
    #[error("text exceeds maximum of {max} lines ({lines})")]
    TooManyLines { lines: usize, max: usize },
    #[error("{} exceed maximum length of {max} characters", describe_lines(.lines))]
    LinesTooLong { lines: Vec<usize>, max: usize },
    #[error("unknown transliteration method: {0}")]
    UnknownMethod(String),
}

fn describe_lines(lines: &[usize]) -> String {
    if lines.len() <= 3 {
        let list: Vec<String> = lines.iter().map(usize::to_string).collect();
        format!("lines {}", list.join(", "))
    } else {
        format!("{} lines", lines.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    let parts: Vec<String> = issues.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// Sanitized text when sanitization was requested, otherwise the input.
    pub text: String,
    pub warnings: Vec<String>,
}

pub struct InputValidator {
    limits: LimitSettings,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(settings().limits.clone())
    }
}

impl InputValidator {
    pub fn new(limits: LimitSettings) -> Self {
        Self { limits }
    }

    /// Length, line-count, and per-line checks. Returns all issues found.
    pub fn check_length(&self, text: &str) -> Vec<ValidationIssue> {
        let limits = &self.limits;
        if text.trim().chars().count() < limits.min_text_chars {
            return vec![ValidationIssue::TooShort {
                min: limits.min_text_chars,
            }];
        }

        let mut issues = Vec::new();
        let len = text.chars().count();
        if len > limits.max_input_chars {
            issues.push(ValidationIssue::TooLong {
                len,
                max: limits.max_input_chars,
            });
        }
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() > limits.max_lines {
            issues.push(ValidationIssue::TooManyLines {
                lines: lines.len(),
                max: limits.max_lines,
            });
        }
        let long: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > limits.max_line_chars)
            .map(|(i, _)| i + 1)
            .collect();
        if !long.is_empty() {
            issues.push(ValidationIssue::LinesTooLong {
                lines: long,
                max: limits.max_line_chars,
            });
        }
        issues
    }

    /// Labels of the dangerous patterns present in `text`.
    pub fn detect_dangerous(&self, text: &str) -> Vec<&'static str> {
        dangerous_patterns()
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|&(label, _)| label)
            .collect()
    }

    /// NFC-normalize, strip dangerous patterns and category C characters
    /// (keeping `\n`, `\r`, `\t`), trim trailing whitespace per line, and
    /// cap blank-line runs.
    pub fn sanitize(&self, text: &str) -> String {
        let mut cleaned: String = text.nfc().collect();
        for (_, re) in dangerous_patterns() {
            cleaned = re.replace_all(&cleaned, "").into_owned();
        }
        let cleaned = other_chars().replace_all(&cleaned, "");
        let trimmed: Vec<&str> = cleaned.split('\n').map(str::trim_end).collect();
        blank_lines()
            .replace_all(&trimmed.join("\n"), "\n\n\n")
            .into_owned()
    }

    /// Full pre-engine check: method id, optional sanitization, limits, and
    /// dangerous-content warnings.
    pub fn validate(
        &self,
        registry: &MethodRegistry,
        method_id: &str,
        text: &str,
        sanitize: bool,
    ) -> Result<ValidatedInput, ValidationError> {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if registry.resolve(method_id).is_none() {
            issues.push(ValidationIssue::UnknownMethod(method_id.to_string()));
        }

        let text = if sanitize {
            let original = text.chars().count();
            let cleaned = self.sanitize(text);
            if (cleaned.chars().count() as f64) < original as f64 * 0.95 {
                warnings.push(
                    "text was modified during sanitization (potentially unsafe content removed)"
                        .to_string(),
                );
            }
            cleaned
        } else {
            text.to_string()
        };

        issues.extend(self.check_length(&text));

        let dangerous = self.detect_dangerous(&text);
        if !dangerous.is_empty() {
            warn!(patterns = ?dangerous, "dangerous content in input");
            warnings.push(format!(
                "potentially unsafe content detected: {}",
                dangerous.join(", ")
            ));
        }

        if issues.is_empty() {
            Ok(ValidatedInput { text, warnings })
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RU_IC: &str = "Russian (Cyrillic)-->English (IC)";

    fn small() -> InputValidator {
        InputValidator::new(LimitSettings {
            max_input_chars: 50,
            max_line_chars: 10,
            max_lines: 3,
            min_text_chars: 1,
        })
    }

    #[test]
    fn accepts_plain_text() {
        let v = InputValidator::default();
        let out = v
            .validate(MethodRegistry::global(), RU_IC, "Москва", false)
            .unwrap();
        assert_eq!(out.text, "Москва");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn blank_text_is_too_short() {
        let issues = small().check_length("   \n ");
        assert_eq!(issues, vec![ValidationIssue::TooShort { min: 1 }]);
    }

    #[test]
    fn reports_every_limit() {
        let text = format!("{}\nb\nc\nd", "я".repeat(60));
        let issues = small().check_length(&text);
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ValidationIssue::TooLong { len: 66, max: 50 }));
        assert!(matches!(issues[1], ValidationIssue::TooManyLines { lines: 4, max: 3 }));
        assert_eq!(
            issues[2],
            ValidationIssue::LinesTooLong {
                lines: vec![1],
                max: 10
            }
        );
    }

    #[test]
    fn long_line_message() {
        let few = ValidationIssue::LinesTooLong {
            lines: vec![2, 5],
            max: 10,
        };
        assert_eq!(few.to_string(), "lines 2, 5 exceed maximum length of 10 characters");
        let many = ValidationIssue::LinesTooLong {
            lines: vec![1, 2, 3, 4],
            max: 10,
        };
        assert_eq!(many.to_string(), "4 lines exceed maximum length of 10 characters");
    }

    #[test]
    fn unknown_method_is_an_issue() {
        let err = InputValidator::default()
            .validate(MethodRegistry::global(), "Select method", "текст", false)
            .unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::UnknownMethod("Select method".into())]
        );
        assert!(err.to_string().contains("Select method"));
    }

    #[test]
    fn sanitize_strips_markup_and_controls() {
        let v = InputValidator::default();
        let dirty = "При<script>alert(1)</script>вет\u{7}  \njavascript:мир\n\n\n\n\nконец";
        assert_eq!(v.sanitize(dirty), "Привет\nмир\n\n\nконец");
    }

    #[test]
    fn sanitize_keeps_tabs_and_case_insensitive() {
        let v = InputValidator::default();
        assert_eq!(v.sanitize("a\tb ONCLICK = x"), "a\tb  x");
    }

    #[test]
    fn warns_on_shrink_and_dangerous_content() {
        let v = InputValidator::default();
        let out = v
            .validate(
                MethodRegistry::global(),
                RU_IC,
                "текст <script>alert('x')</script>",
                true,
            )
            .unwrap();
        assert_eq!(out.text, "текст");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("sanitization"));

        let out = v
            .validate(MethodRegistry::global(), RU_IC, "см. javascript:void", false)
            .unwrap();
        assert!(out.warnings[0].contains("javascript: url"));
    }

    #[test]
    fn sanitize_composes_combining_marks() {
        let v = InputValidator::default();
        let decomposed = "Андреи\u{306}";
        let out = v
            .validate(MethodRegistry::global(), RU_IC, decomposed, true)
            .unwrap();
        assert_eq!(out.text, "Андрей");
        assert_eq!(
            crate::transliterate(RU_IC, &out.text, false).unwrap(),
            "Andrey"
        );
    }

    #[test]
    fn sanitize_drops_format_and_private_use() {
        let v = InputValidator::default();
        assert_eq!(v.sanitize("\u{FEFF}мир\u{200B}\u{E000}!\u{AD}"), "мир!");
        assert_eq!(v.sanitize("а\rб\tв\nг"), "а\rб\tв\nг");
    }
}
