//! Substitution rules and their compiled, first-character-indexed table.

pub mod config;
pub mod table;

use regex::Regex;

pub use config::{parse_method_toml, RuleTableError};
pub use table::RuleTable;

/// What a rule matches at the cursor.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(Vec<char>),
    /// Compiled as `^(?:source)`, run against the input remaining at the cursor.
    ///
    /// The regex never sees text before the cursor, so a leading `\b` always
    /// holds. Conditions on the preceding character belong in `word_start` or
    /// `after`.
    Regex { source: String, regex: Regex },
}

/// Conditions on the characters surrounding a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Preceding character is absent or not alphabetic.
    pub word_start: bool,
    /// Following character is absent or not alphabetic.
    pub word_end: bool,
    /// Preceding character must exist and belong to this set.
    pub after: Option<Vec<char>>,
    /// Following character must exist and belong to this set.
    pub before: Option<Vec<char>>,
}

impl Context {
    pub fn is_unconditional(&self) -> bool {
        !self.word_start && !self.word_end && self.after.is_none() && self.before.is_none()
    }

    /// `prev` / `next` are the characters around the match, already folded
    /// when the table is case-insensitive.
    pub fn holds(&self, prev: Option<char>, next: Option<char>) -> bool {
        if self.word_start && prev.is_some_and(char::is_alphabetic) {
            return false;
        }
        if self.word_end && next.is_some_and(char::is_alphabetic) {
            return false;
        }
        if let Some(set) = &self.after {
            if !prev.is_some_and(|c| set.contains(&c)) {
                return false;
            }
        }
        if let Some(set) = &self.before {
            if !next.is_some_and(|c| set.contains(&c)) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub replacement: String,
    pub priority: i32,
    pub context: Context,
    /// Declaration index within the table; earlier wins a full tie.
    pub order: usize,
}

impl Rule {
    pub fn is_literal(&self) -> bool {
        matches!(self.pattern, Pattern::Literal(_))
    }

    /// Pattern text as written in the table.
    pub fn source(&self) -> String {
        match &self.pattern {
            Pattern::Literal(chars) => chars.iter().collect(),
            Pattern::Regex { source, .. } => source.clone(),
        }
    }
}
