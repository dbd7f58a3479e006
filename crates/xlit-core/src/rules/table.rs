use std::collections::{HashMap, HashSet};

use super::{Pattern, Rule, RuleTableError};
use crate::unicode::fold_char;

/// A method's rules, indexed by first source character.
///
/// Literal rules live in the bucket of their first character (folded for
/// case-insensitive tables); regex rules are candidates at every position.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    by_first: HashMap<char, Vec<usize>>,
    regex_rules: Vec<usize>,
    folded: bool,
}

impl RuleTable {
    /// Index `rules` and check table integrity.
    ///
    /// Fails when two literal rules with the same pattern share a priority, or
    /// when a character of `alphabet` has no context-free single-character rule.
    pub fn compile(rules: Vec<Rule>, folded: bool, alphabet: &str) -> Result<Self, RuleTableError> {
        let key = |c: char| if folded { fold_char(c) } else { c };

        let mut seen: HashSet<(Vec<char>, i32)> = HashSet::new();
        let mut covered: HashSet<char> = HashSet::new();
        let mut by_first: HashMap<char, Vec<usize>> = HashMap::new();
        let mut regex_rules = Vec::new();

        for (idx, rule) in rules.iter().enumerate() {
            match &rule.pattern {
                Pattern::Literal(chars) => {
                    let folded_chars: Vec<char> = chars.iter().map(|&c| key(c)).collect();
                    if !seen.insert((folded_chars.clone(), rule.priority)) {
                        return Err(RuleTableError::AmbiguousPriority {
                            pattern: rule.source(),
                            priority: rule.priority,
                        });
                    }
                    if folded_chars.len() == 1 && rule.context.is_unconditional() {
                        covered.insert(folded_chars[0]);
                    }
                    if let Some(&first) = folded_chars.first() {
                        by_first.entry(first).or_default().push(idx);
                    }
                }
                Pattern::Regex { .. } => regex_rules.push(idx),
            }
        }

        for c in alphabet.chars() {
            if !covered.contains(&key(c)) {
                return Err(RuleTableError::UncoveredCharacter(c));
            }
        }

        Ok(Self {
            rules,
            by_first,
            regex_rules,
            folded,
        })
    }

    /// Rules that could match starting with `c`: its literal bucket, then every regex rule.
    pub fn candidates(&self, c: char) -> impl Iterator<Item = &Rule> + '_ {
        let key = if self.folded { fold_char(c) } else { c };
        self.by_first
            .get(&key)
            .into_iter()
            .flatten()
            .chain(self.regex_rules.iter())
            .map(move |&idx| &self.rules[idx])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn has_regex(&self) -> bool {
        !self.regex_rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
