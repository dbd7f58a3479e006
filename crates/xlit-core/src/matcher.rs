//! Best-rule selection at a cursor position.

use std::borrow::Cow;

use crate::rules::{Pattern, Rule, RuleTable};
use crate::unicode::fold_char;

/// Input text split into code points, with byte offsets for regex matching.
pub struct SourceText<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// Byte offset of each char, plus `text.len()` as a sentinel.
    offsets: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            offsets.push(offset);
        }
        offsets.push(text.len());
        Self {
            text,
            chars,
            offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Text between two char positions.
    pub fn span(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    fn tail(&self, pos: usize) -> &'a str {
        &self.text[self.offsets[pos]..]
    }

    fn char_count(&self, pos: usize, byte_len: usize) -> usize {
        let end = self.offsets[pos] + byte_len;
        // Regex matches end on char boundaries, so `end` is always an entry.
        self.offsets[pos..].partition_point(|&o| o < end)
    }
}

#[derive(Debug)]
pub struct MatchResult<'t> {
    /// Source chars consumed.
    pub consumed: usize,
    pub rule: &'t Rule,
    /// Replacement with capture groups expanded.
    pub output: Cow<'t, str>,
}

/// Rank tuple: longer match, then higher priority, then literal over regex,
/// then earlier declaration.
fn outranks(a: &MatchResult<'_>, b: &MatchResult<'_>) -> bool {
    let key = |m: &MatchResult<'_>| (m.consumed, m.rule.priority, m.rule.is_literal());
    match key(a).cmp(&key(b)) {
        std::cmp::Ordering::Equal => a.rule.order < b.rule.order,
        ord => ord.is_gt(),
    }
}

/// Find the best rule matching at `pos`, or `None` when the character should
/// pass through unchanged.
pub fn find_best<'t>(table: &'t RuleTable, src: &SourceText<'_>, pos: usize) -> Option<MatchResult<'t>> {
    let chars = src.chars();
    let first = *chars.get(pos)?;
    let folded = table.is_folded();
    let norm = |c: char| if folded { fold_char(c) } else { c };

    let mut best: Option<MatchResult<'t>> = None;
    for rule in table.candidates(first) {
        let Some(candidate) = try_rule(rule, src, pos, folded) else {
            continue;
        };
        let prev = pos.checked_sub(1).map(|i| norm(chars[i]));
        let next = chars.get(pos + candidate.consumed).map(|&c| norm(c));
        if !rule.context.holds(prev, next) {
            continue;
        }
        if best.as_ref().map_or(true, |b| outranks(&candidate, b)) {
            best = Some(candidate);
        }
    }
    best
}

fn try_rule<'t>(rule: &'t Rule, src: &SourceText<'_>, pos: usize, folded: bool) -> Option<MatchResult<'t>> {
    match &rule.pattern {
        Pattern::Literal(pattern) => {
            let window = src.chars().get(pos..pos + pattern.len())?;
            let matched = if folded {
                window
                    .iter()
                    .zip(pattern)
                    .all(|(&c, &p)| fold_char(c) == p)
            } else {
                window == pattern.as_slice()
            };
            matched.then(|| MatchResult {
                consumed: pattern.len(),
                rule,
                output: Cow::Borrowed(rule.replacement.as_str()),
            })
        }
        Pattern::Regex { regex, .. } => {
            let caps = regex.captures(src.tail(pos))?;
            let whole = caps.get(0)?;
            if whole.is_empty() {
                return None;
            }
            let output = if rule.replacement.contains('$') {
                let mut expanded = String::new();
                caps.expand(&rule.replacement, &mut expanded);
                Cow::Owned(expanded)
            } else {
                Cow::Borrowed(rule.replacement.as_str())
            };
            Some(MatchResult {
                consumed: src.char_count(pos, whole.end()),
                rule,
                output,
            })
        }
    }
}
