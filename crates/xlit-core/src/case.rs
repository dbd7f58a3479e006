//! Case pattern detection on a matched source span and re-application to the
//! replacement.

use crate::unicode::is_cased;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePattern {
    AllUpper,
    AllLower,
    /// First letter upper, the rest lower.
    Title,
    /// Replacement is emitted verbatim.
    Mixed,
}

impl CasePattern {
    /// Classify a span on its own, as if it were a whole word.
    pub fn classify(span: &str) -> Self {
        Self::classify_in_word(span, true)
    }

    /// Classify a span that sits inside a word.
    ///
    /// A span with a single uppercase letter takes its word's context: inside
    /// an all-upper word it is `AllUpper`, otherwise `Title` (so `Щ` in `Щука`
    /// expands to `Shch`, while in `ЩУКА` it expands to `SHCH`).
    pub fn classify_in_word(span: &str, word_all_upper: bool) -> Self {
        let mut letters = span.chars().filter(|&c| is_cased(c));
        let Some(first) = letters.next() else {
            return CasePattern::Mixed;
        };
        let rest: Vec<char> = letters.collect();

        if first.is_uppercase() && rest.iter().all(|c| c.is_uppercase()) {
            if rest.is_empty() && !word_all_upper {
                return CasePattern::Title;
            }
            return CasePattern::AllUpper;
        }
        if first.is_lowercase() && rest.iter().all(|c| c.is_lowercase()) {
            return CasePattern::AllLower;
        }
        if first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()) {
            return CasePattern::Title;
        }
        CasePattern::Mixed
    }

    pub fn apply(self, replacement: &str) -> String {
        match self {
            CasePattern::AllUpper => replacement.to_uppercase(),
            CasePattern::AllLower => replacement.to_lowercase(),
            CasePattern::Title => {
                let mut out = String::with_capacity(replacement.len());
                let mut seen_letter = false;
                for c in replacement.chars() {
                    if !is_cased(c) {
                        out.push(c);
                    } else if seen_letter {
                        out.extend(c.to_lowercase());
                    } else {
                        out.extend(c.to_uppercase());
                        seen_letter = true;
                    }
                }
                out
            }
            CasePattern::Mixed => replacement.to_string(),
        }
    }
}
