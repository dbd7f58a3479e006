//! Character-level helpers shared by the matcher and the case normalizer.

/// A letter that has an upper/lower distinction. Non-letters and caseless
/// scripts (CJK, Arabic) return false. Georgian Mkhedruli is lowercase, with
/// Mtavruli as its uppercase.
pub fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Single-character lowercase fold used for case-insensitive rule keys.
///
/// Characters whose lowercase form expands to several code points keep the
/// first one, so folding never changes the character count of a pattern.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

pub fn fold_str(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// For every position, whether it sits inside an alphabetic run ("word")
/// whose cased letters are all uppercase. A word needs at least two cased
/// letters to count, so a lone capital like `Щ` in `Щука` stays false.
pub fn word_upper_flags(chars: &[char]) -> Vec<bool> {
    let mut flags = vec![false; chars.len()];
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_alphabetic() {
            i += 1;
        }
        let mut cased = 0usize;
        let mut all_upper = true;
        for &c in &chars[start..i] {
            if is_cased(c) {
                cased += 1;
                all_upper &= c.is_uppercase();
            }
        }
        if cased >= 2 && all_upper {
            flags[start..i].fill(true);
        }
    }
    flags
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
pub fn title_case_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
