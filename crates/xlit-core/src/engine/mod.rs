//! Single-pass transliteration over a method's rule table.

mod batch;
#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::case::CasePattern;
use crate::matcher::{find_best, SourceText};
use crate::registry::{Method, MethodDescriptor, MethodRegistry};
use crate::unicode::{title_case_words, word_upper_flags};

pub use batch::TransliterationRequest;

/// Hard ceiling on input length, in characters.
pub const MAX_INPUT_CHARS: usize = 250_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransliterationError {
    #[error("unknown transliteration method: {0}")]
    UnknownMethod(String),
    #[error("input of {len} characters exceeds the maximum of {max}")]
    InputTooLarge { len: usize, max: usize },
}

/// Stateless front door over a read-only registry.
#[derive(Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r MethodRegistry,
}

impl Engine<'static> {
    pub fn global() -> Self {
        Self::new(MethodRegistry::global())
    }
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r MethodRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r MethodRegistry {
        self.registry
    }

    pub fn list_methods(&self) -> Vec<MethodDescriptor> {
        self.registry.list_methods()
    }

    pub fn transliterate(
        &self,
        method_id: &str,
        text: &str,
        match_case: bool,
    ) -> Result<String, TransliterationError> {
        let method = self
            .registry
            .resolve(method_id)
            .ok_or_else(|| TransliterationError::UnknownMethod(method_id.to_string()))?;
        check_size(text)?;
        Ok(transliterate_with(method, text, match_case))
    }
}

/// Transliterate with the global registry.
pub fn transliterate(
    method_id: &str,
    text: &str,
    match_case: bool,
) -> Result<String, TransliterationError> {
    Engine::global().transliterate(method_id, text, match_case)
}

fn check_size(text: &str) -> Result<(), TransliterationError> {
    // A UTF-8 string never has more chars than bytes.
    if text.len() <= MAX_INPUT_CHARS {
        return Ok(());
    }
    let len = text.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(TransliterationError::InputTooLarge {
            len,
            max: MAX_INPUT_CHARS,
        });
    }
    Ok(())
}

/// Run one method over `text`. Infallible once the method is resolved and
/// the size checked.
pub fn transliterate_with(method: &Method, text: &str, match_case: bool) -> String {
    let _span = debug_span!("transliterate", method = %method.id).entered();

    let src = SourceText::new(text);
    let apply_case = method.applies_case(match_case);
    let upper_words = if apply_case {
        word_upper_flags(src.chars())
    } else {
        Vec::new()
    };

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut pos = 0;
    let mut matched = 0usize;
    while pos < src.len() {
        let Some(m) = find_best(&method.table, &src, pos) else {
            out.push(src.chars()[pos]);
            pos += 1;
            continue;
        };
        if apply_case {
            let span = src.span(pos, pos + m.consumed);
            let pattern = CasePattern::classify_in_word(span, upper_words[pos]);
            out.push_str(&pattern.apply(&m.output));
        } else {
            out.push_str(&m.output);
        }
        pos += m.consumed;
        matched += 1;
    }

    if method.title_case_output {
        out = title_case_words(&out);
    }
    debug!(chars = src.len(), matched, "transliterated");
    out
}
