use std::sync::Arc;

use tracing::debug;

use xlit_core::{Engine, MethodRegistry, TransliterationRequest};

use super::{XlitBatchResult, XlitError, XlitMethod, XlitRequest};

/// Handle over the process-wide method registry.
#[derive(uniffi::Object)]
pub struct XlitEngine {
    engine: Engine<'static>,
}

#[uniffi::export]
impl XlitEngine {
    #[uniffi::constructor]
    fn new() -> Arc<Self> {
        let registry = MethodRegistry::global();
        debug!(methods = registry.len(), "engine handle created");
        Arc::new(Self {
            engine: Engine::new(registry),
        })
    }

    fn transliterate(
        &self,
        method_id: String,
        text: String,
        match_case: bool,
    ) -> Result<String, XlitError> {
        Ok(self.engine.transliterate(&method_id, &text, match_case)?)
    }

    fn transliterate_batch(&self, requests: Vec<XlitRequest>) -> Vec<XlitBatchResult> {
        let requests: Vec<TransliterationRequest> = requests
            .into_iter()
            .map(|r| TransliterationRequest::new(r.method_id, r.text, r.match_case))
            .collect();
        self.engine
            .transliterate_batch(&requests)
            .into_iter()
            .map(|result| match result {
                Ok(text) => XlitBatchResult::Ok { text },
                Err(e) => XlitBatchResult::Failed { msg: e.to_string() },
            })
            .collect()
    }

    fn list_methods(&self) -> Vec<XlitMethod> {
        self.engine
            .list_methods()
            .into_iter()
            .map(XlitMethod::from)
            .collect()
    }

    fn method_count(&self) -> u32 {
        self.engine.registry().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_object_round_trip() {
        let engine = XlitEngine::new();
        assert_eq!(engine.method_count(), 25);
        let out = engine
            .transliterate(
                "Russian (Cyrillic)-->English (IC)".into(),
                "Москва".into(),
                true,
            )
            .unwrap();
        assert_eq!(out, "Moskva");
        assert!(matches!(
            engine.transliterate("nope".into(), "x".into(), false),
            Err(XlitError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn batch_reports_failures_in_place() {
        let engine = XlitEngine::new();
        let results = engine.transliterate_batch(vec![
            XlitRequest {
                method_id: "Serbian (Cyrillic)-->English (IC)".into(),
                text: "џ".into(),
                match_case: false,
            },
            XlitRequest {
                method_id: "nope".into(),
                text: "x".into(),
                match_case: false,
            },
        ]);
        assert_eq!(results[0], XlitBatchResult::Ok { text: "dz".into() });
        assert!(matches!(results[1], XlitBatchResult::Failed { .. }));
    }
}
