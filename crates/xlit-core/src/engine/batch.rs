use std::num::NonZeroUsize;
use std::thread;

use tracing::debug;

use super::{Engine, TransliterationError};
use crate::settings::settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliterationRequest {
    pub method_id: String,
    pub text: String,
    pub match_case: bool,
}

impl TransliterationRequest {
    pub fn new(method_id: impl Into<String>, text: impl Into<String>, match_case: bool) -> Self {
        Self {
            method_id: method_id.into(),
            text: text.into(),
            match_case,
        }
    }
}

impl Engine<'_> {
    /// Run independent requests on worker threads. Results keep request order.
    pub fn transliterate_batch(
        &self,
        requests: &[TransliterationRequest],
    ) -> Vec<Result<String, TransliterationError>> {
        self.transliterate_batch_with_workers(requests, settings().batch.workers)
    }

    /// `workers == 0` uses the available parallelism.
    pub fn transliterate_batch_with_workers(
        &self,
        requests: &[TransliterationRequest],
        workers: usize,
    ) -> Vec<Result<String, TransliterationError>> {
        let workers = resolve_workers(workers).min(requests.len());
        debug!(requests = requests.len(), workers, "batch");

        let run = |r: &TransliterationRequest| self.transliterate(&r.method_id, &r.text, r.match_case);
        if workers <= 1 {
            return requests.iter().map(run).collect();
        }

        let chunk = requests.len().div_ceil(workers);
        thread::scope(|s| {
            let handles: Vec<_> = requests
                .chunks(chunk)
                .map(|part| s.spawn(move || part.iter().map(run).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }
}

fn resolve_workers(workers: usize) -> usize {
    if workers > 0 {
        return workers;
    }
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
