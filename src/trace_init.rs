#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Trace file written under the directory passed to [`init_tracing`].
pub const TRACE_FILE: &str = "xlit-trace.jsonl";

/// Filter used when `RUST_LOG` is unset: engine and facade at debug.
pub const DEFAULT_FILTER: &str = "xlit_core=debug,xlit_engine=debug";

/// Route `tracing` events to `<log_dir>/xlit-trace.jsonl` as JSON lines.
///
/// Each event carries the enclosing `transliterate` span, so records can be
/// grouped by method id. Later calls are no-ops. Without the `trace` feature
/// this does nothing, and the engine's events are compiled out.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The writer must outlive every engine call in the host process.
        std::mem::forget(guard);

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init();

        match installed {
            Ok(()) => tracing::info!(version = env!("CARGO_PKG_VERSION"), "xlit tracing enabled"),
            // A host subscriber is already installed; events go there instead.
            Err(e) => eprintln!("xlit: tracing not installed: {e}"),
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
