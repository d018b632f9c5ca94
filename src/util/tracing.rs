//! Tracing helpers
// (c) 2026 sbts contributors

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::{prelude::*, EnvFilter};

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Environment variable that controls what gets logged
const STANDARD_ENV_VAR: &str = "RUST_LOG";

/// Log filter setup:
/// use `RUST_LOG` if it was set; if it wasn't, log only sbts items at the
/// given trace level.
struct FilterResult {
    filter: EnvFilter,
    used_env: bool,
}

fn filter_for(trace_level: &str) -> anyhow::Result<FilterResult> {
    EnvFilter::try_from_env(STANDARD_ENV_VAR)
        .map(|filter| FilterResult {
            filter,
            used_env: true,
        })
        .or_else(|e| {
            // The env var was unset or invalid. Which is it?
            if std::env::var(STANDARD_ENV_VAR).is_ok() {
                anyhow::bail!("{STANDARD_ENV_VAR} (set in environment) was not understood: {e}");
            }
            Ok(FilterResult {
                filter: EnvFilter::try_new(format!("sbts={trace_level}"))?,
                used_env: false,
            })
        })
}

/// Set up rust tracing to stderr.
///
/// By default we log only our own events at the given trace level; this can
/// be overridden by setting `RUST_LOG`, in which case event targets are shown.
///
/// **CAUTION:** If this function fails, tracing won't be set up; callers must
/// take extra care to report the error.
///
/// **NOTE:** You can only run this once per process. A global bool prevents
/// re-running.
pub(crate) fn setup(trace_level: &str) -> anyhow::Result<()> {
    if is_initialised() {
        tracing::warn!("tracing::setup called a second time (ignoring)");
        return Ok(());
    }
    TRACING_INITIALIZED.store(true, Ordering::Relaxed);

    let filter = filter_for(trace_level)?;
    // If we used the environment variable, show targets; if we did not,
    // we're only logging sbts, so don't.
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(filter.used_env)
        .with_writer(std::io::stderr)
        .with_filter(filter.filter);
    tracing_subscriber::registry().with(layer).init();
    Ok(())
}

/// Has `setup` run yet?
pub fn is_initialised() -> bool {
    TRACING_INITIALIZED.load(Ordering::Relaxed)
}
