// ============================================================================
// Logging Bootstrap
// Installs a tracing-subscriber fmt layer for binaries, benches and demos
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Calling it again,
/// or after another subscriber was installed elsewhere, is a no-op.
///
/// Returns whether this call installed the subscriber.
pub fn init_logging() -> bool {
    if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok();

    if installed {
        LOGGING_INITIALIZED.store(true, Ordering::SeqCst);
    }
    installed
}

/// Whether `init_logging` installed the global subscriber in this process.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::SeqCst)
}
