//! Signal-triggered flush
//!
//! Opt-in: nothing is registered until [`install_signal_flush`] is called.
//! The handlers flush the global logger and then emulate the default
//! disposition for the signal, so a SIGTERM still terminates the process,
//! after the queue drained.
//!
//! Hazard, inherited from the design: `flush` takes ordinary locks, which
//! are not async-signal-safe. A signal landing while the writer holds a
//! lock can deadlock the handler. This is accepted best-effort behavior
//! for a diagnostic channel, not hidden behind unverified lock-free
//! machinery.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use signal_hook::consts::signal::{SIGABRT, SIGFPE, SIGILL, SIGINT, SIGSEGV, SIGTERM};
use signal_hook::low_level;
use std::sync::atomic::{AtomicBool, Ordering};

/// Termination signals that trigger a flush before the default action.
pub const FLUSH_SIGNALS: [i32; 6] = [SIGABRT, SIGFPE, SIGILL, SIGINT, SIGSEGV, SIGTERM];

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Register flush-then-terminate handlers for [`FLUSH_SIGNALS`].
///
/// Instantiates the global logger if needed. Calling twice is a no-op.
pub fn install_signal_flush() -> Result<()> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    // The logger must exist before the first signal can arrive
    let _ = Logger::global();

    for sig in FLUSH_SIGNALS {
        // SAFETY: the handler only touches the global logger, which is
        // 'static and never deallocated; see the module hazard note for
        // the lock caveat.
        unsafe {
            low_level::register(sig, move || {
                if let Some(logger) = Logger::try_global() {
                    logger.flush();
                }
                let _ = low_level::emulate_default_handler(sig);
            })
        }
        .map_err(|e| LoggerError::signal(sig, e.to_string()))?;
    }
    Ok(())
}
