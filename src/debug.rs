//! Debug logging for the conversion engine and parser.
//!
//! Off by default. Switched on with [`enable`] or by setting
//! `CHROMAGRAPH_DEBUG=1` before the first conversion. Records go to stderr
//! as `chromagraph TRACE convert: message (+12ms)`.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Environment variable that turns logging on.
pub const ENV_VAR: &str = "CHROMAGRAPH_DEBUG";

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Set on the first [`enable`]; offsets are measured from here.
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Enables debug logging globally.
pub fn enable() {
    EPOCH.get_or_init(Instant::now);
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Disables debug logging globally.
pub fn disable() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns true if records are currently written.
#[inline]
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed) || capture::active()
}

/// Enables logging when [`ENV_VAR`] is `1` or `true`.
///
/// Returns whether logging ended up enabled.
pub fn init_from_env() -> bool {
    let requested = std::env::var(ENV_VAR)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE"))
        .unwrap_or(false);
    if requested && !is_enabled() {
        enable();
    }
    is_enabled()
}

fn offset_ms() -> u128 {
    EPOCH.get().map_or(0, |epoch| epoch.elapsed().as_millis())
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Path searches and scope timing
    Trace,
    /// Cache fills, detection misses
    Debug,
    /// Input the library refused
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN",
        })
    }
}

fn write_record(
    out: &mut impl Write,
    level: Level,
    component: &str,
    message: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "chromagraph {level:<5} {component}: {message} (+{}ms)",
        offset_ms()
    )
}

/// Writes a record to stderr if logging is enabled.
pub fn log(level: Level, component: &str, message: &str) {
    if !is_enabled() {
        return;
    }
    if capture::record(level, component, message) {
        return;
    }
    let _ = write_record(&mut io::stderr().lock(), level, component, message);
}


#[cfg(not(test))]
mod capture {
    use super::Level;

    #[inline]
    pub(crate) const fn active() -> bool {
        false
    }

    #[inline]
    pub(crate) fn record(_: Level, _: &str, _: &str) -> bool {
        false
    }
}

/// Logs with format arguments.
#[macro_export]
macro_rules! debug_log {
    ($level:expr, $component:expr, $($arg:tt)*) => {
        if $crate::debug::is_enabled() {
            $crate::debug::log($level, $component, &format!($($arg)*));
        }
    };
}

/// Trace-level log.
#[macro_export]
macro_rules! trace {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Trace, $component, $($arg)*)
    };
}

/// Debug-level log.
#[macro_export]
macro_rules! debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Debug, $component, $($arg)*)
    };
}

/// Warn-level log.
#[macro_export]
macro_rules! warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Warn, $component, $($arg)*)
    };
}

/// Scope timer; traces the operation on creation and its duration on drop.
pub struct TimingGuard {
    component: &'static str,
    operation: String,
    start: Instant,
}

impl TimingGuard {
    /// Creates a new timing guard.
    pub fn new(component: &'static str, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        crate::trace!(component, "begin {operation}");
        Self {
            component,
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        crate::trace!(
            self.component,
            "end {} after {:.3}ms",
            self.operation,
            self.start.elapsed().as_secs_f64() * 1000.0
        );
    }
}

/// Times the rest of the enclosing scope.
#[macro_export]
macro_rules! time_scope {
    ($component:expr, $operation:expr) => {
        let _guard = $crate::debug::TimingGuard::new($component, $operation);
    };
}
