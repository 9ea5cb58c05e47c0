//! Library-wide diagnostic switch.
//!
//! Messages emitted by this crate are routed to a [`SwitchLogger`] owned by
//! the library, never to the host application's global `log` logger. The
//! logger starts disabled; [`enable_log`] sends messages to stderr with a
//! time-only prefix and [`disable_log`] discards them again.

use jiff::Zoned;
use log::{Log, Metadata, Record};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};

type Sink = Box<dyn Write + Send>;

static LOGGER: LazyLock<SwitchLogger> = LazyLock::new(SwitchLogger::new);

/// Enables logging messages from the library.
pub fn enable_log() {
    LOGGER.enable();
}

/// Disables logging messages from the library.
pub fn disable_log() {
    LOGGER.disable();
}

/// Whether library logging is currently enabled.
pub fn is_log_enabled() -> bool {
    LOGGER.is_enabled()
}

/// The process-wide logger used by the library. Crate code logs through it
/// explicitly, e.g. `log::debug!(logger: logger(), ...)`.
pub fn logger() -> &'static SwitchLogger {
    &LOGGER
}

struct State {
    enabled: bool,
    time_prefix: bool,
    discard: io::Sink,
    writer: Sink,
}

impl State {
    fn destination(&mut self) -> &mut dyn Write {
        if self.enabled {
            &mut *self.writer
        } else {
            &mut self.discard
        }
    }
}

/// A two-state logger: disabled (discard everything) or enabled (write each
/// record on its own line, prefixed with the local wall-clock time).
///
/// The flag, prefix and destination are switched together under one lock, so
/// a record can never be written with a stale prefix or to a stale sink.
pub struct SwitchLogger {
    enabled: AtomicBool,
    state: Mutex<State>,
}

impl SwitchLogger {
    /// A disabled logger that writes to stderr once enabled.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    /// A disabled logger that writes to `writer` once enabled.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            state: Mutex::new(State {
                enabled: false,
                time_prefix: false,
                discard: io::sink(),
                writer,
            }),
        }
    }

    pub fn enable(&self) {
        let mut state = self.lock();
        if state.enabled {
            return;
        }
        state.enabled = true;
        state.time_prefix = true;
        self.enabled.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        let mut state = self.lock();
        if !state.enabled {
            return;
        }
        state.enabled = false;
        state.time_prefix = false;
        self.enabled.store(false, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while writing a log line leaves the state itself intact.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SwitchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SwitchLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchLogger")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Log for SwitchLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        self.is_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.is_enabled() {
            return;
        }

        let mut state = self.lock();
        let line = if state.time_prefix {
            format!("{} {}\n", Zoned::now().strftime("%H:%M:%S"), record.args())
        } else {
            format!("{}\n", record.args())
        };
        // Logging must never fail the caller.
        let _ = state.destination().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.lock().destination().flush();
    }
}
