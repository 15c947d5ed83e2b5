//! monitor.rs - The clipboard change-detection loop.
//!
//! A polling state machine that reads the platform clipboard through the
//! `ClipboardProvider` capability, detects change relative to the last
//! externally observed value, runs the sanitization engine, and writes the
//! result back. After a successful write-back `last_observed` is set to the
//! sanitized text, so the monitor's own write is never re-detected as new
//! external input on the next tick.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::engine::Engine;
use crate::errors::SafecpError;

/// Default poll cadence of the monitor loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Platform clipboard capability consumed by the monitor.
///
/// `read` returns `Ok(None)` when the clipboard holds no text; transient
/// failures surface as `SafecpError::Provider` and are retried on the next
/// tick.
pub trait ClipboardProvider {
    fn read(&mut self) -> Result<Option<String>, SafecpError>;
    fn write(&mut self, text: &str) -> Result<(), SafecpError>;
}

/// The observable result of one poll tick, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clipboard empty or holding non-text content.
    Empty,
    /// Clipboard text equals the last observed value; nothing to do.
    Unchanged,
    /// New text, but no pattern matched; write-back skipped.
    Clean,
    /// New text sanitized and written back; carries the number of distinct
    /// values replaced.
    Sanitized(usize),
    /// Transient provider read failure; retried next tick.
    ReadError,
    /// Transient provider write failure; retried next tick.
    WriteError,
    /// Engine failure; tick skipped, clipboard left untouched, and the
    /// change re-detected on the next tick. Not produced by the bundled
    /// regex engine, which has no match-time failure path.
    EngineError,
}

/// The clipboard monitor, owning the engine and the change-detection state.
pub struct ClipboardMonitor<P: ClipboardProvider> {
    provider: P,
    engine: Engine,
    last_observed: String,
    poll_interval: Duration,
    stop: Arc<AtomicBool>,
}

impl<P: ClipboardProvider> ClipboardMonitor<P> {
    pub fn new(provider: P, engine: Engine) -> Self {
        Self {
            provider,
            engine,
            last_observed: String::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Handle for requesting a cooperative stop; observed at the top of each
    /// idle tick. An in-flight check-sanitize-write pass always completes.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the poll loop until the stop signal is set.
    pub fn run(&mut self) {
        info!("Starting clipboard monitor (poll interval {:?}).", self.poll_interval);
        while !self.stop.load(Ordering::SeqCst) {
            let _ = self.tick();
            thread::sleep(self.poll_interval);
        }
        info!("Clipboard monitor stopped.");
    }

    /// Performs one check-sanitize-write pass.
    pub fn tick(&mut self) -> TickOutcome {
        let text = match self.provider.read() {
            Ok(Some(text)) => text,
            Ok(None) => return TickOutcome::Empty,
            Err(e) => {
                warn!("Clipboard read failed, retrying next tick: {}", e);
                return TickOutcome::ReadError;
            }
        };

        if text.is_empty() {
            return TickOutcome::Empty;
        }
        if text == self.last_observed {
            return TickOutcome::Unchanged;
        }

        // Record the raw value before sanitizing, so a concurrent external
        // write during sanitization is not lost on the next tick. The
        // previous value is kept so failed passes can roll back and retry.
        let previous = std::mem::replace(&mut self.last_observed, text.clone());

        let outcome = match self.engine.sanitize(&text) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Sanitization failed, skipping tick: {}", e);
                // Roll back so the unchanged raw text is re-detected and the
                // pass is retried on the next tick.
                self.last_observed = previous;
                return TickOutcome::EngineError;
            }
        };

        if outcome.substitutions.is_empty() {
            debug!("Clipboard changed, no sensitive values found.");
            return TickOutcome::Clean;
        }

        match self.provider.write(&outcome.sanitized) {
            Ok(()) => {
                // Self-trigger suppression: the next read of our own write
                // must compare equal and be treated as already observed.
                self.last_observed = outcome.sanitized;
                info!(
                    "Replaced {} sensitive value(s) on the clipboard.",
                    outcome.substitutions.len()
                );
                TickOutcome::Sanitized(outcome.substitutions.len())
            }
            Err(e) => {
                warn!("Clipboard write failed, retrying next tick: {}", e);
                // Roll back so the raw text still on the clipboard is
                // re-detected and the sanitize-write pass runs again.
                self.last_observed = previous;
                TickOutcome::WriteError
            }
        }
    }

    /// The monitor's current memory of the clipboard content.
    pub fn last_observed(&self) -> &str {
        &self.last_observed
    }
}
