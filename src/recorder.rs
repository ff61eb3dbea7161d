//! The recording session: a start/stop-gated, timestamped action buffer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::events::UserAction;
use crate::hook::GlobalHook;
use crate::source::{EventSink, EventSource, RawEvent, SourceError};

/// Recorder tuning.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Initial capacity of the action buffer.
    pub buffer_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 4096,
        }
    }
}

/// Elapsed-time source for a session. Restarted on start, frozen on stop.
#[derive(Debug)]
struct Stopwatch {
    origin: Instant,
    frozen: Option<Duration>,
}

impl Stopwatch {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
            frozen: Some(Duration::ZERO),
        }
    }

    fn restart(&mut self) {
        self.origin = Instant::now();
        self.frozen = None;
    }

    /// Freeze the elapsed value. Keeps the existing one when already frozen.
    fn stop(&mut self) {
        if self.frozen.is_none() {
            self.frozen = Some(self.origin.elapsed());
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.frozen.unwrap_or_else(|| self.origin.elapsed()).as_millis() as u64
    }
}

/// Session state. One mutex over the gate, the buffer, and the stopwatch:
/// the active check and the append for a single event are atomic with
/// respect to a concurrent `start()` clearing the buffer.
struct SessionState {
    recording: bool,
    actions: Vec<UserAction>,
    stopwatch: Stopwatch,
}

/// Shared between the recorder handle and the source's delivery thread.
struct Shared {
    state: Mutex<SessionState>,
}

impl EventSink for Shared {
    fn on_event(&self, event: RawEvent) {
        let mut state = self.state.lock();
        if !state.recording {
            return;
        }
        let timestamp_ms = state.stopwatch.elapsed_ms();
        state.actions.push(UserAction::from_raw(event, timestamp_ms));
    }
}

/// A start/stop-gated recording session over a global input event source.
///
/// The source delivers raw events on its own thread; while the session is
/// active each one is stamped with the milliseconds elapsed since
/// [`start`](Recorder::start) and appended in arrival order. While idle,
/// events are discarded silently.
///
/// ```no_run
/// use action_recorder::Recorder;
///
/// # fn main() -> Result<(), action_recorder::SourceError> {
/// let recorder = Recorder::global();
/// recorder.start()?;
/// std::thread::sleep(std::time::Duration::from_secs(5));
/// let actions = recorder.stop();
/// println!("{} actions recorded", actions.len());
/// # Ok(())
/// # }
/// ```
pub struct Recorder {
    shared: Arc<Shared>,
    source: Box<dyn EventSource>,
}

impl Recorder {
    /// Recorder over the process-wide input hook. At most one per process;
    /// see [`GlobalHook`].
    pub fn global() -> Self {
        Self::new(GlobalHook::new)
    }

    /// Recorder over a caller-supplied source. The factory receives the
    /// sink the source must deliver into; wiring happens here, once.
    pub fn new<S, F>(source: F) -> Self
    where
        F: FnOnce(Arc<dyn EventSink>) -> S,
        S: EventSource + 'static,
    {
        Self::with_config(RecorderConfig::default(), source)
    }

    pub fn with_config<S, F>(config: RecorderConfig, source: F) -> Self
    where
        F: FnOnce(Arc<dyn EventSink>) -> S,
        S: EventSource + 'static,
    {
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                recording: false,
                actions: Vec::with_capacity(config.buffer_capacity),
                stopwatch: Stopwatch::new(),
            }),
        });
        let sink: Arc<dyn EventSink> = shared.clone();
        let source = Box::new(source(sink));
        Self { shared, source }
    }

    /// Begin a session.
    ///
    /// No-op while already recording. Otherwise clears the buffer, restarts
    /// the elapsed clock, and opens the gate. If the source is not yet
    /// delivering it is told to begin; that instruction is never re-issued
    /// while delivery holds. A failed begin leaves the session idle and
    /// returns the error.
    pub fn start(&self) -> Result<(), SourceError> {
        {
            let mut state = self.shared.state.lock();
            if state.recording {
                return Ok(());
            }
            state.actions.clear();
            state.stopwatch.restart();
            state.recording = true;
        }

        if !self.source.is_delivering() {
            if let Err(err) = self.source.begin_delivery() {
                self.shared.state.lock().recording = false;
                return Err(err);
            }
        }

        debug!("recording session started");
        Ok(())
    }

    /// End the session and take a snapshot of everything recorded so far.
    ///
    /// Closes the gate, freezes the clock (without resetting it), and
    /// returns an independent copy of the buffer in arrival order. Total:
    /// when called while idle it returns the current buffer unchanged, and
    /// a second consecutive call returns the same sequence.
    ///
    /// Events still in flight on the delivery thread at the moment of the
    /// call may or may not make the snapshot; that race is inherent and
    /// deliberate.
    pub fn stop(&self) -> Vec<UserAction> {
        let mut state = self.shared.state.lock();
        if state.recording {
            debug!(actions = state.actions.len(), "recording session stopped");
        }
        state.recording = false;
        state.stopwatch.stop();
        state.actions.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.shared.state.lock().recording
    }

    /// Number of actions buffered so far.
    pub fn action_count(&self) -> usize {
        self.shared.state.lock().actions.len()
    }

    /// Release the event source. Idempotent; also runs on drop.
    pub fn dispose(&self) {
        self.source.shutdown();
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.source.shutdown();
    }
}
