//! The seam between the recording session and whatever feeds it input.
//!
//! The session never talks to an OS hook directly. It implements
//! [`EventSink`] and is wired to an [`EventSource`] once, at construction;
//! the source pushes every observed input event through the sink
//! unconditionally, and the session does the active-state gating.

use rdev::{Button, Key};
use thiserror::Error;

/// Discriminated payload delivered by an event source.
///
/// Mouse kinds always carry screen coordinates. Sources whose underlying
/// hook reports button or wheel events without a position fill in the last
/// pointer position they observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    PointerMove { x: i32, y: i32 },
    ButtonPress { x: i32, y: i32, button: Button },
    ButtonRelease { x: i32, y: i32, button: Button },
    Wheel { x: i32, y: i32, delta: i32 },
    KeyPress { key: Key },
    KeyRelease { key: Key },
}

/// Observer half of the seam, implemented by the recording session.
///
/// Called from the source's delivery thread for every observed event. Must
/// not block that thread beyond a short critical section; a stalled sink
/// starves the OS-level hook.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: RawEvent);
}

/// Lifecycle half of the seam.
pub trait EventSource: Send + Sync {
    /// Ask the source to begin delivering events to its sink.
    ///
    /// Issued by the session the first time it starts while the source is
    /// not already delivering, and never re-issued while [`is_delivering`]
    /// holds. A failed begin may be retried by a later session start.
    ///
    /// [`is_delivering`]: EventSource::is_delivering
    fn begin_delivery(&self) -> Result<(), SourceError>;

    /// Whether the source is currently delivering events.
    fn is_delivering(&self) -> bool;

    /// Detach the sink and stop delivering. Idempotent, never panics.
    fn shutdown(&self);
}

/// Failures raised by an event source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The OS-level hook could not be installed, typically for lack of
    /// input-monitoring permissions.
    #[error("failed to install global input hook: {0}")]
    HookInstall(String),

    /// The delivery thread could not be spawned.
    #[error("failed to spawn event delivery thread: {0}")]
    DeliveryThread(#[from] std::io::Error),

    /// The delivery thread exited without reporting a hook error.
    #[error("event delivery thread exited unexpectedly")]
    SourceClosed,
}
