//! action-recorder - start/stop-gated recording of global input events
//!
//! Records mouse and keyboard activity system-wide, stamps every event with
//! the milliseconds elapsed since the session started, and buffers it in
//! memory until `stop()` hands back an independent snapshot for playback or
//! analysis.
//!
//! ## Example
//!
//! ```no_run
//! use action_recorder::prelude::*;
//!
//! # fn main() -> Result<(), SourceError> {
//! let recorder = Recorder::global();
//!
//! recorder.start()?;
//! std::thread::sleep(std::time::Duration::from_secs(5));
//! let actions = recorder.stop();
//!
//! for action in &actions {
//!     println!("{action:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The session itself is hook-agnostic: it implements [`EventSink`] and is
//! wired at construction to any [`EventSource`]. [`GlobalHook`] is the
//! production source, built on `rdev`.

pub mod events;
pub mod hook;
pub mod recorder;
pub mod source;

pub use events::{ActionKind, UserAction};
pub use hook::GlobalHook;
pub use recorder::{Recorder, RecorderConfig};
pub use source::{EventSink, EventSource, RawEvent, SourceError};

pub mod prelude {
    pub use crate::events::{ActionKind, UserAction};
    pub use crate::hook::GlobalHook;
    pub use crate::recorder::{Recorder, RecorderConfig};
    pub use crate::source::{EventSink, EventSource, RawEvent, SourceError};
}
