//! rdev-backed global input hook source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use rdev::EventType;
use tracing::{debug, error};

use crate::source::{EventSink, EventSource, RawEvent, SourceError};

/// Grace window for the listen thread to report a failed hook install.
const INSTALL_GRACE: Duration = Duration::from_millis(250);

/// Process-wide input hook wrapping `rdev::listen`.
///
/// The hook thread is spawned lazily on the first `begin_delivery` call.
/// Once `rdev` has installed its OS hook the thread cannot be torn down
/// again, so `shutdown` detaches the sink instead: the callback keeps
/// running but stops forwarding. `rdev` does not support a second listener
/// in the same process; keep a single `GlobalHook` per process.
pub struct GlobalHook {
    sink: Arc<dyn EventSink>,
    delivering: Arc<AtomicBool>,
    detached: Arc<AtomicBool>,
}

impl GlobalHook {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            delivering: Arc::new(AtomicBool::new(false)),
            detached: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl EventSource for GlobalHook {
    fn begin_delivery(&self) -> Result<(), SourceError> {
        if self
            .delivering
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let (install_tx, install_rx) = bounded::<String>(1);
        let sink = self.sink.clone();
        let detached = self.detached.clone();
        let delivering = self.delivering.clone();

        let spawned = thread::Builder::new()
            .name("input-hook".into())
            .spawn(move || {
                let mut pointer = (0i32, 0i32);
                let result = rdev::listen(move |event| {
                    if detached.load(Ordering::Relaxed) {
                        return;
                    }
                    if let Some(raw) = map_event(event.event_type, &mut pointer) {
                        sink.on_event(raw);
                    }
                });
                // listen only returns when the install failed
                if let Err(err) = result {
                    delivering.store(false, Ordering::SeqCst);
                    error!(?err, "global input hook install failed");
                    let _ = install_tx.try_send(format!("{err:?}"));
                }
            });

        if let Err(err) = spawned {
            self.delivering.store(false, Ordering::SeqCst);
            return Err(SourceError::DeliveryThread(err));
        }

        // A failed install surfaces almost immediately; give the thread a
        // short window to report before declaring the hook live.
        match install_rx.recv_timeout(INSTALL_GRACE) {
            Ok(reason) => Err(SourceError::HookInstall(reason)),
            Err(RecvTimeoutError::Timeout) => {
                debug!("global input hook delivering");
                Ok(())
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.delivering.store(false, Ordering::SeqCst);
                Err(SourceError::SourceClosed)
            }
        }
    }

    fn is_delivering(&self) -> bool {
        self.delivering.load(Ordering::SeqCst)
    }

    fn shutdown(&self) {
        if !self.detached.swap(true, Ordering::SeqCst) {
            debug!("global input hook detached");
        }
    }
}

/// Map a hook event to the seam payload.
///
/// rdev reports button and wheel events without coordinates, so the last
/// observed pointer position is attached to them.
fn map_event(event: EventType, pointer: &mut (i32, i32)) -> Option<RawEvent> {
    match event {
        EventType::MouseMove { x, y } => {
            *pointer = (x as i32, y as i32);
            Some(RawEvent::PointerMove {
                x: pointer.0,
                y: pointer.1,
            })
        }
        EventType::ButtonPress(button) => Some(RawEvent::ButtonPress {
            x: pointer.0,
            y: pointer.1,
            button,
        }),
        EventType::ButtonRelease(button) => Some(RawEvent::ButtonRelease {
            x: pointer.0,
            y: pointer.1,
            button,
        }),
        EventType::Wheel { delta_x, delta_y } => {
            // horizontal-only wheels report on the second axis
            let delta = if delta_y != 0 { delta_y } else { delta_x } as i32;
            if delta == 0 {
                return None;
            }
            Some(RawEvent::Wheel {
                x: pointer.0,
                y: pointer.1,
                delta,
            })
        }
        EventType::KeyPress(key) => Some(RawEvent::KeyPress { key }),
        EventType::KeyRelease(key) => Some(RawEvent::KeyRelease { key }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdev::{Button, Key};

    #[test]
    fn move_updates_tracked_pointer() {
        let mut pointer = (0, 0);
        let raw = map_event(EventType::MouseMove { x: 100.4, y: 250.9 }, &mut pointer);
        assert_eq!(raw, Some(RawEvent::PointerMove { x: 100, y: 250 }));
        assert_eq!(pointer, (100, 250));
    }

    #[test]
    fn button_events_carry_last_pointer_position() {
        let mut pointer = (0, 0);
        let _ = map_event(EventType::MouseMove { x: 100.0, y: 250.0 }, &mut pointer);
        assert_eq!(
            map_event(EventType::ButtonPress(Button::Left), &mut pointer),
            Some(RawEvent::ButtonPress {
                x: 100,
                y: 250,
                button: Button::Left,
            })
        );
        assert_eq!(
            map_event(EventType::ButtonRelease(Button::Left), &mut pointer),
            Some(RawEvent::ButtonRelease {
                x: 100,
                y: 250,
                button: Button::Left,
            })
        );
    }

    #[test]
    fn wheel_prefers_vertical_axis() {
        let mut pointer = (3, 4);
        assert_eq!(
            map_event(
                EventType::Wheel {
                    delta_x: 2,
                    delta_y: -3,
                },
                &mut pointer
            ),
            Some(RawEvent::Wheel {
                x: 3,
                y: 4,
                delta: -3,
            })
        );
        assert_eq!(
            map_event(
                EventType::Wheel {
                    delta_x: 2,
                    delta_y: 0,
                },
                &mut pointer
            ),
            Some(RawEvent::Wheel {
                x: 3,
                y: 4,
                delta: 2,
            })
        );
        assert_eq!(
            map_event(
                EventType::Wheel {
                    delta_x: 0,
                    delta_y: 0,
                },
                &mut pointer
            ),
            None
        );
    }

    #[test]
    fn key_events_map_through() {
        let mut pointer = (0, 0);
        assert_eq!(
            map_event(EventType::KeyPress(Key::KeyA), &mut pointer),
            Some(RawEvent::KeyPress { key: Key::KeyA })
        );
        assert_eq!(
            map_event(EventType::KeyRelease(Key::KeyA), &mut pointer),
            Some(RawEvent::KeyRelease { key: Key::KeyA })
        );
    }

    #[test]
    fn shutdown_is_idempotent() {
        struct NullSink;
        impl EventSink for NullSink {
            fn on_event(&self, _: RawEvent) {}
        }

        let hook = GlobalHook::new(Arc::new(NullSink));
        assert!(!hook.is_delivering());
        hook.shutdown();
        hook.shutdown();
        assert!(!hook.is_delivering());
    }
}
