//! Recorded action types.
//!
//! Actions are flat structs that serialize to compact, self-describing JSON
//! lines: a millisecond timestamp plus an internally tagged payload.

use rdev::{Button, Key};
use serde::{Deserialize, Serialize};

use crate::source::RawEvent;

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAction {
    /// Milliseconds since the recording session started.
    #[serde(rename = "t")]
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: ActionKind,
}

/// Action payload, one variant per observable input kind.
///
/// A variant carries exactly the fields that kind of input has, so stale
/// cross-variant data is unrepresentable. Button and key identity reuse the
/// hook library's types verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    MouseMove { x: i32, y: i32 },
    MouseDown { x: i32, y: i32, button: Button },
    MouseUp { x: i32, y: i32, button: Button },
    MouseWheel { x: i32, y: i32, delta: i32 },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

impl UserAction {
    /// Translate a raw source payload into a recorded action.
    ///
    /// Each raw kind maps to exactly one variant; coordinates, button and key
    /// identity, and wheel amounts are copied verbatim. Never splits or drops
    /// an event.
    pub fn from_raw(raw: RawEvent, timestamp_ms: u64) -> Self {
        let kind = match raw {
            RawEvent::PointerMove { x, y } => ActionKind::MouseMove { x, y },
            RawEvent::ButtonPress { x, y, button } => ActionKind::MouseDown { x, y, button },
            RawEvent::ButtonRelease { x, y, button } => ActionKind::MouseUp { x, y, button },
            RawEvent::Wheel { x, y, delta } => ActionKind::MouseWheel { x, y, delta },
            RawEvent::KeyPress { key } => ActionKind::KeyDown { key },
            RawEvent::KeyRelease { key } => ActionKind::KeyUp { key },
        };
        Self { timestamp_ms, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_each_raw_kind() {
        assert_eq!(
            UserAction::from_raw(RawEvent::PointerMove { x: 10, y: 20 }, 5),
            UserAction {
                timestamp_ms: 5,
                kind: ActionKind::MouseMove { x: 10, y: 20 },
            }
        );
        assert_eq!(
            UserAction::from_raw(RawEvent::KeyPress { key: Key::KeyA }, 12),
            UserAction {
                timestamp_ms: 12,
                kind: ActionKind::KeyDown { key: Key::KeyA },
            }
        );
        assert_eq!(
            UserAction::from_raw(
                RawEvent::ButtonRelease {
                    x: 10,
                    y: 20,
                    button: Button::Left,
                },
                20
            ),
            UserAction {
                timestamp_ms: 20,
                kind: ActionKind::MouseUp {
                    x: 10,
                    y: 20,
                    button: Button::Left,
                },
            }
        );
        assert_eq!(
            UserAction::from_raw(
                RawEvent::Wheel {
                    x: 4,
                    y: 8,
                    delta: -3,
                },
                1
            ),
            UserAction {
                timestamp_ms: 1,
                kind: ActionKind::MouseWheel {
                    x: 4,
                    y: 8,
                    delta: -3,
                },
            }
        );
        assert_eq!(
            UserAction::from_raw(RawEvent::KeyRelease { key: Key::Escape }, 7),
            UserAction {
                timestamp_ms: 7,
                kind: ActionKind::KeyUp { key: Key::Escape },
            }
        );
        assert_eq!(
            UserAction::from_raw(
                RawEvent::ButtonPress {
                    x: 1,
                    y: 2,
                    button: Button::Right,
                },
                0
            ),
            UserAction {
                timestamp_ms: 0,
                kind: ActionKind::MouseDown {
                    x: 1,
                    y: 2,
                    button: Button::Right,
                },
            }
        );
    }

    #[test]
    fn serializes_compact_tagged_json() {
        let action = UserAction::from_raw(RawEvent::PointerMove { x: 10, y: 20 }, 5);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({"t": 5, "action": "mouse_move", "x": 10, "y": 20})
        );

        let action = UserAction::from_raw(
            RawEvent::ButtonPress {
                x: 10,
                y: 20,
                button: Button::Left,
            },
            20,
        );
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({"t": 20, "action": "mouse_down", "x": 10, "y": 20, "button": "Left"})
        );
    }
}
