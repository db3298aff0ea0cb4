//! Platform-neutral input events.
//!
//! The capture layer translates every OS hook event it cares about into an
//! [`InputEvent`]: which namespace it belongs to, its canonical textual
//! identifier, and whether it is a press or a release.  Pointer motion and
//! wheel events have no binding meaning and are dropped before this point.
//!
//! # Identifier encoding
//!
//! The identifier is also the key persisted in the bindings file, so it must be
//! stable across restarts:
//!
//! | Input              | Identifier            |
//! |--------------------|-----------------------|
//! | letter key `a`     | `Key.a`               |
//! | digit key `7`      | `Key.7`               |
//! | space bar          | `Key.space`           |
//! | right shift        | `Key.shift_r`         |
//! | left mouse button  | `Button.left`         |
//! | unmapped key 0x5E  | `Key.unknown_94`      |

use crate::domain::bindings::Namespace;

/// Canonical textual identifier of a key or mouse button.
pub type InputId = String;

/// Whether the key or button went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Pressed,
    Released,
}

/// A single key or button transition captured from the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub namespace: Namespace,
    pub id: InputId,
    pub state: PressState,
}

impl InputEvent {
    pub fn new(namespace: Namespace, id: impl Into<InputId>, state: PressState) -> Self {
        Self {
            namespace,
            id: id.into(),
            state,
        }
    }

    /// A keyboard key went down.
    pub fn key_press(id: impl Into<InputId>) -> Self {
        Self::new(Namespace::Keyboard, id, PressState::Pressed)
    }

    /// A keyboard key came up.
    pub fn key_release(id: impl Into<InputId>) -> Self {
        Self::new(Namespace::Keyboard, id, PressState::Released)
    }

    /// A mouse button went down.
    pub fn button_press(id: impl Into<InputId>) -> Self {
        Self::new(Namespace::Mouse, id, PressState::Pressed)
    }

    /// A mouse button came up.
    pub fn button_release(id: impl Into<InputId>) -> Self {
        Self::new(Namespace::Mouse, id, PressState::Released)
    }

    /// Only presses trigger playback or complete a capture.
    pub fn is_press(&self) -> bool {
        self.state == PressState::Pressed
    }
}
