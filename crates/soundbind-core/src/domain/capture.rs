//! Assignment capture state machine.
//!
//! Each namespace owns one [`CaptureState`].  It decides what a captured
//! input event means:
//!
//! ```text
//!                 begin(path)
//!   Listening ──────────────────► AwaitingAssignment { path }
//!       ▲                                  │
//!       │        press (captured)          │ release: ignored, stays
//!       └──────────────────────────────────┘
//! ```
//!
//! - `Listening`: presses are dispatched for playback.
//! - `AwaitingAssignment`: the next press becomes a new binding instead of
//!   playing anything, and the state returns to `Listening`.
//!
//! There is no cancel or timeout.  Calling [`CaptureState::begin`] again
//! replaces the pending target, so at most one capture is active per namespace.

use crate::input::InputEvent;

/// Capture state for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// Normal operation: presses play their bound sound.
    #[default]
    Listening,
    /// The next press will be bound to `path`.
    AwaitingAssignment { path: String },
}

/// What the dispatcher should do with an event, as decided by [`CaptureState::on_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTransition {
    /// Resolve the identifier and play whatever is bound to it.
    Dispatch,
    /// Nothing to do (release events, in any state).
    Ignore,
    /// Bind `id` to `path`; the state is already back to `Listening`.
    Capture { id: String, path: String },
}

impl CaptureState {
    /// Enters assignment mode targeting `path`.
    ///
    /// Returns the previously pending path if a capture was already active.
    pub fn begin(&mut self, path: impl Into<String>) -> Option<String> {
        let previous = std::mem::replace(
            self,
            CaptureState::AwaitingAssignment { path: path.into() },
        );
        match previous {
            CaptureState::AwaitingAssignment { path } => Some(path),
            CaptureState::Listening => None,
        }
    }

    /// `true` while a capture is pending.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, CaptureState::AwaitingAssignment { .. })
    }

    /// The path a pending capture will bind, if any.
    pub fn pending_path(&self) -> Option<&str> {
        match self {
            CaptureState::AwaitingAssignment { path } => Some(path.as_str()),
            CaptureState::Listening => None,
        }
    }

    /// Feeds one event through the state machine.
    pub fn on_event(&mut self, event: &InputEvent) -> CaptureTransition {
        if !event.is_press() {
            return CaptureTransition::Ignore;
        }
        match std::mem::take(self) {
            CaptureState::Listening => CaptureTransition::Dispatch,
            CaptureState::AwaitingAssignment { path } => CaptureTransition::Capture {
                id: event.id.clone(),
                path,
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
