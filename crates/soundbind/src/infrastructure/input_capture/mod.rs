//! Input capture infrastructure.
//!
//! Installs a global keyboard and mouse hook (via `rdev`) on a dedicated
//! thread.  Each OS event is translated to a platform-neutral
//! [`InputEvent`] and placed on one of two channels, one per namespace, which
//! the dispatcher loops consume.
//!
//! # Why two channels?
//!
//! Keyboard and mouse dispatch must not wait on each other.  With a channel
//! per namespace each dispatcher loop only ever sees its own device family.
//!
//! # Testability
//!
//! The [`InputSource`] trait allows tests to inject synthetic events through
//! [`mock::MockInputSource`] without installing OS hooks.

use std::sync::mpsc::Receiver;

use soundbind_core::InputEvent;

pub mod keymap;
pub mod mock;
pub mod rdev_listener;

/// Receivers for the two event streams produced by an [`InputSource`].
pub struct InputStreams {
    /// Key presses and releases.
    pub keyboard: Receiver<InputEvent>,
    /// Mouse button presses and releases.
    pub mouse: Receiver<InputEvent>,
}

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to start input hook thread: {0}")]
    HookThread(String),
    #[error("input capture has already been started")]
    AlreadyStarted,
}

/// Trait abstracting input event production.
///
/// The production implementation is [`rdev_listener::RdevInputSource`];
/// tests use [`mock::MockInputSource`].
pub trait InputSource: Send {
    /// Starts the source and returns a receiver per namespace.
    fn start(&self) -> Result<InputStreams, CaptureError>;
    /// Stops delivering events.  Both receivers see a closed channel.
    fn stop(&self);
}
