//! Mock input source for testing.
//!
//! Allows tests to inject synthetic [`InputEvent`]s without requiring OS
//! hooks or a display server.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use soundbind_core::{InputEvent, Namespace};

use super::{CaptureError, InputSource, InputStreams};

type Senders = (Sender<InputEvent>, Sender<InputEvent>);

/// A mock implementation of [`InputSource`] that allows tests to inject events.
#[derive(Default)]
pub struct MockInputSource {
    senders: Arc<Mutex<Option<Senders>>>,
}

impl MockInputSource {
    /// Creates a new mock input source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic event, as if captured from hardware.
    ///
    /// Panics if `start()` has not been called or if `stop()` has been called.
    pub fn inject_event(&self, event: InputEvent) {
        let guard = self.senders.lock().expect("lock poisoned");
        let (keyboard, mouse) = guard
            .as_ref()
            .expect("MockInputSource::inject_event called before start()");
        let sender = match event.namespace {
            Namespace::Keyboard => keyboard,
            Namespace::Mouse => mouse,
        };
        sender
            .send(event)
            .expect("receiver has been dropped; call start() first");
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<InputStreams, CaptureError> {
        let (kb_tx, kb_rx) = mpsc::channel();
        let (mouse_tx, mouse_rx) = mpsc::channel();
        *self.senders.lock().expect("lock poisoned") = Some((kb_tx, mouse_tx));
        Ok(InputStreams {
            keyboard: kb_rx,
            mouse: mouse_rx,
        })
    }

    fn stop(&self) {
        // Drop the senders to close both channels
        *self.senders.lock().expect("lock poisoned") = None;
    }
}
