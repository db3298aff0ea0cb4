//! Global input hook backed by `rdev`.
//!
//! `rdev::listen` installs the platform hook (low-level hooks on Windows, a
//! Quartz event tap on macOS, XRecord on Linux) and then blocks its thread
//! forever, calling our callback for every event.  It can only be installed
//! once per process and cannot be uninstalled, so:
//!
//! - [`RdevInputSource::start`] may be called once; a second call returns
//!   [`CaptureError::AlreadyStarted`].
//! - [`RdevInputSource::stop`] drops the channel senders.  The hook keeps
//!   running but forwards nothing, and both receivers see a closed channel.
//!
//! The hook thread is detached, so it never holds up process exit.
//!
//! # Permissions
//!
//! macOS requires the Accessibility permission; Linux requires an X11
//! session.  When the hook cannot be installed `rdev::listen` returns an error
//! on the hook thread, which is logged.  The window keeps working without
//! playback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use soundbind_core::{InputEvent, Namespace};
use tracing::{error, info, trace};

use super::{keymap, CaptureError, InputSource, InputStreams};

type Senders = (Sender<InputEvent>, Sender<InputEvent>);

/// Global keyboard and mouse capture using `rdev`.
#[derive(Default)]
pub struct RdevInputSource {
    started: AtomicBool,
    senders: Arc<Mutex<Option<Senders>>>,
}

impl RdevInputSource {
    /// Creates a new (unstarted) source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for RdevInputSource {
    fn start(&self) -> Result<InputStreams, CaptureError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::AlreadyStarted);
        }

        let (kb_tx, kb_rx) = mpsc::channel();
        let (mouse_tx, mouse_rx) = mpsc::channel();
        *self.senders.lock().unwrap_or_else(PoisonError::into_inner) = Some((kb_tx, mouse_tx));

        let senders = Arc::clone(&self.senders);
        thread::Builder::new()
            .name("soundbind-hook".to_string())
            .spawn(move || run_hook(senders))
            .map_err(|e| CaptureError::HookThread(e.to_string()))?;

        info!("global input hook thread started");
        Ok(InputStreams {
            keyboard: kb_rx,
            mouse: mouse_rx,
        })
    }

    fn stop(&self) {
        *self.senders.lock().unwrap_or_else(PoisonError::into_inner) = None;
        info!("input capture stopped");
    }
}

/// Entry point for the hook thread.  Returns only if the hook fails.
fn run_hook(senders: Arc<Mutex<Option<Senders>>>) {
    let callback = move |event: rdev::Event| {
        let Some(input) = keymap::translate(&event.event_type) else {
            return;
        };
        trace!(?input, "captured");
        forward(&senders, input);
    };

    if let Err(e) = rdev::listen(callback) {
        error!("failed to install global input hook: {e:?}");
    }
}

/// Sends `input` to the channel for its namespace.  Dropped silently after `stop()`.
fn forward(senders: &Mutex<Option<Senders>>, input: InputEvent) {
    let guard = senders.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some((keyboard, mouse)) = guard.as_ref() {
        let sender = match input.namespace {
            Namespace::Keyboard => keyboard,
            Namespace::Mouse => mouse,
        };
        // A closed receiver means the dispatcher loop has gone away.
        let _ = sender.send(input);
    }
}
