//! EventDispatcher: turns captured input events into playback or new bindings.
//!
//! This use case is the heart of the application.  Every key or button event
//! from the capture layer passes through [`EventDispatcher::handle_event`],
//! which consults the namespace's [`CaptureState`]:
//!
//! - `Listening` + press → resolve the identifier through the
//!   [`BindingStore`] and, if a sound is bound, play it on a detached
//!   blocking task.
//! - `AwaitingAssignment` + press → store the identifier as a new binding and
//!   go back to `Listening`.  Nothing is played.
//! - Any release → ignored.
//!
//! # Threads
//!
//! ```text
//!   hook thread ──► keyboard channel ──► soundbind-keyboard loop ─┐
//!              └──► mouse channel    ──► soundbind-mouse loop    ─┴─► spawn_blocking(play)
//! ```
//!
//! The two loops share one dispatcher but lock separate capture states, so a
//! pending keyboard capture never delays mouse playback.  Playback tasks are
//! fire-and-forget: nothing waits for them, orders them, or cancels them.
//!
//! # Testability
//!
//! The dispatcher depends only on the [`SoundPlayer`] trait and a Tokio
//! [`Handle`], so tests inject a mock player and a private runtime.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use soundbind_core::{CaptureState, CaptureTransition, InputEvent, Namespace};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use super::binding_store::BindingStore;

/// Error type for a single playback request.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No audio output device could be opened.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// The sound file could not be opened.
    #[error("cannot open sound file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but is not a playable audio stream.
    #[error("cannot decode sound file {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Plays one sound file to completion.
///
/// `play` blocks the calling thread until the sound has finished, so the
/// dispatcher always calls it from a blocking task.
#[cfg_attr(test, mockall::automock)]
pub trait SoundPlayer: Send + Sync {
    fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// What [`EventDispatcher::handle_event`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A playback task was spawned for this path.
    Played(String),
    /// The press had no sound bound to it.
    Silent,
    /// The event was a release.
    Ignored,
    /// The press completed a pending capture.
    Assigned {
        namespace: Namespace,
        id: String,
        path: String,
    },
}

/// Routes input events to playback or to assignment capture.
pub struct EventDispatcher {
    store: Arc<BindingStore>,
    player: Arc<dyn SoundPlayer>,
    runtime: Handle,
    keyboard: Mutex<CaptureState>,
    mouse: Mutex<CaptureState>,
}

impl EventDispatcher {
    /// Creates a dispatcher with both namespaces `Listening`.
    pub fn new(store: Arc<BindingStore>, player: Arc<dyn SoundPlayer>, runtime: Handle) -> Self {
        Self {
            store,
            player,
            runtime,
            keyboard: Mutex::new(CaptureState::Listening),
            mouse: Mutex::new(CaptureState::Listening),
        }
    }

    /// Arms a one-shot capture: the next press in `namespace` is bound to `path`.
    ///
    /// A capture already pending for the namespace is replaced.
    pub fn begin_capture(&self, namespace: Namespace, path: &str) {
        let replaced = self.capture(namespace).begin(path);
        match replaced {
            Some(old) => warn!(%namespace, old = %old, new = path, "replaced pending capture"),
            None => info!(%namespace, path, "waiting for input to assign"),
        }
    }

    /// Returns a copy of the capture state for `namespace`.
    pub fn capture_state(&self, namespace: Namespace) -> CaptureState {
        self.capture(namespace).clone()
    }

    /// Processes one event.
    pub fn handle_event(&self, event: &InputEvent) -> DispatchOutcome {
        // The capture lock is released before touching the store or player.
        let transition = self.capture(event.namespace).on_event(event);

        match transition {
            CaptureTransition::Ignore => DispatchOutcome::Ignored,
            CaptureTransition::Capture { id, path } => {
                self.store.assign(event.namespace, &id, &path);
                DispatchOutcome::Assigned {
                    namespace: event.namespace,
                    id,
                    path,
                }
            }
            CaptureTransition::Dispatch => match self.store.resolve(event.namespace, &event.id) {
                Some(path) => {
                    debug!(namespace = %event.namespace, id = %event.id, path = %path, "playing");
                    self.spawn_playback(path.clone());
                    DispatchOutcome::Played(path)
                }
                None => DispatchOutcome::Silent,
            },
        }
    }

    /// Handles events from `events` until the channel closes.
    ///
    /// A panic while handling one event is logged and the loop carries on with
    /// the next event.
    pub fn run(&self, events: Receiver<InputEvent>) {
        for event in events {
            let result = panic::catch_unwind(AssertUnwindSafe(|| self.handle_event(&event)));
            if result.is_err() {
                error!(namespace = %event.namespace, id = %event.id, "error handling input event");
            }
        }
        debug!("input stream closed, dispatch loop exiting");
    }

    /// Runs [`run`](Self::run) on a named background thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn_loop(
        self: &Arc<Self>,
        name: &str,
        events: Receiver<InputEvent>,
    ) -> std::io::Result<JoinHandle<()>> {
        let dispatcher = Arc::clone(self);
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || dispatcher.run(events))
    }

    fn spawn_playback(&self, path: String) {
        let player = Arc::clone(&self.player);
        // Detached: the JoinHandle is dropped on purpose.
        self.runtime.spawn_blocking(move || {
            if let Err(e) = player.play(Path::new(&path)) {
                warn!("error playing sound: {e}");
            }
        });
    }

    fn capture(&self, namespace: Namespace) -> MutexGuard<'_, CaptureState> {
        let slot = match namespace {
            Namespace::Keyboard => &self.keyboard,
            Namespace::Mouse => &self.mouse,
        };
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::binding_store::{BindingRepository, StorageError};
    use soundbind_core::BindingSet;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Repository that keeps the last saved set in memory.
    #[derive(Default)]
    struct MemoryRepository {
        saved: Arc<Mutex<Option<BindingSet>>>,
    }

    impl BindingRepository for MemoryRepository {
        fn load(&self) -> Result<Option<BindingSet>, StorageError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, bindings: &BindingSet) -> Result<(), StorageError> {
            *self.saved.lock().unwrap() = Some(bindings.clone());
            Ok(())
        }
    }

    /// Mock player that reports every played path on a channel.
    fn recording_player() -> (MockSoundPlayer, mpsc::Receiver<PathBuf>) {
        let (tx, rx) = mpsc::channel();
        let mut player = MockSoundPlayer::new();
        player.expect_play().returning(move |path| {
            tx.send(path.to_path_buf()).ok();
            Ok(())
        });
        (player, rx)
    }

    struct Fixture {
        _runtime: tokio::runtime::Runtime,
        store: Arc<BindingStore>,
        dispatcher: Arc<EventDispatcher>,
        saved: Arc<Mutex<Option<BindingSet>>>,
    }

    fn fixture(player: MockSoundPlayer) -> Fixture {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let repo = MemoryRepository::default();
        let saved = Arc::clone(&repo.saved);
        let store = Arc::new(BindingStore::new(Box::new(repo)));
        let dispatcher = Arc::new(EventDispatcher::new(
            Arc::clone(&store),
            Arc::new(player),
            runtime.handle().clone(),
        ));
        Fixture {
            _runtime: runtime,
            store,
            dispatcher,
            saved,
        }
    }

    // ── Listening ─────────────────────────────────────────────────────────────

    #[test]
    fn test_bound_key_press_plays_its_sound() {
        // Arrange
        let (player, played) = recording_player();
        let fx = fixture(player);
        fx.store.assign(Namespace::Keyboard, "Key.a", "/snd/a.wav");

        // Act
        let outcome = fx.dispatcher.handle_event(&InputEvent::key_press("Key.a"));

        // Assert
        assert_eq!(outcome, DispatchOutcome::Played("/snd/a.wav".to_string()));
        let path = played
            .recv_timeout(Duration::from_secs(2))
            .expect("player must be invoked");
        assert_eq!(path, PathBuf::from("/snd/a.wav"));
    }

    #[test]
    fn test_unbound_key_uses_universal_sound() {
        let (player, played) = recording_player();
        let fx = fixture(player);
        fx.store.set_universal("/snd/u.wav");

        let outcome = fx.dispatcher.handle_event(&InputEvent::key_press("Key.z"));

        assert_eq!(outcome, DispatchOutcome::Played("/snd/u.wav".to_string()));
        assert_eq!(
            played.recv_timeout(Duration::from_secs(2)).unwrap(),
            PathBuf::from("/snd/u.wav")
        );
    }

    #[test]
    fn test_unbound_mouse_button_is_silent_even_with_universal() {
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.store.set_universal("/snd/u.wav");

        let outcome = fx
            .dispatcher
            .handle_event(&InputEvent::button_press("Button.left"));

        assert_eq!(outcome, DispatchOutcome::Silent);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.store.assign(Namespace::Mouse, "Button.left", "/snd/c.wav");

        let outcome = fx
            .dispatcher
            .handle_event(&InputEvent::button_release("Button.left"));

        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[test]
    fn test_playback_failure_does_not_stop_dispatch() {
        // Arrange: the first play fails, the second succeeds
        let (tx, rx) = mpsc::channel();
        let mut player = MockSoundPlayer::new();
        let mut calls = 0;
        player.expect_play().returning(move |path| {
            calls += 1;
            tx.send(path.to_path_buf()).ok();
            if calls == 1 {
                Err(PlaybackError::Decode {
                    path: path.to_path_buf(),
                    message: "not audio".to_string(),
                })
            } else {
                Ok(())
            }
        });
        let fx = fixture(player);
        fx.store.assign(Namespace::Keyboard, "Key.a", "/snd/broken.wav");

        // Act
        fx.dispatcher.handle_event(&InputEvent::key_press("Key.a"));
        fx.dispatcher.handle_event(&InputEvent::key_press("Key.a"));

        // Assert: both requests reached the player
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    // ── Assignment capture ────────────────────────────────────────────────────

    #[test]
    fn test_mouse_capture_ignores_release_then_assigns_press() {
        // Arrange
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.dispatcher.begin_capture(Namespace::Mouse, "/snd/click.wav");

        // Act: release first
        let first = fx
            .dispatcher
            .handle_event(&InputEvent::button_release("Button.left"));

        // Assert: still awaiting
        assert_eq!(first, DispatchOutcome::Ignored);
        assert!(fx.dispatcher.capture_state(Namespace::Mouse).is_awaiting());

        // Act: press
        let second = fx
            .dispatcher
            .handle_event(&InputEvent::button_press("Button.left"));

        // Assert
        assert_eq!(
            second,
            DispatchOutcome::Assigned {
                namespace: Namespace::Mouse,
                id: "Button.left".to_string(),
                path: "/snd/click.wav".to_string(),
            }
        );
        assert_eq!(
            fx.dispatcher.capture_state(Namespace::Mouse),
            CaptureState::Listening
        );
        assert_eq!(
            fx.store.resolve(Namespace::Mouse, "Button.left").as_deref(),
            Some("/snd/click.wav")
        );
    }

    #[test]
    fn test_capture_persists_the_new_binding() {
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.dispatcher.begin_capture(Namespace::Keyboard, "/snd/k.wav");

        fx.dispatcher.handle_event(&InputEvent::key_press("Key.space"));

        let saved = fx.saved.lock().unwrap().clone().expect("store must save");
        assert_eq!(saved.resolve(Namespace::Keyboard, "Key.space"), Some("/snd/k.wav"));
    }

    #[test]
    fn test_capture_suppresses_playback_of_the_captured_press() {
        // Key.a already has a sound, but the capture press must not play it.
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.store.assign(Namespace::Keyboard, "Key.a", "/snd/old.wav");
        fx.dispatcher.begin_capture(Namespace::Keyboard, "/snd/new.wav");

        let outcome = fx.dispatcher.handle_event(&InputEvent::key_press("Key.a"));

        assert!(matches!(outcome, DispatchOutcome::Assigned { .. }));
        assert_eq!(
            fx.store.resolve(Namespace::Keyboard, "Key.a").as_deref(),
            Some("/snd/new.wav")
        );
    }

    #[test]
    fn test_keyboard_capture_leaves_mouse_playback_running() {
        let (player, played) = recording_player();
        let fx = fixture(player);
        fx.store.assign(Namespace::Mouse, "Button.right", "/snd/r.wav");
        fx.dispatcher.begin_capture(Namespace::Keyboard, "/snd/k.wav");

        let outcome = fx
            .dispatcher
            .handle_event(&InputEvent::button_press("Button.right"));

        assert_eq!(outcome, DispatchOutcome::Played("/snd/r.wav".to_string()));
        assert!(played.recv_timeout(Duration::from_secs(2)).is_ok());
        assert!(fx.dispatcher.capture_state(Namespace::Keyboard).is_awaiting());
    }

    #[test]
    fn test_new_capture_request_replaces_pending_one() {
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.dispatcher.begin_capture(Namespace::Keyboard, "/snd/first.wav");
        fx.dispatcher.begin_capture(Namespace::Keyboard, "/snd/second.wav");

        fx.dispatcher.handle_event(&InputEvent::key_press("Key.q"));

        assert_eq!(
            fx.store.resolve(Namespace::Keyboard, "Key.q").as_deref(),
            Some("/snd/second.wav")
        );
    }

    // ── Loop ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_run_processes_events_until_channel_closes() {
        let mut player = MockSoundPlayer::new();
        player.expect_play().never();
        let fx = fixture(player);
        fx.dispatcher.begin_capture(Namespace::Mouse, "/snd/m.wav");
        let (tx, rx) = mpsc::channel();

        let handle = fx
            .dispatcher
            .spawn_loop("test-mouse", rx)
            .expect("spawn loop");
        tx.send(InputEvent::button_release("Button.middle")).unwrap();
        tx.send(InputEvent::button_press("Button.middle")).unwrap();
        drop(tx);
        handle.join().expect("loop thread must exit cleanly");

        assert_eq!(
            fx.store.resolve(Namespace::Mouse, "Button.middle").as_deref(),
            Some("/snd/m.wav")
        );
    }

    /// Repository whose first save panics; later saves succeed.
    #[derive(Default)]
    struct PanickingRepository {
        panicked: std::sync::atomic::AtomicBool,
    }

    impl BindingRepository for PanickingRepository {
        fn load(&self) -> Result<Option<BindingSet>, StorageError> {
            Ok(None)
        }

        fn save(&self, _bindings: &BindingSet) -> Result<(), StorageError> {
            if !self.panicked.swap(true, std::sync::atomic::Ordering::SeqCst) {
                panic!("disk on fire");
            }
            Ok(())
        }
    }

    #[test]
    fn test_run_survives_a_panicking_event() {
        // Arrange: capturing Key.a triggers a save that panics
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let (player, played) = recording_player();
        let store = Arc::new(BindingStore::new(Box::new(PanickingRepository::default())));
        let dispatcher = Arc::new(EventDispatcher::new(
            Arc::clone(&store),
            Arc::new(player),
            runtime.handle().clone(),
        ));
        dispatcher.begin_capture(Namespace::Keyboard, "/snd/a.wav");
        let (tx, rx) = mpsc::channel();

        // Act
        let handle = dispatcher
            .spawn_loop("test-keyboard", rx)
            .expect("spawn loop");
        tx.send(InputEvent::key_press("Key.a")).unwrap();
        tx.send(InputEvent::key_press("Key.a")).unwrap();
        drop(tx);

        // Assert: the second press still plays, and the loop exits cleanly
        assert_eq!(
            played.recv_timeout(Duration::from_secs(2)).unwrap(),
            PathBuf::from("/snd/a.wav")
        );
        assert!(handle.join().is_ok());
        assert_eq!(
            dispatcher.capture_state(Namespace::Keyboard),
            CaptureState::Listening
        );

        // The poisoned save lock is recovered on the next save.
        store.set_universal("/snd/u.wav");
        assert_eq!(store.snapshot().universal(), Some("/snd/u.wav"));
    }
}
