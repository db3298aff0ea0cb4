//! Infrastructure layer for Sound Bind.
//!
//! Contains OS-facing adapters: global input hooks, audio output, file-system
//! storage, and the desktop window.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `soundbind_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod input_capture;
pub mod playback;
pub mod storage;
pub mod ui;
