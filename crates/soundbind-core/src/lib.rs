//! # soundbind-core
//!
//! Shared library for Sound Bind containing the binding model, the
//! assignment-capture state machine, and the platform-neutral input event
//! types produced by the capture layer.
//!
//! This crate has zero dependencies on OS hooks, audio devices, or UI
//! frameworks, so everything in it can be unit-tested anywhere.
//!
//! # Architecture overview (for beginners)
//!
//! Sound Bind plays a sound whenever a bound key or mouse button is pressed.
//! The desktop application (`soundbind`) wires three outside capabilities
//! together (global input hooks, audio output, and a window).  What is left
//! once those are stripped away lives here:
//!
//! - **`domain`** – The [`BindingSet`]: which sound belongs to which key or
//!   button, and the lookup rule (keyboard keys fall back to a "universal"
//!   sound, mouse buttons do not).  Also the per-namespace [`CaptureState`]
//!   that decides whether the next press plays a sound or becomes a new
//!   binding.
//!
//! - **`input`** – [`InputEvent`], the small vocabulary of press/release events
//!   that the capture layer translates OS events into.

pub mod domain;
pub mod input;

// Re-export the most-used types at the crate root so callers can write
// `soundbind_core::BindingSet` instead of `soundbind_core::domain::bindings::BindingSet`.
pub use domain::bindings::{BindingSet, Namespace};
pub use domain::capture::{CaptureState, CaptureTransition};
pub use input::{InputEvent, InputId, PressState};
