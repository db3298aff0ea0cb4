//! Application layer use cases for Sound Bind.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules in `soundbind-core`) and the infrastructure (OS hooks, audio
//! output, files, window).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "play the
//!   sound bound to this key").
//! - **Depend on abstractions** (the [`binding_store::BindingRepository`] and
//!   [`dispatch::SoundPlayer`] traits) rather than concrete implementations,
//!   so they can be unit-tested with mocks.
//! - **Contain no OS calls, no audio I/O, no direct file system access**.
//!
//! # Sub-modules
//!
//! - **`binding_store`** – The shared, persisted binding set with fail-soft
//!   load/save.
//!
//! - **`dispatch`** – Receives input events and either plays the bound sound
//!   or completes a pending assignment capture.  Runs on every key and button
//!   press.

pub mod binding_store;
pub mod dispatch;
