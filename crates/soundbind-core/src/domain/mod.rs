//! Domain entities for Sound Bind.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The **domain** is the innermost layer: the rules that make the program what
//! it is, with no imports from OS APIs, audio libraries, or UI frameworks.
//! Outer layers (application, infrastructure) depend on the domain; the domain
//! never depends on them.
//!
//! For Sound Bind the rules are small:
//!
//! - [`bindings`] – how an input identifier resolves to a sound path.
//! - [`capture`] – whether a press is dispatched for playback or captured as a
//!   new binding.

/// Sound bindings per namespace plus the universal fallback.
pub mod bindings;

/// One-shot assignment capture state machine.
pub mod capture;
