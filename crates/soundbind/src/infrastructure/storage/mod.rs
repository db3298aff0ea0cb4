//! Storage infrastructure: file persistence.
//!
//! - `bindings_file` reads and writes the JSON bindings file behind the
//!   [`BindingRepository`](crate::application::binding_store::BindingRepository)
//!   trait.
//! - `settings` reads the optional TOML settings file from the
//!   platform-appropriate config directory.

pub mod bindings_file;
pub mod settings;
