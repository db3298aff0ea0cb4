//! Desktop window.
//!
//! - `app` – the `eframe` application: a read-only listing of every binding
//!   and four action buttons.
//! - `dialogs` – native file pickers and message boxes behind the
//!   [`dialogs::DialogProvider`] trait, so the button actions can be tested
//!   without opening real dialogs.

pub mod app;
pub mod dialogs;

pub use app::{render_listing, SoundBindApp, WINDOW_TITLE};
pub use dialogs::{DialogProvider, RfdDialogs};
