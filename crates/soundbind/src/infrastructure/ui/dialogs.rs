//! Native dialogs via `rfd`.

use std::path::PathBuf;

/// File-picker filter label.
pub const AUDIO_FILTER_NAME: &str = "Audio Files";
/// Extensions offered by the file picker.
pub const AUDIO_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// Modal dialogs used by the window's actions.
#[cfg_attr(test, mockall::automock)]
pub trait DialogProvider {
    /// Asks the user for an audio file.  `None` when the picker is cancelled.
    fn pick_sound(&self, title: &str) -> Option<PathBuf>;

    /// Shows an informational message and waits for it to be dismissed.
    fn inform(&self, title: &str, message: &str);
}

/// [`DialogProvider`] backed by the platform's native dialogs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdDialogs;

impl DialogProvider for RfdDialogs {
    fn pick_sound(&self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter(AUDIO_FILTER_NAME, &AUDIO_EXTENSIONS)
            .pick_file()
    }

    fn inform(&self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
