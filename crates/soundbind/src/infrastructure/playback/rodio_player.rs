//! `rodio`-backed sound player.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use crate::application::dispatch::{PlaybackError, SoundPlayer};

/// Plays files on the default output device at a fixed volume.
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    volume: f32,
}

impl RodioPlayer {
    /// `volume` is a linear multiplier; `1.0` leaves the file unchanged.
    pub fn new(volume: f32) -> Self {
        Self { volume }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        // Decode first so a bad path is reported even without an audio device.
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // The stream must outlive the sink, so it stays bound until we return.
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;
        let sink =
            Sink::try_new(&handle).map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;

        sink.set_volume(self.volume);
        sink.append(source);
        sink.sleep_until_end();
        debug!(path = %path.display(), "playback finished");
        Ok(())
    }
}
