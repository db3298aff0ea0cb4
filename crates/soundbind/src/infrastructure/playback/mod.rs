//! Audio playback infrastructure.
//!
//! Provides the production [`SoundPlayer`](crate::application::dispatch::SoundPlayer)
//! implementation.  Each call opens the default output device, decodes one
//! file with `rodio`, and blocks until it has finished playing.  Overlapping
//! calls produce overlapping audio; there is no mixing policy.

pub mod rodio_player;
