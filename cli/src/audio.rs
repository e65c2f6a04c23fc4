//! rodio-backed sound playback
//!
//! Playback is synchronous: `play` returns once the file has finished.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use chime_core::{PlaybackError, SoundPlayer};

/// Plays files on the default output device
#[derive(Debug, Clone, Copy)]
pub struct RodioPlayer {
    /// Linear volume in `0.0..=1.0`
    volume: f32,
}

impl RodioPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        // The stream must stay alive until the sink drains
        let (_stream, stream_handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Device(Box::new(e)))?;

        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let sink = Sink::try_new(&stream_handle).map_err(|e| PlaybackError::Playback(Box::new(e)))?;

        tracing::debug!(path = %path.display(), volume = self.volume, "playing sound");
        sink.set_volume(self.volume);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        assert_eq!(RodioPlayer::new(3.0).volume, 1.0);
        assert_eq!(RodioPlayer::new(-1.0).volume, 0.0);
        assert_eq!(RodioPlayer::default().volume, 1.0);
    }
}
