//! Sound playback seam
//!
//! The alarm only needs "play this file, tell me if it failed". Backends live
//! in the binary so the wait logic stays testable without audio hardware.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Sound played when the target time is reached, relative to the working directory
pub const ALERT_SOUND: &str = "alert.wav";

/// Boxed backend error
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while playing a sound
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open sound file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sound file {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },

    #[error("no audio output device available")]
    Device(#[source] BackendError),

    #[error("failed to start playback")]
    Playback(#[source] BackendError),
}

/// Plays an audio file to completion
pub trait SoundPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for &P {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        (**self).play(path)
    }
}

/// Render an error and its sources as `outer: inner: ...`
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_chain_includes_sources() {
        let err = PlaybackError::Open {
            path: PathBuf::from(ALERT_SOUND),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            error_chain(&err),
            "failed to open sound file alert.wav: No such file or directory"
        );
    }

    #[test]
    fn test_error_chain_boxed_source() {
        let err = PlaybackError::Device("no default output".into());
        assert_eq!(
            error_chain(&err),
            "no audio output device available: no default output"
        );
    }
}
