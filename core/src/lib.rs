pub mod clock;
pub mod config;
pub mod error;
pub mod sound;
pub mod wait;

// Re-exports for convenience
pub use clock::{Clock, SystemClock, TimeOfDay, format_instant, resolve_target};
pub use config::AlarmConfig;
pub use error::{ConfigError, FormatError};
pub use sound::{ALERT_SOUND, PlaybackError, SoundPlayer, error_chain};
pub use wait::{CancelToken, DEFAULT_POLL_INTERVAL, Sleeper, ThreadSleeper, WaitOutcome, wait_until};
