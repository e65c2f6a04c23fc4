pub mod alarm;
pub mod audio;
pub mod logging;

pub use alarm::{Alarm, AlarmError, AlarmState, Outcome, finish};
pub use audio::RodioPlayer;
