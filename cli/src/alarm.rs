//! Prompt, wait, and alert flow
//!
//! `AwaitingInput -> Parsed -> Waiting -> Alerting -> Done`, with `Failed`
//! reachable on bad input (fatal) or a playback error (reported only).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use chime_core::{
    ALERT_SOUND, CancelToken, Clock, DEFAULT_POLL_INTERVAL, FormatError, Sleeper, SoundPlayer,
    TimeOfDay, WaitOutcome, error_chain, format_instant, resolve_target, wait_until,
};

const PROMPT: &str = "Enter target time (HH:MM:SS): ";

/// Where the alarm is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    AwaitingInput,
    Parsed,
    Waiting,
    Alerting,
    Done,
    Failed,
}

/// How a run that got past input parsing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Target reached and the sound played
    Played,
    /// Target reached, playback failed and was reported
    PlaybackFailed,
    /// The wait was aborted through the cancel token
    Cancelled,
}

impl Outcome {
    /// Process exit status. A failed playback still counts as success.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Played | Outcome::PlaybackFailed => 0,
            Outcome::Cancelled => 130,
        }
    }
}

/// Errors that end the run before the alarm is armed
#[derive(Debug, Error)]
pub enum AlarmError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to read target time")]
    Input(#[source] io::Error),

    #[error("failed to write status")]
    Output(#[source] io::Error),
}

impl AlarmError {
    /// Process exit status for a run that never armed the alarm
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Report the end of a run on `out` and return the process exit status
pub fn finish<W: Write>(result: Result<Outcome, AlarmError>, out: &mut W) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            let _ = writeln!(out, "{}", error_chain(&e));
            let _ = out.flush();
            e.exit_code()
        }
    }
}

pub struct Alarm<C, S, P> {
    clock: C,
    sleeper: S,
    player: P,
    poll_interval: Duration,
    sound_path: PathBuf,
    cancel: CancelToken,
    state: AlarmState,
}

impl<C: Clock, S: Sleeper, P: SoundPlayer> Alarm<C, S, P> {
    pub fn new(clock: C, sleeper: S, player: P) -> Self {
        Self {
            clock,
            sleeper,
            player,
            poll_interval: DEFAULT_POLL_INTERVAL,
            sound_path: PathBuf::from(ALERT_SOUND),
            cancel: CancelToken::new(),
            state: AlarmState::AwaitingInput,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that aborts a running wait
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    fn transition(&mut self, next: AlarmState) {
        tracing::debug!(from = ?self.state, to = ?next, "alarm state");
        self.state = next;
    }

    /// Run the alarm to completion.
    ///
    /// `preset` skips the prompt when the time was given up front; otherwise one
    /// line is read from `input`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        preset: Option<&str>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Outcome, AlarmError> {
        let raw = match preset {
            Some(given) => given.to_string(),
            None => {
                write!(out, "{PROMPT}").map_err(AlarmError::Output)?;
                out.flush().map_err(AlarmError::Output)?;
                let mut line = String::new();
                if let Err(e) = input.read_line(&mut line) {
                    self.transition(AlarmState::Failed);
                    return Err(AlarmError::Input(e));
                }
                line
            }
        };

        let tod = match TimeOfDay::parse(raw.trim()) {
            Ok(tod) => tod,
            Err(e) => {
                tracing::debug!(input = %e.input, "rejected target time");
                self.transition(AlarmState::Failed);
                return Err(e.into());
            }
        };
        self.transition(AlarmState::Parsed);

        let target = resolve_target(tod, self.clock.now());
        writeln!(out, "Waiting until {}...", format_instant(target)).map_err(AlarmError::Output)?;
        out.flush().map_err(AlarmError::Output)?;
        self.transition(AlarmState::Waiting);

        let waited = wait_until(
            &self.clock,
            &self.sleeper,
            target,
            self.poll_interval,
            &self.cancel,
        );
        if waited == WaitOutcome::Cancelled {
            writeln!(out, "Alarm cancelled.").map_err(AlarmError::Output)?;
            self.transition(AlarmState::Done);
            return Ok(Outcome::Cancelled);
        }

        self.transition(AlarmState::Alerting);
        writeln!(out, "Target time reached! Playing sound...").map_err(AlarmError::Output)?;
        out.flush().map_err(AlarmError::Output)?;

        match self.player.play(&self.sound_path) {
            Ok(()) => {
                self.transition(AlarmState::Done);
                Ok(Outcome::Played)
            }
            Err(e) => {
                tracing::debug!(path = %self.sound_path.display(), error = %error_chain(&e), "playback failed");
                writeln!(out, "Failed to play sound: {}", error_chain(&e))
                    .map_err(AlarmError::Output)?;
                self.transition(AlarmState::Failed);
                Ok(Outcome::PlaybackFailed)
            }
        }
    }
}
