use std::process::ExitCode;
use std::time::Duration;

use chime_cli::{Alarm, RodioPlayer, finish, logging};
use chime_core::{AlarmConfig, SystemClock, ThreadSleeper};
use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Play alert.wav when a wall-clock time is reached")]
struct Cli {
    /// Target time as HH:MM:SS (24-hour). Prompts on stdin when omitted.
    time: Option<String>,

    /// Seconds between clock checks while waiting
    #[arg(long, value_name = "SECS")]
    poll_interval: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    // Capture the local offset before the audio backend spawns threads
    let clock = SystemClock::new();
    let config = AlarmConfig::load();

    let poll_interval = cli
        .poll_interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());
    let player = RodioPlayer::new(config.volume_scale());
    let mut alarm = Alarm::new(clock, ThreadSleeper, player).with_poll_interval(poll_interval);

    let stdin = std::io::stdin();
    let result = alarm.run(
        cli.time.as_deref(),
        &mut stdin.lock(),
        &mut std::io::stdout().lock(),
    );

    ExitCode::from(finish(result, &mut std::io::stdout().lock()))
}
