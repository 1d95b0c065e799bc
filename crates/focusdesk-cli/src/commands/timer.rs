use std::time::Duration;

use clap::Subcommand;
use focusdesk_core::timer::format_clock;
use focusdesk_core::{Config, TimerMode};
use tokio::time::Instant;

use crate::common::{open_widget, print_json, runtime, CliResult};

/// How often the foreground loop samples the wall clock.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start the countdown and tick in the foreground until it expires.
    /// Ctrl-C pauses and keeps the remaining time.
    Run,
    /// Refill the current mode
    Reset,
    /// Switch mode (focus or break)
    Mode {
        mode: TimerMode,
    },
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();
    let mut widget = open_widget(&config)?;

    match action {
        TimerAction::Status => print_json(&widget.snapshot())?,
        TimerAction::Reset => widget.reset_timer(),
        TimerAction::Mode { mode } => widget.set_mode(mode),
        TimerAction::Run => {
            let report_every = config.timer.report_every_secs.max(1);
            let rt = runtime()?;
            rt.block_on(async {
                widget.start_timer();
                println!(
                    "{} {}",
                    format_clock(widget.timer().seconds_left()),
                    widget.timer().mode().label()
                );

                let mut interval = tokio::time::interval(POLL_INTERVAL);
                let ctrl_c = tokio::signal::ctrl_c();
                tokio::pin!(ctrl_c);
                let mut last = Instant::now();
                let mut last_reported = widget.timer().seconds_left();

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let now = Instant::now();
                            widget.advance(now - last);
                            last = now;

                            if !widget.timer().is_running() {
                                break;
                            }
                            let left = widget.timer().seconds_left();
                            if left != last_reported && u64::from(left) % report_every == 0 {
                                println!("{}", format_clock(left));
                                last_reported = left;
                            }
                        }
                        _ = &mut ctrl_c => {
                            widget.pause_timer();
                            break;
                        }
                    }
                }
            });
        }
    }
    Ok(())
}
