//! Alarm played when an interval completes

use std::{
    io::{self, Write},
    time::Duration,
};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Gap between the two beeps of the alarm
pub const BEEP_GAP: Duration = Duration::from_millis(600);

/// Audible completion signal. Fire-and-forget: must not block the caller.
pub trait Alarm: Send + Sync {
    fn play(&self);
}

/// Two terminal bells, the second one `BEEP_GAP` after the first
#[derive(Debug, Default, Clone)]
pub struct TerminalBell;

impl TerminalBell {
    fn beep() -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

impl Alarm for TerminalBell {
    fn play(&self) {
        debug!("Ringing terminal bell");

        if let Err(e) = Self::beep() {
            warn!("Failed to ring terminal bell: {}", e);
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async {
                    sleep(BEEP_GAP).await;
                    if let Err(e) = TerminalBell::beep() {
                        warn!("Failed to ring terminal bell: {}", e);
                    }
                });
            }
            Err(_) => warn!("No async runtime available, second beep skipped"),
        }
    }
}

/// Alarm that only logs, for `--silent`
#[derive(Debug, Default, Clone)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn play(&self) {
        debug!("Alarm muted, no bell");
    }
}
