//! Terminal render task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::{services::View, state::RenderState};

/// Whether a new snapshot is only the countdown moving on
fn is_plain_tick(previous: &RenderState, current: &RenderState) -> bool {
    !current.completed
        && previous.theme == current.theme
        && previous.timer.mode == current.timer.mode
        && previous.timer.is_running == current.timer.is_running
        && previous.timer.durations == current.timer.durations
}

/// Background task that renders every published snapshot as a log line
pub async fn render_task(mut render_rx: watch::Receiver<RenderState>) {
    info!("Starting render task");

    let mut previous = *render_rx.borrow_and_update();
    info!("{}", render_line(&View::project(&previous)));

    while render_rx.changed().await.is_ok() {
        let current = *render_rx.borrow_and_update();
        let line = render_line(&View::project(&current));

        if is_plain_tick(&previous, &current) {
            debug!("{}", line);
        } else {
            info!("{}", line);
        }
        previous = current;
    }

    debug!("Render channel closed, render task exiting");
}

fn render_line(view: &View) -> String {
    let run_state = if view.icon == "pause" { "running" } else { "stopped" };
    format!("[{}] {} {} ({})", view.label, view.display, run_state, view.theme.as_str())
}
