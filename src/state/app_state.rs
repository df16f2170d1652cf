//! Main application state management

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{Durations, Mode, RenderState, Theme, TickOutcome, TimerSnapshot, TimerState};
use crate::{
    services::Alarm,
    tasks::{Clock, TickHandle},
};

/// Active clock registration. Ticks carrying another id are stale.
#[derive(Debug)]
struct Subscription {
    id: u64,
    handle: TickHandle,
}

/// Owns the timer and coordinates it with the clock, the alarm and the
/// render channel. Every transition publishes a fresh `RenderState`.
///
/// Lock order is subscription, then timer, then theme.
pub struct AppState {
    timer: Mutex<TimerState>,
    subscription: Mutex<Option<Subscription>>,
    next_subscription_id: AtomicU64,
    theme: Mutex<Theme>,
    clock: Arc<dyn Clock>,
    alarm: Arc<dyn Alarm>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Render hook: receivers see every published snapshot
    pub render_tx: watch::Sender<RenderState>,
    /// Keep the receiver alive to prevent channel closure
    _render_rx: watch::Receiver<RenderState>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("timer", &self.timer)
            .field("subscription", &self.subscription)
            .field("theme", &self.theme)
            .field("start_time", &self.start_time)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("last_action", &self.last_action)
            .field("last_action_time", &self.last_action_time)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        durations: Durations,
        theme: Theme,
        clock: Arc<dyn Clock>,
        alarm: Arc<dyn Alarm>,
    ) -> Self {
        let timer = TimerState::with_durations(durations);
        let (render_tx, render_rx) = watch::channel(RenderState {
            timer: timer.snapshot(),
            theme,
            completed: false,
        });

        Self {
            timer: Mutex::new(timer),
            subscription: Mutex::new(None),
            next_subscription_id: AtomicU64::new(0),
            theme: Mutex::new(theme),
            clock,
            alarm,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            render_tx,
            _render_rx: render_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, String> {
        self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    fn lock_subscription(&self) -> Result<MutexGuard<'_, Option<Subscription>>, String> {
        self.subscription.lock()
            .map_err(|e| format!("Failed to lock clock subscription: {}", e))
    }

    fn lock_theme(&self) -> Result<MutexGuard<'_, Theme>, String> {
        self.theme.lock()
            .map_err(|e| format!("Failed to lock theme: {}", e))
    }

    /// Register with the clock. The callback only holds a weak reference so
    /// a pending tick never keeps the state alive.
    fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = self.next_subscription_id.fetch_add(1, Ordering::SeqCst) + 1;
        let state = Arc::downgrade(self);
        let handle = self.clock.subscribe(Box::new(move || {
            if let Some(state) = state.upgrade() {
                if let Err(e) = state.on_tick(id) {
                    error!("Failed to process tick: {}", e);
                }
            }
        }));
        debug!("Clock subscription {} registered", id);
        Subscription { id, handle }
    }

    fn cancel_subscription(slot: &mut Option<Subscription>) {
        if let Some(subscription) = slot.take() {
            debug!("Cancelling clock subscription {}", subscription.id);
            subscription.handle.cancel();
        }
    }

    fn start_locked(
        self: &Arc<Self>,
        subscription: &mut Option<Subscription>,
        timer: &mut TimerState,
    ) {
        if timer.start() {
            Self::cancel_subscription(subscription);
            *subscription = Some(self.subscribe());
            info!("Timer started: {} with {}s remaining", timer.mode(), timer.remaining_seconds());
        } else if timer.is_running() {
            debug!("Start ignored, timer already running");
        } else {
            debug!("Start ignored, nothing left to count down");
        }
    }

    fn pause_locked(subscription: &mut Option<Subscription>, timer: &mut TimerState) {
        Self::cancel_subscription(subscription);
        if timer.pause() {
            info!("Timer paused with {}s remaining", timer.remaining_seconds());
        } else {
            debug!("Pause ignored, timer not running");
        }
    }

    /// Start the countdown
    pub fn start(self: &Arc<Self>) -> Result<RenderState, String> {
        let mut subscription = self.lock_subscription()?;
        let mut timer = self.lock_timer()?;
        self.start_locked(&mut subscription, &mut timer);
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("start"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<RenderState, String> {
        let mut subscription = self.lock_subscription()?;
        let mut timer = self.lock_timer()?;
        Self::pause_locked(&mut subscription, &mut timer);
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("pause"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Pause if running, start otherwise
    pub fn toggle(self: &Arc<Self>) -> Result<RenderState, String> {
        let mut subscription = self.lock_subscription()?;
        let mut timer = self.lock_timer()?;
        if timer.is_running() {
            Self::pause_locked(&mut subscription, &mut timer);
        } else {
            self.start_locked(&mut subscription, &mut timer);
        }
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("toggle"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Stop and reload the current mode's duration
    pub fn reset(&self) -> Result<RenderState, String> {
        let mut subscription = self.lock_subscription()?;
        Self::cancel_subscription(&mut subscription);
        let mut timer = self.lock_timer()?;
        timer.reset();
        info!("Timer reset to {}s", timer.remaining_seconds());
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("reset"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Switch to another interval, which always resets
    pub fn set_mode(&self, mode: Mode) -> Result<RenderState, String> {
        let mut subscription = self.lock_subscription()?;
        Self::cancel_subscription(&mut subscription);
        let mut timer = self.lock_timer()?;
        timer.set_mode(mode);
        info!("Mode set to {} ({}s)", mode, timer.remaining_seconds());
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("mode"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Apply new durations from raw user input. Invalid fields fall back to
    /// their defaults. A running countdown is left alone.
    pub fn set_durations(
        &self,
        work: &str,
        short_break: &str,
        long_break: &str,
    ) -> Result<RenderState, String> {
        let durations = Durations::parse(work, short_break, long_break);

        let subscription = self.lock_subscription()?;
        let mut timer = self.lock_timer()?;
        timer.set_durations(durations);
        info!(
            "Durations set to work={}min short_break={}min long_break={}min{}",
            durations.work,
            durations.short_break,
            durations.long_break,
            if timer.is_running() { " (applies on next reset)" } else { "" }
        );
        let snapshot = timer.snapshot();
        let rendered = self.publish(Some("durations"), snapshot, false);
        drop(timer);
        drop(subscription);

        rendered
    }

    /// Flip between light and dark appearance
    pub fn toggle_theme(&self) -> Result<RenderState, String> {
        let subscription = self.lock_subscription()?;
        let snapshot = self.lock_timer()?.snapshot();
        {
            let mut theme = self.lock_theme()?;
            *theme = theme.toggled();
            info!("Theme set to {}", theme.as_str());
        }
        let rendered = self.publish(Some("theme"), snapshot, false);
        drop(subscription);

        rendered
    }

    /// Handle one clock tick from subscription `id`
    pub fn on_tick(&self, id: u64) -> Result<(), String> {
        let mut subscription = self.lock_subscription()?;
        match subscription.as_ref() {
            Some(current) if current.id == id => {}
            _ => {
                debug!("Ignoring stale tick from subscription {}", id);
                return Ok(());
            }
        }

        let mut timer = self.lock_timer()?;
        let outcome = timer.tick();
        if outcome != TickOutcome::Counted {
            Self::cancel_subscription(&mut subscription);
        }
        let snapshot = timer.snapshot();
        let completed = outcome == TickOutcome::Completed;
        if outcome != TickOutcome::Ignored {
            self.publish(None, snapshot, completed)?;
        }
        drop(timer);
        drop(subscription);

        match outcome {
            TickOutcome::Counted => {}
            TickOutcome::Completed => {
                info!("{} interval complete", snapshot.mode);
                self.alarm.play();
            }
            TickOutcome::Ignored => {
                warn!("Tick delivered to an idle timer, subscription dropped");
            }
        }
        Ok(())
    }

    /// Send a render snapshot and, for user actions, record the action.
    /// Callers hold the subscription lock so snapshots go out in the order
    /// the transitions happened.
    fn publish(
        &self,
        action: Option<&str>,
        timer: TimerSnapshot,
        completed: bool,
    ) -> Result<RenderState, String> {
        let theme = *self.lock_theme()?;
        let render_state = RenderState { timer, theme, completed };

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        if let Err(e) = self.render_tx.send(render_state) {
            warn!("Failed to send render update: {}", e);
        }

        Ok(render_state)
    }

    /// Get current render state
    pub fn get_render_state(&self) -> Result<RenderState, String> {
        let timer = self.lock_timer()?.snapshot();
        let theme = *self.lock_theme()?;
        Ok(RenderState { timer, theme, completed: false })
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
