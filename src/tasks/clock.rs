//! Clock source driving the countdown

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Callback invoked on every tick, no payload
pub type TickCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Periodic notification source
pub trait Clock: Send + Sync {
    /// Begin delivering ticks to `on_tick` until the returned handle is cancelled
    fn subscribe(&self, on_tick: TickCallback) -> TickHandle;
}

/// Cancellation handle for a clock subscription
#[derive(Debug, Default)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Handle for clocks that have no background task to stop
    pub fn detached() -> Self {
        Self { task: None }
    }

    /// Stop further ticks from this subscription
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Clock backed by a tokio interval, one tick per period
#[derive(Debug, Clone)]
pub struct TokioClock {
    period: Duration,
}

impl TokioClock {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::every_second()
    }
}

impl Clock for TokioClock {
    fn subscribe(&self, on_tick: TickCallback) -> TickHandle {
        let period = self.period;
        let task = tokio::spawn(async move {
            // First tick lands one full period after subscribing
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                on_tick();
            }
        });
        debug!("Clock subscription started ({}ms period)", period.as_millis());
        TickHandle::new(task)
    }
}
