//! Timer tasks that post events back into the main loop.
//!
//! Every timer is owned through a [`TimerHandle`]. Dropping the handle aborts
//! the task, so whoever owns the handle decides how long the timer lives.

use crate::app::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug)]
pub struct TimerHandle(JoinHandle<()>);

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Post `make_event()` every `period`, starting one period from now.
pub fn every<F>(period: Duration, event_tx: mpsc::UnboundedSender<AppEvent>, make_event: F) -> TimerHandle
where
    F: Fn() -> AppEvent + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            if event_tx.send(make_event()).is_err() {
                break;
            }
        }
    });
    TimerHandle(task)
}

/// Post `event` once after `delay`.
pub fn after(delay: Duration, event_tx: mpsc::UnboundedSender<AppEvent>, event: AppEvent) -> TimerHandle {
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = event_tx.send(event);
    });
    TimerHandle(task)
}
