//! Background timers.
//!
//! Both timers are tokio tasks behind a [`TaskHandle`]. Stopping the handle
//! signals the task through a watch channel; dropping it aborts the task.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::app::{AppState, Screen};
use crate::clock::Clock;
use crate::reminders::{Notifier, ReminderScheduler};

/// State shared between the foreground and the timers.
pub type SharedState = Arc<Mutex<AppState>>;

pub const STUDY_TICK: Duration = Duration::from_secs(1);

/// Owner of a spawned timer task.
pub struct TaskHandle {
    cancel: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// Signal the task and wait for it to exit.
    pub async fn stop(mut self) {
        let _ = self.cancel.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "timer task panicked");
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Run `tick` every `period`, starting one period from now, until it returns
/// `Break` or the handle is stopped.
///
/// Must be called from within a tokio runtime.
pub fn spawn_interval<F>(period: Duration, mut tick: F) -> TaskHandle
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let (cancel, mut cancelled) = watch::channel(false);
    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancelled.changed() => break,
                _ = interval.tick() => {
                    if tick().is_break() {
                        break;
                    }
                }
            }
        }
    });
    TaskHandle {
        cancel,
        handle: Some(handle),
    }
}

/// Counts study seconds while a study screen is shown.
///
/// Switching screens always cancels the running ticker first, so at most one
/// ticker exists at a time.
pub struct StudyTracker {
    state: SharedState,
    clock: Arc<dyn Clock>,
    screen: Option<Screen>,
    ticker: Option<TaskHandle>,
}

impl StudyTracker {
    pub fn new(state: SharedState, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            screen: None,
            ticker: None,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Move to `screen`, starting or cancelling the ticker as needed.
    pub fn switch_screen(&mut self, screen: Screen) {
        if self.screen == Some(screen) && self.ticker.is_some() {
            return;
        }
        self.ticker = None;
        self.screen = Some(screen);
        if !screen.counts_as_study() {
            return;
        }

        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        self.ticker = Some(spawn_interval(STUDY_TICK, move || {
            let mut app = state.lock().unwrap_or_else(|e| e.into_inner());
            match app.record_study_second(screen, clock.today()) {
                Ok(Some(_)) => ControlFlow::Continue(()),
                Ok(None) => {
                    tracing::debug!(?screen, "study tracking not active, ticker stops");
                    ControlFlow::Break(())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to record study time");
                    ControlFlow::Continue(())
                }
            }
        }));
        tracing::debug!(?screen, "study ticker started");
    }

    /// Stop ticking and wait for the task to finish.
    pub async fn stop(&mut self) {
        self.screen = None;
        if let Some(ticker) = self.ticker.take() {
            ticker.stop().await;
        }
    }
}

/// Poll reminders every `period` against the shared state.
pub fn spawn_reminder_poller<N>(
    state: SharedState,
    scheduler: Arc<ReminderScheduler<N>>,
    clock: Arc<dyn Clock>,
    period: Duration,
) -> TaskHandle
where
    N: Notifier + Send + Sync + 'static,
{
    spawn_interval(period, move || {
        let mut app = state.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = app.poll_reminders(&scheduler, clock.now()) {
            tracing::warn!(error = %e, "failed to persist reminder flags");
        }
        ControlFlow::Continue(())
    })
}
