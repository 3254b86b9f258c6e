use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use studymate_core::reminders::POLL_INTERVAL_SECS;
use studymate_core::{
    spawn_reminder_poller, Clock, Config, CoreError, Notifier, ReminderScheduler, SystemClock,
};

use super::open_state;

/// Prints notifications to stdout. Permission comes from
/// `notifications.enabled` in the config.
pub struct ConsoleNotifier {
    enabled: bool,
}

impl ConsoleNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for ConsoleNotifier {
    fn permission_granted(&self) -> bool {
        self.enabled
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), CoreError> {
        println!("[{title}] {body}");
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum RemindersAction {
    /// Run a single reminder scan now
    Check,
    /// Poll for reminders until Ctrl-C
    Watch,
}

pub fn run(action: RemindersAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let scheduler = ReminderScheduler::new(ConsoleNotifier::new(config.notifications.enabled));

    match action {
        RemindersAction::Check => {
            let mut state = open_state()?;
            let fired = state.poll_reminders(&scheduler, SystemClock.now())?;
            if fired.is_empty() {
                println!("no reminders due");
            }
        }
        RemindersAction::Watch => {
            let state = Arc::new(Mutex::new(open_state()?));
            let period = Duration::from_secs(POLL_INTERVAL_SECS);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let poller = spawn_reminder_poller(
                    state,
                    Arc::new(scheduler),
                    Arc::new(SystemClock),
                    period,
                );
                tracing::info!(period_secs = period.as_secs(), "reminder watch started");
                println!("watching reminders every minute, press Ctrl-C to stop");
                let signal = tokio::signal::ctrl_c().await;
                poller.stop().await;
                signal
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_follows_config_flag() {
        assert!(ConsoleNotifier::new(true).permission_granted());
        assert!(!ConsoleNotifier::new(false).permission_granted());
    }
}
