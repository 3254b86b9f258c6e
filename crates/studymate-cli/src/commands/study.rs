use std::sync::{Arc, Mutex};

use clap::Subcommand;
use studymate_core::{Clock, Screen, StudyTracker, SystemClock};

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Count study time on a screen
    Track {
        /// Screen being shown (video and quiz count as study)
        #[arg(long, default_value = "video")]
        screen: Screen,
        /// Record this many seconds at once instead of ticking live until Ctrl-C
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Study minutes over the last seven days
    Log {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StudyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StudyAction::Track {
            screen,
            seconds: Some(seconds),
        } => {
            let mut state = open_state()?;
            match state.record_study_seconds(screen, SystemClock.today(), seconds)? {
                Some(progress) => {
                    println!("{} s studied today", progress.seconds_today);
                    if progress.points_awarded > 0 {
                        println!("+{} points", progress.points_awarded);
                    }
                }
                None => println!("study time is not tracked on this screen"),
            }
        }
        StudyAction::Track {
            screen,
            seconds: None,
        } => {
            let state = Arc::new(Mutex::new(open_state()?));
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let mut tracker = StudyTracker::new(Arc::clone(&state), Arc::new(SystemClock));
                tracker.switch_screen(screen);
                if !tracker.is_ticking() {
                    println!("study time is not tracked on this screen");
                    return Ok::<(), Box<dyn std::error::Error>>(());
                }
                println!("tracking study time, press Ctrl-C to stop");
                tokio::signal::ctrl_c().await?;
                tracker.stop().await;
                Ok(())
            })?;

            let app = state.lock().unwrap_or_else(|e| e.into_inner());
            let seconds = app.study_log().seconds_on(SystemClock.today());
            println!("{seconds} s studied today");
        }
        StudyAction::Log { json } => {
            let state = open_state()?;
            let today = SystemClock.today();
            let days = state.study_log().last_seven_days(today);
            let total = state.study_log().weekly_total(today);
            if json {
                print_json(&serde_json::json!({ "days": days, "total": total }))?;
            } else {
                for day in &days {
                    println!("{} {} {:>6.1} min", day.date, day.label, day.minutes);
                }
                println!("total: {}h {}m", total.hours, total.minutes);
            }
        }
    }
    Ok(())
}
