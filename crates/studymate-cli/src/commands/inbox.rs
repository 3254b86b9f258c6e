use clap::Subcommand;

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum InboxAction {
    /// List messages, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a message read
    Read {
        /// Message id
        #[arg(required_unless_present = "all")]
        id: Option<i64>,
        /// Mark every message read
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
}

pub fn run(action: InboxAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    match action {
        InboxAction::List { json } => {
            if json {
                print_json(state.inbox())?;
            } else if state.inbox().is_empty() {
                println!("no messages");
            } else {
                for message in state.inbox() {
                    let marker = if message.read { " " } else { "*" };
                    let video = message
                        .video_id
                        .map(|id| format!(" (video {id})"))
                        .unwrap_or_default();
                    println!("{marker} {:>3}  {}{video}", message.id, message.message);
                }
                println!("{} unread", state.unread_count());
            }
        }
        InboxAction::Read { id, all } => {
            let changed = state.mark_inbox_read(if all { None } else { id })?;
            println!("{changed} marked read");
        }
    }
    Ok(())
}
