use clap::Subcommand;
use studymate_core::seed;

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum VideoAction {
    /// List lesson videos
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Watch a video (first view per session earns points)
    View {
        /// Video id
        id: u64,
    },
}

pub fn run(action: VideoAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        VideoAction::List { json } => {
            let videos = seed::videos();
            if json {
                print_json(&videos)?;
            } else {
                for video in &videos {
                    println!("{:>3}  {}  ({})", video.id, video.title, video.uploader);
                }
            }
        }
        VideoAction::View { id } => {
            let video = seed::videos()
                .into_iter()
                .find(|v| v.id == id)
                .ok_or_else(|| format!("video not found: {id}"))?;
            let mut state = open_state()?;
            let points = state.view_video(video.id)?;
            println!("Watching: {}", video.title);
            if points > 0 {
                println!("+{points} points");
            }
        }
    }
    Ok(())
}
