use clap::Args;
use studymate_core::RankingScope;

use super::{open_state, print_json};

#[derive(Args)]
pub struct RankingArgs {
    /// Leaderboard scope (class or grade)
    #[arg(long, default_value = "class")]
    scope: RankingScope,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RankingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state()?;
    let rows = state.ranking(args.scope);
    if args.json {
        print_json(&rows)?;
        return Ok(());
    }
    for row in &rows {
        let marker = if row.is_self { "*" } else { " " };
        let class = row
            .entry
            .class_name
            .as_deref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        println!(
            "{marker}{:>3}. {}{class}  {} pts",
            row.rank, row.entry.name, row.entry.points
        );
    }
    Ok(())
}
