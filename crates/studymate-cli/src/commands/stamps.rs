use studymate_core::{Clock, SystemClock};

use super::{open_state, print_json};

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state()?;
    let sheet = state.stamp_sheet(SystemClock.today());
    if json {
        return print_json(&sheet);
    }

    println!("{} (week {})", sheet.theme.title, sheet.week_id);
    let row: Vec<String> = DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cell = if sheet.stamped_days.contains(&(i as u8)) {
                sheet.theme.stamp_glyph
            } else {
                "·"
            };
            format!("{label} {cell}")
        })
        .collect();
    println!("{}", row.join("  "));
    Ok(())
}
