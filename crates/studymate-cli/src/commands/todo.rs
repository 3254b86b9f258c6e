use chrono::{NaiveDate, TimeZone, Utc};
use clap::Subcommand;

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo
    Add {
        /// What to do
        text: String,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,
    },
    /// List todos
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a todo's completion
    Toggle {
        /// Todo id
        id: i64,
    },
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    match action {
        TodoAction::Add { text, due } => {
            let due = Utc.from_utc_datetime(&due.and_hms_opt(23, 59, 59).ok_or("invalid due date")?);
            let todo = state.add_todo(&text, due)?;
            println!("Todo added: {} ({})", todo.text, todo.id);
        }
        TodoAction::List { json } => {
            if json {
                print_json(state.todos())?;
            } else {
                let now = Utc::now();
                for todo in state.todos() {
                    let check = if todo.completed { "x" } else { " " };
                    let overdue = if todo.is_overdue(now) { " (overdue)" } else { "" };
                    println!(
                        "[{check}] {:>3}  {}  due {}{overdue}",
                        todo.id,
                        todo.text,
                        todo.due_date.format("%Y-%m-%d")
                    );
                }
            }
        }
        TodoAction::Toggle { id } => {
            let completed = state.toggle_todo(id)?;
            println!("todo {id}: {}", if completed { "done" } else { "open" });
        }
    }
    Ok(())
}
