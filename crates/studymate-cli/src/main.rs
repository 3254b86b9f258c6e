use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studymate", version, about = "StudyMate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session and collect the daily login bonus
    Login(commands::session::LoginArgs),
    /// End the session and forget the signed-in user
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Study time tracking
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Lesson videos
    Video {
        #[command(subcommand)]
        action: commands::video::VideoAction,
    },
    /// Quizzes
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Calendar reminders
    Reminders {
        #[command(subcommand)]
        action: commands::reminders::RemindersAction,
    },
    /// Class or grade leaderboard
    Ranking(commands::ranking::RankingArgs),
    /// This week's login stamps
    Stamps {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Study plan todos
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// In-app messages
    Inbox {
        #[command(subcommand)]
        action: commands::inbox::InboxAction,
    },
    /// Display and sound settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = std::env::var("STUDYMATE_LOG").unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Login(args) => commands::session::login(args),
        Commands::Logout => commands::session::logout(),
        Commands::Whoami { json } => commands::session::whoami(json),
        Commands::Study { action } => commands::study::run(action),
        Commands::Video { action } => commands::video::run(action),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Reminders { action } => commands::reminders::run(action),
        Commands::Ranking(args) => commands::ranking::run(args),
        Commands::Stamps { json } => commands::stamps::run(json),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Inbox { action } => commands::inbox::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
