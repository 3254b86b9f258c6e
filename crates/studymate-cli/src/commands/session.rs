use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use studymate_core::seed;
use studymate_core::{Clock, SystemClock, User, UserRole};

use super::{open_state, print_json};

#[derive(Clone, Copy, ValueEnum)]
pub enum DemoAccount {
    Student,
    Teacher,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Sign in with a built-in demo account
    #[arg(long, conflicts_with = "name")]
    demo: Option<DemoAccount>,
    /// Display name for a new account
    #[arg(long)]
    name: Option<String>,
    /// Class, e.g. "2-B"
    #[arg(long, default_value = "2-B")]
    class: String,
    /// Account role (student or teacher)
    #[arg(long, default_value = "student")]
    role: UserRole,
    /// Birthday as YYYY-MM-DD (required for students)
    #[arg(long)]
    birthday: Option<NaiveDate>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn login(args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    let user = match (args.demo, args.name) {
        (Some(DemoAccount::Student), _) => seed::demo_student(),
        (Some(DemoAccount::Teacher), _) => seed::demo_teacher(),
        (None, Some(name)) => User::sign_up(&name, &args.class, args.role, args.birthday)?,
        (None, None) => state
            .user()
            .cloned()
            .ok_or("no saved user; pass --demo or --name")?,
    };

    let outcome = state.login(user, SystemClock.today())?;
    if args.json {
        print_json(&outcome)?;
    } else if outcome.points_awarded > 0 {
        println!(
            "Login bonus: +{} points (balance {})",
            outcome.points_awarded, outcome.balance
        );
    } else if outcome.first_login_today {
        println!("Logged in (balance {})", outcome.balance);
    } else {
        println!("Welcome back (balance {})", outcome.balance);
    }
    Ok(())
}

pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    state.logout()?;
    println!("logged out");
    Ok(())
}

pub fn whoami(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state()?;
    let user = state.user().ok_or("not logged in")?;
    if json {
        print_json(user)?;
    } else {
        println!("{} ({}, {:?}) {} pts", user.name, user.class_name, user.role, user.points);
    }
    Ok(())
}
