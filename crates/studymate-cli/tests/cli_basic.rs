//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_studymate"))
        .args(args)
        .env("STUDYMATE_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_login_bonus_paid_once_per_day() {
    let home = TempDir::new().unwrap();
    let first = run_json(&home, &["login", "--demo", "student", "--json"]);
    assert!(first["first_login_today"].as_bool().unwrap());
    let paid = first["points_awarded"].as_u64().unwrap();
    assert!(paid == 30 || paid == 70);

    let again = run_json(&home, &["login", "--json"]);
    assert_eq!(again["points_awarded"], 0);
    assert_eq!(again["balance"], first["balance"]);
}

#[test]
fn test_whoami_requires_login() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["whoami"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not logged in"));

    run_cli(&home, &["login", "--demo", "teacher"]);
    let user = run_json(&home, &["whoami", "--json"]);
    assert_eq!(user["role"], "teacher");

    let (code, _, _) = run_cli(&home, &["logout"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&home, &["whoami"]);
    assert_ne!(code, 0);
}

#[test]
fn test_student_sign_up_needs_birthday() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["login", "--name", "Hana"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(
        &home,
        &["login", "--name", "Hana", "--birthday", "2011-03-03", "--class", "2-A"],
    );
    assert_eq!(code, 0);
}

#[test]
fn test_video_view_pays_once_per_session() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "student"]);
    let (_, first, _) = run_cli(&home, &["video", "view", "1"]);
    assert!(first.contains("+50 points"));
    let (_, second, _) = run_cli(&home, &["video", "view", "1"]);
    assert!(!second.contains("points"));

    let (code, _, _) = run_cli(&home, &["video", "view", "42"]);
    assert_ne!(code, 0);
}

#[test]
fn test_same_day_relogin_keeps_video_bonus_spent() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "student"]);
    let (_, first, _) = run_cli(&home, &["video", "view", "2"]);
    assert!(first.contains("+50 points"));

    run_cli(&home, &["login"]);
    let (code, again, _) = run_cli(&home, &["video", "view", "2"]);
    assert_eq!(code, 0);
    assert!(!again.contains("points"));
}

#[test]
fn test_batched_study_time_pays_chunks() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "student"]);
    let (code, stdout, _) = run_cli(&home, &["study", "track", "--screen", "quiz", "--seconds", "3600"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("+120 points"));

    let (_, stdout, _) = run_cli(&home, &["study", "track", "--screen", "home", "--seconds", "10"]);
    assert!(stdout.contains("not tracked"));

    let log = run_json(&home, &["study", "log", "--json"]);
    assert_eq!(log["days"].as_array().unwrap().len(), 7);
    assert_eq!(log["total"]["hours"], 1);
}

#[test]
fn test_quiz_finish_awards_correct_answers() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "student"]);
    let result = run_json(&home, &["quiz", "finish", "2", "--answer", "H2O", "--json"]);
    assert_eq!(result["correct"], 1);
    assert_eq!(result["points_awarded"], 30);
}

#[test]
fn test_quiz_create_from_draft_file() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "teacher"]);
    let draft = home.path().join("draft.json");
    std::fs::write(
        &draft,
        r#"{"title":"Fractions","questions":[
            {"type":"multiple-choice","question":"1/2 + 1/4?","options":["3/4","2/6"],"correct_index":0}
        ]}"#,
    )
    .unwrap();
    let draft = draft.to_str().unwrap();
    let (code, stdout, stderr) = run_cli(&home, &["quiz", "create", "--file", draft]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("Quiz created: Fractions"));

    let quizzes = run_json(&home, &["quiz", "list", "--json"]);
    assert_eq!(quizzes[0]["title"], "Fractions");
    assert_eq!(quizzes[0]["questions"][0]["correct_answer"], "3/4");

    let bad = home.path().join("bad.json");
    std::fs::write(&bad, r#"{"title":"Empty","questions":[]}"#).unwrap();
    let (code, _, _) = run_cli(&home, &["quiz", "create", "--file", bad.to_str().unwrap()]);
    assert_ne!(code, 0);
}

#[test]
fn test_quiz_generate_without_key_fails() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "teacher"]);
    let (code, _, stderr) = run_cli(&home, &["quiz", "generate", "--topic", "Fractions"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_calendar_add_and_list() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(
        &home,
        &["calendar", "add", "Math test", "--date", "2030-06-01T10:00", "--notify", "10"],
    );
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&home, &["calendar", "add", "  ", "--date", "2030-06-01T10:00"]);
    assert_ne!(code, 0);

    let events = run_json(&home, &["calendar", "list", "--json"]);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["notification"], "10");
    assert_eq!(events[0]["repeat"], "none");
}

#[test]
fn test_reminder_check_with_nothing_due() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["reminders", "check"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no reminders due"));
}

#[test]
fn test_inbox_list_and_read() {
    let home = TempDir::new().unwrap();
    let inbox = run_json(&home, &["inbox", "list", "--json"]);
    assert_eq!(inbox.as_array().unwrap().len(), 2);
    assert_eq!(inbox[0]["read"], false);

    let (code, stdout, _) = run_cli(&home, &["inbox", "read", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1 marked read"));
    let (code, _, _) = run_cli(&home, &["inbox", "read", "99"]);
    assert_ne!(code, 0);

    run_cli(&home, &["login", "--demo", "student"]);
    run_cli(&home, &["study", "track", "--screen", "video", "--seconds", "1800"]);
    let inbox = run_json(&home, &["inbox", "list", "--json"]);
    assert_eq!(inbox.as_array().unwrap().len(), 3);
    assert_eq!(inbox[0]["read"], false);
}

#[test]
fn test_settings_show_and_set() {
    let home = TempDir::new().unwrap();
    let settings = run_json(&home, &["settings", "show", "--json"]);
    assert_eq!(settings["volume"], 80);

    let (code, _, _) = run_cli(&home, &["settings", "set", "volume", "35"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&home, &["settings", "get", "volume"]);
    assert_eq!(stdout.trim(), "35");

    let (code, _, _) = run_cli(&home, &["settings", "set", "volume", "150"]);
    assert_ne!(code, 0);
    let (code, _, _) = run_cli(&home, &["settings", "set", "dnd_start", "25:00"]);
    assert_ne!(code, 0);
    let (code, _, _) = run_cli(&home, &["settings", "get", "theme"]);
    assert_ne!(code, 0);
}

#[test]
fn test_ranking_marks_self() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "student"]);
    let rows = run_json(&home, &["ranking", "--scope", "grade", "--json"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["rank"], 1);
    assert!(rows.iter().any(|r| r["is_self"] == true && r["name"] == "Ichiro Suzuki"));
}

#[test]
fn test_stamps_after_login() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["login", "--demo", "teacher"]);
    let sheet = run_json(&home, &["stamps", "--json"]);
    assert_eq!(sheet["stamped_days"].as_array().unwrap().len(), 1);
}

#[test]
fn test_todo_add_and_toggle() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["todo", "add", "Read chapter 3", "--due", "2030-01-10"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(4)"));
    let (_, stdout, _) = run_cli(&home, &["todo", "toggle", "4"]);
    assert!(stdout.contains("done"));
    let todos = run_json(&home, &["todo", "list", "--json"]);
    assert_eq!(todos.as_array().unwrap().len(), 4);
}

#[test]
fn test_config_set_get_reset() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["config", "get", "points.login_bonus"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "30");

    let (code, _, _) = run_cli(&home, &["config", "set", "points.login_bonus", "40"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&home, &["config", "get", "points.login_bonus"]);
    assert_eq!(stdout.trim(), "40");

    let (code, _, _) = run_cli(&home, &["config", "set", "points.nope", "1"]);
    assert_ne!(code, 0);
    let (code, _, _) = run_cli(&home, &["config", "set", "reminders.poll_interval_secs", "120"]);
    assert_ne!(code, 0);

    run_cli(&home, &["config", "reset"]);
    let (_, stdout, _) = run_cli(&home, &["config", "get", "points.login_bonus"]);
    assert_eq!(stdout.trim(), "30");
}
