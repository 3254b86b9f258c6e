use std::io::Read;
use std::path::PathBuf;

use clap::Subcommand;
use studymate_core::{GeminiQuizGenerator, QuizDraft, QuizGenerator, QuizRequest};

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum QuizAction {
    /// List quizzes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit answers for a quiz
    Finish {
        /// Quiz id
        id: i64,
        /// Answers in question order (repeat the flag per question)
        #[arg(long = "answer", short = 'a')]
        answers: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a quiz from a JSON draft
    Create {
        /// Draft file, or "-" for stdin
        #[arg(long)]
        file: PathBuf,
    },
    /// Generate a quiz with Gemini (needs GEMINI_API_KEY)
    Generate {
        /// Quiz topic
        #[arg(long)]
        topic: String,
        /// Total number of questions
        #[arg(long, default_value_t = 5)]
        total: u32,
        /// How many of them are descriptive
        #[arg(long, default_value_t = 1)]
        descriptive: u32,
    },
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::List { json } => {
            let state = open_state()?;
            if json {
                print_json(state.quizzes())?;
            } else {
                for quiz in state.quizzes() {
                    println!(
                        "{:>14}  {} ({} questions, by {})",
                        quiz.id,
                        quiz.title,
                        quiz.questions.len(),
                        quiz.author_name
                    );
                }
            }
        }
        QuizAction::Finish { id, answers, json } => {
            let mut state = open_state()?;
            let result = state.finish_quiz(id, &answers)?;
            if json {
                print_json(&result)?;
            } else {
                for outcome in &result.outcomes {
                    let mark = match outcome.correct {
                        Some(true) => "correct",
                        Some(false) => "wrong",
                        None => "ungraded",
                    };
                    println!("[{mark}] {}", outcome.question);
                }
                println!(
                    "{} correct, +{} points",
                    result.correct, result.points_awarded
                );
            }
        }
        QuizAction::Create { file } => {
            let raw = if file.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&file)?
            };
            let draft: QuizDraft = serde_json::from_str(&raw)?;
            let mut state = open_state()?;
            let quiz = state.create_quiz(draft, chrono::Utc::now())?;
            println!("Quiz created: {} ({})", quiz.title, quiz.id);
        }
        QuizAction::Generate {
            topic,
            total,
            descriptive,
        } => {
            let request = QuizRequest {
                topic: topic.clone(),
                total_questions: total,
                descriptive_count: descriptive,
            };
            request.validate()?;

            let mut state = open_state()?;
            let generator = GeminiQuizGenerator::from_env();
            let rt = tokio::runtime::Runtime::new()?;
            let questions = rt.block_on(generator.generate(&request))?;
            let quiz = state.add_quiz(&topic, questions, chrono::Utc::now())?;
            println!("Quiz created: {} ({})", quiz.title, quiz.id);
        }
    }
    Ok(())
}
