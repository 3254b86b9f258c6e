//! Quizzes and the quiz generator capability.
//!
//! Generated quizzes come from an external model behind [`QuizGenerator`].
//! The engine only cares that it gets a question list or an error back.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{QuizError, ValidationError};
use crate::profile::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    Descriptive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub kind: QuestionKind,
    pub question: String,
    /// Choices for multiple-choice questions, empty for descriptive ones.
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub related_video_id: Option<u64>,
    pub questions: Vec<QuizQuestion>,
    pub author_name: String,
    pub class_name: String,
}

/// Result of one answered question. Descriptive answers are not graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub question: String,
    pub answer: String,
    pub correct: Option<bool>,
}

impl Quiz {
    /// Grade answers in question order; extra answers are ignored.
    pub fn grade(&self, answers: &[String]) -> Vec<AnswerOutcome> {
        self.questions
            .iter()
            .zip(answers)
            .map(|(q, a)| AnswerOutcome {
                question: q.question.clone(),
                answer: a.clone(),
                correct: match q.kind {
                    QuestionKind::MultipleChoice => Some(q.correct_answer == *a),
                    QuestionKind::Descriptive => None,
                },
            })
            .collect()
    }
}

/// Number of answers graded correct.
pub fn correct_count(outcomes: &[AnswerOutcome]) -> u64 {
    outcomes.iter().filter(|o| o.correct == Some(true)).count() as u64
}

/// A question typed in by hand, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ManualQuestion {
    MultipleChoice {
        question: String,
        options: Vec<String>,
        /// Index into `options`; `None` until a correct option is picked.
        #[serde(default)]
        correct_index: Option<usize>,
    },
    Descriptive {
        question: String,
        answer: String,
    },
}

impl ManualQuestion {
    /// Validate the form and turn it into a stored question.
    pub fn build(self) -> Result<QuizQuestion, ValidationError> {
        match self {
            ManualQuestion::MultipleChoice {
                question,
                options,
                correct_index,
            } => {
                let question = non_blank(question, "question")?;
                if options.is_empty() {
                    return Err(ValidationError::EmptyField("options"));
                }
                if let Some(n) = options.iter().position(|o| o.trim().is_empty()) {
                    return Err(ValidationError::InvalidValue {
                        field: "options",
                        message: format!("option {} is empty", n + 1),
                    });
                }
                let index = correct_index.ok_or(ValidationError::EmptyField("correct_index"))?;
                let correct_answer =
                    options
                        .get(index)
                        .cloned()
                        .ok_or_else(|| ValidationError::InvalidValue {
                            field: "correct_index",
                            message: format!("no option at index {index}"),
                        })?;
                Ok(QuizQuestion {
                    kind: QuestionKind::MultipleChoice,
                    question,
                    options,
                    correct_answer,
                })
            }
            ManualQuestion::Descriptive { question, answer } => Ok(QuizQuestion {
                kind: QuestionKind::Descriptive,
                question: non_blank(question, "question")?,
                options: Vec::new(),
                correct_answer: non_blank(answer, "answer")?,
            }),
        }
    }
}

/// A hand-written quiz before an id and author are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub related_video_id: Option<u64>,
    pub questions: Vec<ManualQuestion>,
}

impl QuizDraft {
    /// Validate every question and build the quiz.
    pub fn into_quiz(self, id: i64, author: &User) -> Result<Quiz, ValidationError> {
        let title = non_blank(self.title, "title")?;
        if self.questions.is_empty() {
            return Err(ValidationError::EmptyField("questions"));
        }
        let questions = self
            .questions
            .into_iter()
            .map(ManualQuestion::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Quiz {
            id,
            title,
            related_video_id: self.related_video_id,
            questions,
            author_name: author.name.clone(),
            class_name: author.class_name.clone(),
        })
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parameters for a generated quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub total_questions: u32,
    pub descriptive_count: u32,
}

impl QuizRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::EmptyField("topic"));
        }
        if self.total_questions == 0 {
            return Err(ValidationError::InvalidValue {
                field: "total_questions",
                message: "must be at least 1".into(),
            });
        }
        if self.descriptive_count > self.total_questions {
            return Err(ValidationError::InvalidValue {
                field: "descriptive_count",
                message: format!(
                    "{} descriptive questions requested out of {}",
                    self.descriptive_count, self.total_questions
                ),
            });
        }
        Ok(())
    }

    pub fn multiple_choice_count(&self) -> u32 {
        self.total_questions.saturating_sub(self.descriptive_count)
    }

    fn prompt(&self) -> String {
        format!(
            "Write a quiz about \"{}\" for junior high school students with {} questions in total: \
             {} descriptive questions and {} four-choice multiple-choice questions. \
             Reply in JSON. Each question has type ('multiple-choice' or 'descriptive'), \
             question, options (an empty array for descriptive questions) and correctAnswer.",
            self.topic.trim(),
            self.total_questions,
            self.descriptive_count,
            self.multiple_choice_count()
        )
    }
}

/// External quiz generator.
pub trait QuizGenerator {
    fn generate(
        &self,
        request: &QuizRequest,
    ) -> impl Future<Output = Result<Vec<QuizQuestion>, QuizError>> + Send;
}

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Question shape returned by the model.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    #[serde(rename = "type")]
    kind: QuestionKind,
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
}

#[derive(Deserialize)]
struct GeneratedQuiz {
    questions: Vec<GeneratedQuestion>,
}

/// [`QuizGenerator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiQuizGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiQuizGenerator {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
        }
    }

    /// Read the key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();
        Self::new(key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(request: &QuizRequest) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": request.prompt() }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "questions": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "type": { "type": "STRING" },
                                    "question": { "type": "STRING" },
                                    "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                                    "correctAnswer": { "type": "STRING" }
                                },
                                "required": ["type", "question", "options", "correctAnswer"]
                            }
                        }
                    },
                    "required": ["questions"]
                }
            }
        })
    }

    /// Pull the question list out of a `generateContent` response.
    fn parse_response(body: &serde_json::Value) -> Result<Vec<QuizQuestion>, QuizError> {
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| QuizError::MalformedResponse("no candidate text".into()))?;
        let quiz: GeneratedQuiz = serde_json::from_str(text.trim())
            .map_err(|e| QuizError::MalformedResponse(e.to_string()))?;
        Ok(quiz
            .questions
            .into_iter()
            .map(|q| QuizQuestion {
                kind: q.kind,
                question: q.question,
                options: q.options,
                correct_answer: q.correct_answer,
            })
            .collect())
    }
}

impl QuizGenerator for GeminiQuizGenerator {
    async fn generate(&self, request: &QuizRequest) -> Result<Vec<QuizQuestion>, QuizError> {
        let api_key = self.api_key.as_deref().ok_or(QuizError::NotConfigured)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QuizError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let questions = Self::parse_response(&body)?;
        tracing::debug!(count = questions.len(), topic = %request.topic, "quiz generated");
        Ok(questions)
    }
}
