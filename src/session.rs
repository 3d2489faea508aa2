use std::io::BufRead;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoachError;
use crate::feedback::{Feedback, GenerateFeedback};
use crate::questions::{Difficulty, Question, QuestionBank};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingQuestion,
    AwaitingResponse,
    Analyzing,
    Recorded,
    Terminated,
}

/// Free-text input for one turn, as collected by the IO layer.
///
/// The `exit` sentinel wins over anything already typed for the turn:
/// partially entered lines are discarded, never recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseInput {
    Text(String),
    Exit,
}

impl ResponseInput {
    /// Collects lines until a blank line ends the response. A line that
    /// is `exit` in any casing aborts the turn immediately. An already
    /// exhausted input source (closed stdin, end of a piped script)
    /// counts as the sentinel too, so the loop cannot spin on empty
    /// responses it will never stop receiving.
    pub fn read_from(reader: impl BufRead) -> std::io::Result<Self> {
        let mut lines: Vec<String> = Vec::new();
        let mut saw_input = false;
        for line in reader.lines() {
            let line = line?;
            saw_input = true;
            if line.eq_ignore_ascii_case("exit") {
                return Ok(ResponseInput::Exit);
            }
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        if !saw_input {
            return Ok(ResponseInput::Exit);
        }
        Ok(ResponseInput::Text(lines.join("\n")))
    }
}

/// One completed turn. The question is a copy of the catalog template;
/// the template itself is never written to.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionTurn {
    pub question: Question,
    pub user_response: String,
    pub feedback: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Recorded(Feedback),
    Terminated,
}

/// Drives one practice session: pulls questions from the bank, hands
/// responses to the feedback generator, and accumulates the record.
/// Difficulty is fixed once at construction and never re-prompted.
pub struct InterviewSession<G> {
    session_id: Uuid,
    bank: QuestionBank,
    difficulty: Option<Difficulty>,
    generator: G,
    record: Vec<SessionTurn>,
    state: SessionState,
}

impl<G: GenerateFeedback> InterviewSession<G> {
    pub fn new(bank: QuestionBank, difficulty: Option<Difficulty>, generator: G) -> Self {
        let session_id = Uuid::new_v4();
        info!(
            "🎬 Starting practice session {} (difficulty: {})",
            session_id,
            difficulty.map_or("any", |d| d.as_str())
        );
        Self {
            session_id,
            bank,
            difficulty,
            generator,
            record: Vec::new(),
            state: SessionState::AwaitingQuestion,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Terminated
    }

    pub fn record(&self) -> &[SessionTurn] {
        &self.record
    }

    /// Selects the next question for this turn. `NoQuestionsAvailable`
    /// is fatal to session setup and surfaces to the caller.
    pub fn next_question(&mut self) -> Result<Question, CoachError> {
        let question = self.bank.select_next(self.difficulty)?;
        self.state = SessionState::AwaitingResponse;
        Ok(question)
    }

    /// Runs the analyze-and-record half of a turn. On the exit sentinel
    /// the session terminates with nothing appended for this turn.
    pub async fn complete_turn(&mut self, question: &Question, input: ResponseInput) -> TurnOutcome {
        match input {
            ResponseInput::Exit => {
                self.state = SessionState::Terminated;
                info!(
                    "Session {} terminated after {} completed turns",
                    self.session_id,
                    self.record.len()
                );
                TurnOutcome::Terminated
            }
            ResponseInput::Text(response) => {
                self.state = SessionState::Analyzing;
                let feedback = self.generator.generate(question, &response).await;
                self.save_response(question.clone(), response, feedback.text());
                self.state = SessionState::AwaitingQuestion;
                TurnOutcome::Recorded(feedback)
            }
        }
    }

    /// Appends a turn with the given strings exactly as passed.
    pub fn save_response(&mut self, question: Question, response: String, feedback: String) {
        self.record.push(SessionTurn {
            question,
            user_response: response,
            feedback,
            recorded_at: Utc::now(),
        });
        self.state = SessionState::Recorded;
    }
}
