use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoachError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Permissive parse: anything outside the known set means
    /// "no filter", so callers get the full catalog instead of an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Menu mapping: choices 1/2/3 pick easy/medium/hard, anything
    /// else falls back to medium.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => Difficulty::Easy,
            "2" => Difficulty::Medium,
            "3" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Behavioral,
    Technical,
    Situational,
}

/// An immutable catalog entry. Responses and feedback never land on the
/// question itself; they go into a fresh `SessionTurn` so the catalog
/// stays a clean template across sessions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub category: Category,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(text: &str, category: Category, difficulty: Difficulty) -> Self {
        Self {
            text: text.to_string(),
            category,
            difficulty,
        }
    }
}

pub struct QuestionBank {
    catalog: Vec<Question>,
}

impl QuestionBank {
    pub fn new(catalog: Vec<Question>) -> Self {
        Self { catalog }
    }

    /// The built-in practice set.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Question::new(
                "Tell me about yourself.",
                Category::Behavioral,
                Difficulty::Easy,
            ),
            Question::new(
                "What are your greatest strengths?",
                Category::Behavioral,
                Difficulty::Medium,
            ),
            Question::new(
                "Where do you see yourself in 5 years?",
                Category::Behavioral,
                Difficulty::Medium,
            ),
            Question::new(
                "Describe a challenging situation at work and how you handled it.",
                Category::Behavioral,
                Difficulty::Hard,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Picks the next question, uniformly at random over the entries
    /// matching `difficulty` (or the whole catalog when unfiltered).
    ///
    /// An empty filtered set is a catalog misconfiguration and fails
    /// with `NoQuestionsAvailable` rather than handing back a question
    /// of the wrong difficulty.
    pub fn select_next(&self, difficulty: Option<Difficulty>) -> Result<Question, CoachError> {
        let eligible: Vec<&Question> = self
            .catalog
            .iter()
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .collect();

        if eligible.is_empty() {
            return Err(CoachError::NoQuestionsAvailable { difficulty });
        }

        // Explicit uniform index pick; gen_range is well defined on any
        // non-empty range, unlike a generic choose-from-sequence helper.
        let index = rand::thread_rng().gen_range(0..eligible.len());
        let question = eligible[index].clone();
        info!(
            "🎯 Selected {} question: {}",
            question.difficulty.as_str(),
            question.text.chars().take(50).collect::<String>()
        );
        Ok(question)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::default_catalog()
    }
}
