pub mod config;
pub mod emotion;
pub mod error;
pub mod feedback;
pub mod questions;
pub mod session;

pub use config::CoachConfig;
pub use emotion::{EmotionBackend, EmotionClassifier, EmotionDistribution, NativeEmotionScores};
pub use error::CoachError;
pub use feedback::{Feedback, FeedbackGenerator, GenerateFeedback};
pub use questions::{Category, Difficulty, Question, QuestionBank};
pub use session::{InterviewSession, ResponseInput, SessionState, SessionTurn, TurnOutcome};
