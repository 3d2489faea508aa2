use thiserror::Error;

use crate::questions::Difficulty;

/// Errors that are allowed to escape a component boundary.
///
/// Remote feedback failures and classifier failures never show up here:
/// both are absorbed where they happen and turned into degraded result
/// values (`Feedback::Degraded`, the zeroed `EmotionDistribution`), so
/// the session loop only ever has to deal with catalog misconfiguration.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("no questions available for difficulty {difficulty:?}")]
    NoQuestionsAvailable { difficulty: Option<Difficulty> },
}
