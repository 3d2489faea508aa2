use std::io::Cursor;

use async_trait::async_trait;
use prepmate_lib::{
    Difficulty, Feedback, GenerateFeedback, InterviewSession, Question, QuestionBank,
    ResponseInput, SessionState, TurnOutcome,
};

/// Stands in for the remote model so the flow runs without a network.
struct CannedFeedback(Feedback);

#[async_trait]
impl GenerateFeedback for CannedFeedback {
    async fn generate(&self, _question: &Question, _response: &str) -> Feedback {
        self.0.clone()
    }
}

#[tokio::test]
async fn easy_session_records_one_turn_per_response() {
    let mut session = InterviewSession::new(
        QuestionBank::default_catalog(),
        Some(Difficulty::Easy),
        CannedFeedback(Feedback::Generated("Lead with impact.".to_string())),
    );

    let question = session.next_question().unwrap();
    assert_eq!(question.text, "Tell me about yourself.");

    let input = ResponseInput::read_from(Cursor::new("I am a software engineer.\n\n")).unwrap();
    let outcome = session.complete_turn(&question, input).await;

    assert!(matches!(outcome, TurnOutcome::Recorded(_)));
    assert_eq!(session.record().len(), 1);
    assert_eq!(session.record()[0].user_response, "I am a software engineer.");
    assert_eq!(session.record()[0].feedback, "Lead with impact.");
    assert_eq!(session.state(), SessionState::AwaitingQuestion);

    // A second turn keeps appending rather than overwriting.
    let question = session.next_question().unwrap();
    let outcome = session
        .complete_turn(&question, ResponseInput::Text("Another answer.".to_string()))
        .await;
    assert!(matches!(outcome, TurnOutcome::Recorded(_)));
    assert_eq!(session.record().len(), 2);
}

#[tokio::test]
async fn exit_on_first_line_terminates_with_empty_record() {
    let mut session = InterviewSession::new(
        QuestionBank::default_catalog(),
        Some(Difficulty::Medium),
        CannedFeedback(Feedback::Generated("unused".to_string())),
    );

    let question = session.next_question().unwrap();
    let input = ResponseInput::read_from(Cursor::new("exit\n")).unwrap();
    let outcome = session.complete_turn(&question, input).await;

    assert_eq!(outcome, TurnOutcome::Terminated);
    assert_eq!(session.state(), SessionState::Terminated);
    assert!(session.record().is_empty());
}

#[tokio::test]
async fn catalog_templates_are_not_mutated_by_turns() {
    let bank = QuestionBank::default_catalog();
    let mut session = InterviewSession::new(
        bank,
        Some(Difficulty::Easy),
        CannedFeedback(Feedback::Generated("fine".to_string())),
    );

    let question = session.next_question().unwrap();
    session
        .complete_turn(&question, ResponseInput::Text("first answer".to_string()))
        .await;

    // Re-selecting yields the pristine template, not the answered turn.
    let again = session.next_question().unwrap();
    assert_eq!(again, question);
    assert_eq!(session.record()[0].user_response, "first answer");
}
