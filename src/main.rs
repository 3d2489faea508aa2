use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::info;

use prepmate_lib::{
    CoachConfig, Difficulty, FeedbackGenerator, InterviewSession, QuestionBank, ResponseInput,
    TurnOutcome,
};

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

fn print_header() {
    println!("{}", "=".repeat(50));
    println!("       AI Interview Coach - Practice Session       ");
    println!("{}", "=".repeat(50));
    println!();
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Difficulty menu: 1/2/3 map to easy/medium/hard, anything else
/// falls back to medium.
fn prompt_difficulty() -> Result<Difficulty> {
    println!("\nChoose difficulty level:");
    println!("1. Easy");
    println!("2. Medium");
    println!("3. Hard");
    print!("\nEnter your choice (1-3): ");
    io::stdout().flush()?;

    let choice = read_line()?;
    Ok(Difficulty::from_menu_choice(&choice))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    clear_screen();
    print_header();

    let config = CoachConfig::from_env();
    let generator = FeedbackGenerator::new(&config);
    let bank = QuestionBank::default_catalog();
    info!("Loaded {} practice questions", bank.len());

    println!("Welcome to your AI Interview Practice Session!");
    let difficulty = prompt_difficulty()?;

    let mut session = InterviewSession::new(bank, Some(difficulty), generator);

    while session.is_active() {
        clear_screen();
        print_header();

        let question = session.next_question()?;
        println!("\nQuestion: {}\n", question.text);

        println!("\nYour response (type 'exit' to end session):");
        let input = ResponseInput::read_from(io::stdin().lock())?;

        if input == ResponseInput::Exit {
            session.complete_turn(&question, input).await;
            continue;
        }

        println!("\nAnalyzing your response...");
        if let TurnOutcome::Recorded(feedback) = session.complete_turn(&question, input).await {
            println!("\nFeedback:");
            println!("{}", "-".repeat(50));
            println!("{}", feedback.text());
            println!("{}", "-".repeat(50));
        }

        print!("\nPress Enter to continue...");
        io::stdout().flush()?;
        read_line()?;
    }

    info!(
        "Session {} finished with {} recorded turns",
        session.session_id(),
        session.record().len()
    );

    println!("\nThank you for using AI Interview Coach!");
    println!("Keep practicing and good luck with your interviews!");
    Ok(())
}
