use teloxide::utils::html;

use crate::quiz::{Quiz, QuizState};

pub const PREVIOUS_QUESTION: &str = "Previous Question";
pub const NEXT_QUESTION: &str = "Next Question";
pub const RESET_QUIZ: &str = "Reset Quiz";

/// "A", "B", ... for option indices.
pub fn option_letter(i: usize) -> char {
    (b'A' + i as u8) as char
}

pub fn option_label(i: usize, option: &str) -> String {
    format!("{}. {}", option_letter(i), option)
}

/// Maps a pressed option button (or a bare letter) back to its index.
pub fn parse_option(text: &str) -> Option<usize> {
    let mut chars = text.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    match chars.next() {
        None | Some('.') => {}
        Some(_) => return None,
    }
    ('A'..='D').position(|c| c == letter)
}

/// Renders the displayed question, either as a prompt or as a reviewed answer.
pub fn render_question(quiz: &Quiz, state: &mut QuizState) -> String {
    let (idx, question) = quiz.current(state);
    let mut text = format!(
        "📊 Score: {} / {}\n\n{}\n{}\n\n",
        state.score,
        state.answered_count(),
        html::bold(&format!("Question {} of {}", idx + 1, quiz.len())),
        html::escape(&question.question),
    );

    if !state.is_answered(idx) {
        text.push_str(&html::bold("Select your answer:"));
        text.push('\n');
        for (i, option) in question.options.iter().enumerate() {
            text.push_str(&html::escape(&option_label(i, option)));
            text.push('\n');
        }
    } else {
        text.push_str(&html::bold("Your answer:"));
        text.push('\n');
        for (i, option) in question.options.iter().enumerate() {
            let label = html::escape(&option_label(i, option));
            let line = if i == question.correct_answer {
                format!("✅ {} (Correct Answer)", html::bold(&label))
            } else if Some(i) == state.last_answer {
                format!("❌ {label} (Your Answer)")
            } else {
                label
            };
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str(&format!(
            "\n💡 {}\n{}\n",
            html::bold("Explanation:"),
            html::escape(&question.explanation)
        ));
    }

    text.push_str(&format!(
        "\nProgress: {} / {} answered",
        state.answered_count(),
        quiz.len()
    ));
    text
}
