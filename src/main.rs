mod chat;
mod config;
mod quiz;

use std::sync::Arc;

use chat::{ai_helper::LegalHelper, ChatMessage, LegalAssistant, SAMPLE_QUESTIONS};
use config::Config;
use dotenv::dotenv;
use quiz::{view, Quiz, QuizError, QuizQuestion, QuizState};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
};

type LegalDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Everything one chat accumulates while talking to the bot.
#[derive(Clone, Default, Debug, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub chat_history: Vec<ChatMessage>,
    /// Created the first time the quiz is opened.
    pub quiz_state: Option<QuizState>,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Menu {
        session: Session,
    },
    Chatting {
        session: Session,
    },
    Quiz {
        session: Session,
    },
}

#[tokio::main]
async fn main() -> HandlerResult {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting legal assistant bot...");

    let config = Config::from_env()?;

    let assistant = match &config.chatgpt_api_key {
        Some(key) => match LegalHelper::new(key, config.chatgpt_timeout) {
            Ok(helper) => LegalAssistant::new(Some(helper)),
            Err(e) => {
                log::warn!("Unable to set up ChatGPT, answering from canned topics: {e}");
                LegalAssistant::offline()
            }
        },
        None => {
            log::info!("CHATGPT_API_KEY is not set, answering from canned topics");
            LegalAssistant::offline()
        }
    };
    let assistant = Arc::new(assistant);

    log::info!("Loading quiz questions from {}", config.data_dir.display());
    let questions: Arc<Vec<QuizQuestion>> = Arc::new(quiz::loader::load_questions(&config.data_dir));
    if questions.is_empty() {
        log::warn!("No quiz questions available, the quiz will be disabled");
    }

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Menu { session }].endpoint(receive_mode_choice))
            .branch(dptree::case![State::Chatting { session }].endpoint(chat))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz_step)),
    )
    .dependencies(dptree::deps![InMemStorage::<State>::new(), assistant, questions])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const CHATBOT_MODE: &str = "⚖️ Legal Chatbot";
const QUIZ_MODE: &str = "📚 Legal Quiz";
const BACK_TO_MENU: &str = "⬅️ Back to menu";
const CLEAR_CHAT: &str = "🗑️ Clear Chat";

const GREETING_TEXT: &str = "Hi! I can explain legal concepts, processes and documents, or test your legal knowledge with a quiz.";
const CHAT_INTRO_TEXT: &str = "💬 Ask questions about legal concepts, processes, or documents, or tap one of the sample questions below.\n\n⚠️ This chatbot provides general information only and not legal advice.";
const WELCOME_TEXT: &str = "👋 Welcome to Legal Assistant! Ask me any legal question to get started.";
const NO_QUESTIONS_TEXT: &str = "No quiz questions available.";

fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(CHATBOT_MODE),
        KeyboardButton::new(QUIZ_MODE),
    ]])
}

fn chat_keyboard() -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = SAMPLE_QUESTIONS
        .chunks(2)
        .map(|pair| pair.iter().map(|q| KeyboardButton::new(*q)).collect())
        .collect();
    rows.push(vec![
        KeyboardButton::new(CLEAR_CHAT),
        KeyboardButton::new(BACK_TO_MENU),
    ]);
    KeyboardMarkup::new(rows)
}

/// Option buttons are offered only while the displayed question is unanswered.
fn quiz_keyboard(question: &QuizQuestion, answered: bool) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = Vec::new();
    if !answered {
        rows.extend(
            question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| vec![KeyboardButton::new(view::option_label(i, option))]),
        );
    }
    rows.push(vec![
        KeyboardButton::new(view::PREVIOUS_QUESTION),
        KeyboardButton::new(view::NEXT_QUESTION),
    ]);
    rows.push(vec![
        KeyboardButton::new(view::RESET_QUIZ),
        KeyboardButton::new(BACK_TO_MENU),
    ]);
    KeyboardMarkup::new(rows)
}

async fn start(bot: Bot, dialogue: LegalDialogue, msg: Message) -> HandlerResult {
    show_menu(&bot, &dialogue, &msg, Session::default(), GREETING_TEXT).await
}

async fn show_menu(
    bot: &Bot,
    dialogue: &LegalDialogue,
    msg: &Message,
    session: Session,
    text: &str,
) -> HandlerResult {
    bot.send_message(msg.chat.id, text)
        .reply_markup(menu_keyboard())
        .await?;
    dialogue.update(State::Menu { session }).await?;
    Ok(())
}

async fn receive_mode_choice(
    bot: Bot,
    dialogue: LegalDialogue,
    session: Session,
    questions: Arc<Vec<QuizQuestion>>,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(CHATBOT_MODE) => {
            let greeting = if session.chat_history.is_empty() {
                format!("{CHAT_INTRO_TEXT}\n\n{WELCOME_TEXT}")
            } else {
                format!(
                    "{CHAT_INTRO_TEXT}\n\nContinuing your conversation ({} messages so far).",
                    session.chat_history.len()
                )
            };
            bot.send_message(msg.chat.id, greeting)
                .reply_markup(chat_keyboard())
                .await?;
            dialogue.update(State::Chatting { session }).await?;
        }
        Some(QUIZ_MODE) => {
            if questions.is_empty() {
                return show_menu(&bot, &dialogue, &msg, session, NO_QUESTIONS_TEXT).await;
            }
            send_quiz(bot, dialogue, session, &questions, &msg, None).await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .reply_markup(menu_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn chat(
    bot: Bot,
    dialogue: LegalDialogue,
    mut session: Session,
    assistant: Arc<LegalAssistant>,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please type your question as text")
            .await?;
        return Ok(());
    };

    let reply = match text {
        BACK_TO_MENU => {
            return show_menu(&bot, &dialogue, &msg, session, "What would you like to do next?").await;
        }
        CLEAR_CHAT => {
            session.chat_history.clear();
            WELCOME_TEXT.to_string()
        }
        query if query.trim().is_empty() => {
            bot.send_message(msg.chat.id, "Type your legal question here...")
                .await?;
            return Ok(());
        }
        query => {
            session.chat_history.push(ChatMessage::user(query));

            // The typing indicator is cosmetic, a failure here is not worth reporting
            let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;

            let reply = assistant.chat_query(query, &session.chat_history).await;
            session.chat_history.push(ChatMessage::assistant(&reply));
            reply
        }
    };

    // Record the exchange before sending, so a failed delivery keeps the history
    dialogue.update(State::Chatting { session }).await?;

    let parts = split_message(&reply, TELEGRAM_MESSAGE_LIMIT);
    let last = parts.len() - 1;
    for (i, part) in parts.into_iter().enumerate() {
        let request = bot.send_message(msg.chat.id, part);
        if i == last {
            request.reply_markup(chat_keyboard()).await?;
        } else {
            request.await?;
        }
    }
    Ok(())
}

/// Maximum length of a single Telegram text message, in characters.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Cuts `text` into pieces of at most `limit` characters, never splitting a char.
/// Always yields at least one piece.
fn split_message(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(limit.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

async fn quiz_step(
    bot: Bot,
    dialogue: LegalDialogue,
    session: Session,
    questions: Arc<Vec<QuizQuestion>>,
    msg: Message,
) -> HandlerResult {
    let text = msg.text().unwrap_or_default();
    if text == BACK_TO_MENU {
        return show_menu(&bot, &dialogue, &msg, session, "What would you like to do next?").await;
    }
    send_quiz(bot, dialogue, session, &questions, &msg, Some(text.to_string())).await
}

/// Applies the pressed quiz button (if any) and replies with the displayed question.
async fn send_quiz(
    bot: Bot,
    dialogue: LegalDialogue,
    mut session: Session,
    questions: &[QuizQuestion],
    msg: &Message,
    action: Option<String>,
) -> HandlerResult {
    let quiz = match Quiz::new(questions) {
        Ok(quiz) => quiz,
        Err(_) => return show_menu(&bot, &dialogue, msg, session, NO_QUESTIONS_TEXT).await,
    };

    let (reply, keyboard) = {
        let state = session
            .quiz_state
            .get_or_insert_with(|| QuizState::new(quiz.len()));

        let feedback: Option<String> = match action.as_deref() {
            None => None,
            Some(view::PREVIOUS_QUESTION) => {
                quiz.previous(state);
                None
            }
            Some(view::NEXT_QUESTION) => {
                quiz.next(state);
                None
            }
            Some(view::RESET_QUIZ) => {
                quiz.reset(state);
                Some("🔄 The quiz has been reset.".to_string())
            }
            Some(other) => match view::parse_option(other) {
                Some(option) => match quiz.select_option(state, option) {
                    Ok(outcome) if outcome.correct => Some("✅ Correct!".to_string()),
                    Ok(outcome) => Some(format!(
                        "❌ Incorrect. The correct answer is {}.",
                        view::option_letter(outcome.correct_answer)
                    )),
                    Err(QuizError::AlreadyAnswered(_)) => {
                        Some("You have already answered this question.".to_string())
                    }
                    Err(e) => {
                        log::debug!("Rejected quiz answer {other:?}: {e}");
                        Some("Please pick one of the options.".to_string())
                    }
                },
                None => Some("Please pick one of the options.".to_string()),
            },
        };

        let body = view::render_question(&quiz, state);
        let reply = match feedback {
            Some(feedback) => format!("{feedback}\n\n{body}"),
            None => body,
        };
        let (idx, question) = quiz.current(state);
        (reply, quiz_keyboard(question, state.is_answered(idx)))
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button_texts(keyboard: &KeyboardMarkup) -> Vec<String> {
        keyboard
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.clone())
            .collect()
    }

    #[test]
    fn chat_keyboard_offers_samples_and_controls() {
        let texts = button_texts(&chat_keyboard());
        for question in SAMPLE_QUESTIONS {
            assert!(texts.iter().any(|t| t == question));
        }
        assert!(texts.iter().any(|t| t == CLEAR_CHAT));
        assert!(texts.iter().any(|t| t == BACK_TO_MENU));
    }

    #[test]
    fn answered_question_hides_option_buttons() {
        let questions = quiz::loader::default_questions();

        let open = button_texts(&quiz_keyboard(&questions[0], false));
        assert!(open.iter().any(|t| t == "A. 16 years"));

        let answered = button_texts(&quiz_keyboard(&questions[0], true));
        assert!(answered.iter().all(|t| view::parse_option(t).is_none()));
        assert!(answered.iter().any(|t| t == view::NEXT_QUESTION));
    }

    #[test]
    fn short_reply_is_sent_whole() {
        assert_eq!(split_message("What is an NDA?", 4096), vec!["What is an NDA?"]);
        assert_eq!(split_message("", 4096), vec![""]);
    }

    #[test]
    fn long_reply_is_split_at_the_limit() {
        let reply = "a".repeat(5000);
        let parts = split_message(&reply, TELEGRAM_MESSAGE_LIMIT);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 4096);
        assert_eq!(parts[1].chars().count(), 904);
        assert_eq!(parts.concat(), reply);
    }

    #[test]
    fn split_keeps_multibyte_chars_whole() {
        let reply = "₹".repeat(10);
        let parts = split_message(&reply, 4);
        assert_eq!(parts, vec!["₹₹₹₹", "₹₹₹₹", "₹₹"]);
    }

    #[test]
    fn session_starts_empty() {
        let session = Session::default();
        assert!(session.chat_history.is_empty());
        assert!(session.quiz_state.is_none());
    }
}
