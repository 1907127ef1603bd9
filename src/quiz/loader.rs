use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::quiz::{QuizQuestion, OPTION_COUNT};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to access quiz file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed quiz file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question {index} has correct_answer {answer}, expected a value from 0 to 3")]
    InvalidAnswer { index: usize, answer: usize },
}

/// Location of the quiz document below the data directory.
pub fn quiz_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("training").join("legal_quiz.json")
}

/// Loads the quiz questions stored under `data_dir`.
///
/// A missing file is replaced by the built-in question set, which is also
/// written out for later loads. A file that cannot be read or parsed yields
/// an empty list.
pub fn load_questions(data_dir: &Path) -> Vec<QuizQuestion> {
    let path = quiz_file_path(data_dir);

    if !path.exists() {
        let questions = default_questions();
        match save_questions(&path, &questions) {
            Ok(()) => log::info!("Wrote default quiz to {}", path.display()),
            Err(e) => log::error!("Error saving default quiz data: {e}"),
        }
        return questions;
    }

    match read_questions(&path) {
        Ok(questions) => {
            log::info!("Loaded {} quiz questions from {}", questions.len(), path.display());
            questions
        }
        Err(e) => {
            log::error!("Error loading quiz data: {e}");
            Vec::new()
        }
    }
}

fn read_questions(path: &Path) -> Result<Vec<QuizQuestion>, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let questions: Vec<QuizQuestion> = serde_json::from_reader(reader)?;

    if let Some((index, q)) = questions
        .iter()
        .enumerate()
        .find(|(_, q)| q.correct_answer >= OPTION_COUNT)
    {
        return Err(LoadError::InvalidAnswer {
            index,
            answer: q.correct_answer,
        });
    }

    Ok(questions)
}

fn save_questions(path: &Path, questions: &[QuizQuestion]) -> Result<(), LoadError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(questions)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            "Under Indian Contract Act, what is the minimum age for entering into a valid contract?",
            ["16 years", "18 years", "21 years", "No minimum age"],
            1,
            "According to the Indian Contract Act, a person must be at least 18 years old to enter into a valid contract. Contracts made by minors (under 18) are typically void.",
        ),
        QuizQuestion::new(
            "Which of the following is NOT an essential element of a valid contract?",
            [
                "Offer and acceptance",
                "Free consent",
                "Written documentation",
                "Lawful consideration",
            ],
            2,
            "Written documentation is NOT an essential element of a valid contract in India. Verbal contracts can be valid as long as they contain other essential elements like offer, acceptance, free consent, lawful consideration, and lawful object.",
        ),
        QuizQuestion::new(
            "Under the Right to Information Act, within how many days must a public authority provide information?",
            ["10 days", "30 days", "45 days", "60 days"],
            1,
            "Under the Right to Information Act, 2005, a public authority is required to provide information within 30 days of receiving the request. In cases involving life or liberty, information must be provided within 48 hours.",
        ),
        QuizQuestion::new(
            "What is the limitation period for filing a suit for recovery of movable property under the Limitation Act?",
            ["1 year", "3 years", "7 years", "12 years"],
            1,
            "Under the Limitation Act, 1963, the limitation period for filing a suit for recovery of movable property is 3 years from the date when the right to sue accrues.",
        ),
        QuizQuestion::new(
            "Which of the following is a valid ground for divorce under the Hindu Marriage Act?",
            [
                "Different political opinions",
                "Conversion to another religion",
                "Financial disagreements",
                "Different food preferences",
            ],
            1,
            "Conversion to another religion is a valid ground for divorce under the Hindu Marriage Act, 1955. Other grounds include adultery, cruelty, desertion, mental disorder, communicable disease, renunciation, and presumption of death.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_synthesized_and_reloaded() {
        let dir = tempdir().unwrap();
        let path = quiz_file_path(dir.path());
        assert!(!path.exists());

        let first = load_questions(dir.path());
        assert_eq!(first.len(), 5);
        assert!(path.is_file());

        let second = load_questions(dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn written_file_uses_expected_keys() {
        let dir = tempdir().unwrap();
        load_questions(dir.path());

        let raw = fs::read_to_string(quiz_file_path(dir.path())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        assert_eq!(first["correct_answer"], 1);
        assert_eq!(first["options"].as_array().unwrap().len(), 4);
        assert!(first["question"].is_string());
        assert!(first["explanation"].is_string());
    }

    #[test]
    fn custom_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = quiz_file_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"[{"question": "Q?", "options": ["a", "b", "c", "d"], "correct_answer": 3, "explanation": "d."}]"#,
        )
        .unwrap();

        let questions = load_questions(dir.path());
        assert_eq!(
            questions,
            vec![QuizQuestion::new("Q?", ["a", "b", "c", "d"], 3, "d.")]
        );
    }

    #[test]
    fn malformed_file_yields_no_questions() {
        let dir = tempdir().unwrap();
        let path = quiz_file_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(load_questions(dir.path()).is_empty());
        // the broken file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn wrong_option_count_is_malformed() {
        let dir = tempdir().unwrap();
        let path = quiz_file_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"[{"question": "Q?", "options": ["a", "b"], "correct_answer": 0, "explanation": ""}]"#,
        )
        .unwrap();

        assert!(matches!(read_questions(&path), Err(LoadError::Parse(_))));
        assert!(load_questions(dir.path()).is_empty());
    }

    #[test]
    fn out_of_range_answer_is_malformed() {
        let dir = tempdir().unwrap();
        let path = quiz_file_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"[{"question": "Q?", "options": ["a", "b", "c", "d"], "correct_answer": 4, "explanation": ""}]"#,
        )
        .unwrap();

        assert!(matches!(
            read_questions(&path),
            Err(LoadError::InvalidAnswer { index: 0, answer: 4 })
        ));
        assert!(load_questions(dir.path()).is_empty());
    }
}
