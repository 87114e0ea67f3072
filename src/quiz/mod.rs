pub mod distractor;
pub mod session;

use crate::vocab::{AudioKey, Gender, Language, VocabEntry};
use std::time::Duration;
use thiserror::Error;

pub use distractor::{build_choices, select_distractors, Choice, Discriminator};
pub use session::{QuestionState, QuizSession, SessionResult, SessionState, Submission};

pub const IMAGE_QUIZ_DISTRACTORS: usize = 2;
pub const TEXT_QUIZ_DISTRACTORS: usize = 3;
pub const IMAGE_QUIZ_ADVANCE_DELAY: Duration = Duration::from_millis(2000);
pub const TEXT_QUIZ_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz is finished")]
    NotInProgress,

    #[error("this question has already been answered")]
    AlreadyAnswered,

    #[error("choice {choice} is out of range (only {len} choices)")]
    ChoiceOutOfRange { choice: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    EnToJa,
    JaToEn,
}

impl Direction {
    pub fn source(self) -> Language {
        match self {
            Direction::EnToJa => Language::English,
            Direction::JaToEn => Language::Japanese,
        }
    }

    pub fn target(self) -> Language {
        self.source().other()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    /// Pick the picture matching an English sentence.
    Image,
    /// Pick the translation of a word.
    Text { direction: Direction, hint: bool },
}

impl QuizKind {
    pub fn title(&self) -> &'static str {
        match self {
            QuizKind::Image => "Image Quiz / 画像クイズ",
            QuizKind::Text {
                direction: Direction::EnToJa,
                ..
            } => "English → Japanese / 英→日",
            QuizKind::Text {
                direction: Direction::JaToEn,
                ..
            } => "Japanese → English / 日→英",
        }
    }

    pub fn distractor_count(&self) -> usize {
        match self {
            QuizKind::Image => IMAGE_QUIZ_DISTRACTORS,
            QuizKind::Text { .. } => TEXT_QUIZ_DISTRACTORS,
        }
    }

    pub fn advance_delay(&self) -> Duration {
        match self {
            QuizKind::Image => IMAGE_QUIZ_ADVANCE_DELAY,
            QuizKind::Text { .. } => TEXT_QUIZ_ADVANCE_DELAY,
        }
    }

    pub fn discriminator(&self) -> Discriminator {
        match self {
            QuizKind::Image => Discriminator::ImagePath,
            QuizKind::Text { direction, .. } => Discriminator::Word(direction.target()),
        }
    }

    /// Word slot the prompt (and its audio) is taken from.
    pub fn prompt_slot(&self) -> u8 {
        match self {
            QuizKind::Image => 3,
            QuizKind::Text { .. } => 1,
        }
    }

    pub fn prompt<'a>(&self, entry: &'a VocabEntry) -> &'a str {
        match self {
            QuizKind::Image if !entry.word_3_en.trim().is_empty() => &entry.word_3_en,
            QuizKind::Image => &entry.word_1_en,
            QuizKind::Text { direction, .. } => entry.word(1, direction.source()),
        }
    }

    /// Text revealed under the prompt once the question is answered.
    pub fn reveal<'a>(&self, entry: &'a VocabEntry) -> &'a str {
        match self {
            QuizKind::Image if !entry.word_3_ja.trim().is_empty() => &entry.word_3_ja,
            QuizKind::Image => &entry.word_1_ja,
            QuizKind::Text { direction, .. } => entry.word(1, direction.target()),
        }
    }

    pub fn prompt_audio(&self) -> AudioKey {
        AudioKey::new(Language::English, Gender::Male, self.prompt_slot())
    }

    /// Whether the text quiz shows the entry's picture next to the prompt.
    pub fn shows_prompt_image(&self, answered: bool) -> bool {
        match self {
            QuizKind::Image => false,
            QuizKind::Text { direction, hint } => {
                *direction == Direction::JaToEn || *hint || answered
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn is_correct(self) -> bool {
        self == Feedback::Correct
    }
}
