use super::distractor::{build_choices, select_distractors, Choice};
use super::{Feedback, QuizError, QuizKind};
use crate::logger;
use crate::schedule::{Scheduled, Timer};
use crate::vocab::{filter_for_review, VocabEntry, Vocabulary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub chosen: usize,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionState {
    /// Dataset index of the entry being asked.
    pub entry: usize,
    pub choices: Vec<Choice>,
    /// Position of the correct answer within `choices`.
    pub correct: usize,
    pub submission: Option<Submission>,
}

impl QuestionState {
    pub fn is_answered(&self) -> bool {
        self.submission.is_some()
    }

    pub fn correct_choice(&self) -> &Choice {
        &self.choices[self.correct]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    InProgress {
        index: usize,
        question: QuestionState,
    },
    Finished,
}

/// Entries answered so far, as dataset indices in answer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResult {
    pub correct: Vec<usize>,
    pub incorrect: Vec<usize>,
}

impl SessionResult {
    pub fn answered(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }

    pub fn clear(&mut self) {
        self.correct.clear();
        self.incorrect.clear();
    }

    /// Pairs the two lists side by side for the result table.
    pub fn rows(&self) -> Vec<(Option<usize>, Option<usize>)> {
        let len = self.correct.len().max(self.incorrect.len());
        (0..len)
            .map(|i| (self.correct.get(i).copied(), self.incorrect.get(i).copied()))
            .collect()
    }
}

#[derive(Debug)]
pub struct QuizSession {
    vocabulary: Vocabulary,
    kind: QuizKind,
    pool: Vec<usize>,
    state: SessionState,
    results: SessionResult,
    feedback: Option<Feedback>,
    timer: Timer,
    rng: StdRng,
}

impl QuizSession {
    pub fn start(vocabulary: Vocabulary, kind: QuizKind) -> Self {
        Self::with_rng(vocabulary, kind, StdRng::from_entropy())
    }

    pub fn with_seed(vocabulary: Vocabulary, kind: QuizKind, seed: u64) -> Self {
        Self::with_rng(vocabulary, kind, StdRng::seed_from_u64(seed))
    }

    fn with_rng(vocabulary: Vocabulary, kind: QuizKind, rng: StdRng) -> Self {
        let pool = filter_for_review(vocabulary.entries());
        let mut session = Self {
            vocabulary,
            kind,
            pool,
            state: SessionState::Finished,
            results: SessionResult::default(),
            feedback: None,
            timer: Timer::new(),
            rng,
        };
        logger::log(&format!(
            "Starting {:?} quiz with {} review words",
            session.kind,
            session.pool.len()
        ));
        session.begin();
        session
    }

    fn begin(&mut self) {
        self.timer.bump();
        self.results.clear();
        self.feedback = None;
        self.state = match self.fresh_question(0) {
            Some(question) => SessionState::InProgress { index: 0, question },
            None => {
                logger::warn("No words are flagged for review; quiz has no questions");
                SessionState::Finished
            }
        };
    }

    /// Builds the question for pool position `index`; `None` past the end.
    pub fn fresh_question(&mut self, index: usize) -> Option<QuestionState> {
        let entry = *self.pool.get(index)?;
        let entries = self.vocabulary.entries();
        let discriminator = self.kind.discriminator();
        let needed = self.kind.distractor_count();
        let everything: Vec<usize> = (0..entries.len()).collect();

        let distractors = match self.kind {
            QuizKind::Image => select_distractors(
                entries,
                &everything,
                entry,
                needed,
                discriminator,
                &mut self.rng,
            ),
            QuizKind::Text { .. } => {
                let class = &entries[entry].word_class;
                let same_class: Vec<usize> = everything
                    .iter()
                    .copied()
                    .filter(|&i| entries[i].word_class == *class)
                    .collect();
                let picked = select_distractors(
                    entries,
                    &same_class,
                    entry,
                    needed,
                    discriminator,
                    &mut self.rng,
                );
                if picked.len() < needed {
                    select_distractors(
                        entries,
                        &everything,
                        entry,
                        needed,
                        discriminator,
                        &mut self.rng,
                    )
                } else {
                    picked
                }
            }
        };

        if distractors.len() < needed {
            logger::warn(&format!(
                "Only {} of {} distractors available for \"{}\"",
                distractors.len(),
                needed,
                entries[entry].word_1_en
            ));
        }

        let (choices, correct) =
            build_choices(entries, entry, &distractors, discriminator, &mut self.rng);
        Some(QuestionState {
            entry,
            choices,
            correct,
            submission: None,
        })
    }

    /// Scores `choice` for the current question and schedules the move to the
    /// next one.
    pub fn answer(&mut self, choice: usize, now: Instant) -> Result<Feedback, QuizError> {
        let SessionState::InProgress { question, .. } = &mut self.state else {
            return Err(QuizError::NotInProgress);
        };
        if question.is_answered() {
            return Err(QuizError::AlreadyAnswered);
        }
        if choice >= question.choices.len() {
            return Err(QuizError::ChoiceOutOfRange {
                choice,
                len: question.choices.len(),
            });
        }

        let feedback = if choice == question.correct {
            self.results.correct.push(question.entry);
            Feedback::Correct
        } else {
            self.results.incorrect.push(question.entry);
            Feedback::Incorrect
        };
        question.submission = Some(Submission {
            chosen: choice,
            feedback,
        });
        self.feedback = Some(feedback);
        self.timer.schedule(now, self.kind.advance_delay());
        Ok(feedback)
    }

    pub fn advance(&mut self) {
        let SessionState::InProgress { index, .. } = self.state else {
            return;
        };
        self.timer.bump();
        self.feedback = None;

        let next = index + 1;
        if let Some(question) = self.fresh_question(next) {
            self.state = SessionState::InProgress {
                index: next,
                question,
            };
        } else {
            logger::log(&format!(
                "Quiz finished: {} correct, {} incorrect",
                self.results.correct.len(),
                self.results.incorrect.len()
            ));
            self.state = SessionState::Finished;
        }
    }

    /// Runs a scheduled advance if it still belongs to the question on screen.
    pub fn fire(&mut self, scheduled: Scheduled, now: Instant) -> bool {
        if self.timer.take(scheduled, now) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.pending() {
            Some(scheduled) => self.fire(scheduled, now),
            None => false,
        }
    }

    pub fn restart(&mut self) {
        logger::log("Restarting quiz");
        self.begin();
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn question(&self) -> Option<&QuestionState> {
        match &self.state {
            SessionState::InProgress { question, .. } => Some(question),
            SessionState::Finished => None,
        }
    }

    /// One-based number of the question on screen.
    pub fn question_number(&self) -> Option<usize> {
        match &self.state {
            SessionState::InProgress { index, .. } => Some(index + 1),
            SessionState::Finished => None,
        }
    }

    pub fn current_entry(&self) -> Option<&VocabEntry> {
        self.question()
            .and_then(|question| self.vocabulary.get(question.entry))
    }

    pub fn entry(&self, index: usize) -> Option<&VocabEntry> {
        self.vocabulary.get(index)
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn results(&self) -> &SessionResult {
        &self.results
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn pending_advance(&self) -> Option<Scheduled> {
        self.timer.pending()
    }

    /// Changes whenever a different question (or none) is on screen.
    pub fn generation(&self) -> u64 {
        self.timer.generation()
    }
}
