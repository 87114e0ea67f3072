use crate::audio::AudioPlayer;
use crate::display::{DisplaySession, PlaybackCue};
use crate::logger;
use crate::media::MediaResolver;
use crate::models::{AppState, HomeItem, LearnOverlay};
use crate::quiz::{QuizKind, QuizSession};
use crate::schedule::Scheduled;
use crate::vocab::Vocabulary;
use std::time::{Duration, Instant};

/// Upper bound on how long the event loop sleeps without input.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct App {
    pub state: AppState,
    pub vocabulary: Vocabulary,
    pub resolver: MediaResolver,
    pub player: AudioPlayer,
    pub home_index: usize,
    pub hint: bool,
    pub quiz: Option<QuizSession>,
    pub quiz_cursor: usize,
    pub learn: Option<DisplaySession>,
    pub learn_overlay: LearnOverlay,
    pub overlay_cursor: usize,
    pub should_quit: bool,
    last_quiz_cue: Option<u64>,
    last_learn_cue: Option<PlaybackCue>,
}

impl App {
    pub fn new(vocabulary: Vocabulary, resolver: MediaResolver, player: AudioPlayer) -> Self {
        Self {
            state: AppState::Home,
            vocabulary,
            resolver,
            player,
            home_index: 0,
            hint: false,
            quiz: None,
            quiz_cursor: 0,
            learn: None,
            learn_overlay: LearnOverlay::None,
            overlay_cursor: 0,
            should_quit: false,
            last_quiz_cue: None,
            last_learn_cue: None,
        }
    }

    pub fn selected_home_item(&self) -> HomeItem {
        HomeItem::ALL[self.home_index.min(HomeItem::ALL.len() - 1)]
    }

    pub fn open_selected(&mut self) {
        let item = self.selected_home_item();
        match item.quiz_kind(self.hint) {
            Some(kind) => self.start_quiz(kind),
            None => self.start_learn(),
        }
    }

    pub fn start_quiz(&mut self, kind: QuizKind) {
        let session = QuizSession::start(self.vocabulary.clone(), kind);
        self.state = if session.is_finished() {
            AppState::Summary
        } else {
            AppState::Quiz
        };
        self.quiz = Some(session);
        self.quiz_cursor = 0;
        self.last_quiz_cue = None;
    }

    pub fn start_learn(&mut self) {
        logger::log(&format!("Opening learn mode with {} words", self.vocabulary.len()));
        self.learn = Some(DisplaySession::new(self.vocabulary.clone()));
        self.learn_overlay = LearnOverlay::None;
        self.overlay_cursor = 0;
        self.last_learn_cue = None;
        self.state = AppState::Learn;
    }

    /// Tears down whatever session is open and returns to the menu.
    pub fn go_home(&mut self) {
        self.quiz = None;
        self.learn = None;
        self.learn_overlay = LearnOverlay::None;
        self.last_quiz_cue = None;
        self.last_learn_cue = None;
        self.player.stop();
        self.state = AppState::Home;
    }

    pub fn restart_quiz(&mut self) {
        if let Some(session) = &mut self.quiz {
            session.restart();
            self.quiz_cursor = 0;
            self.state = if session.is_finished() {
                AppState::Summary
            } else {
                AppState::Quiz
            };
        }
    }

    pub fn answer(&mut self, choice: usize, now: Instant) {
        let Some(session) = &mut self.quiz else {
            return;
        };
        match session.answer(choice, now) {
            Ok(feedback) => {
                self.quiz_cursor = choice;
                logger::log(&format!(
                    "Question {:?} answered: {:?}",
                    session.question_number(),
                    feedback
                ));
            }
            Err(e) => logger::warn(&format!("Answer ignored: {}", e)),
        }
    }

    /// The screen to fall back to once a popup over the quiz closes.
    pub fn quiz_screen(&self) -> AppState {
        match &self.quiz {
            Some(session) if !session.is_finished() => AppState::Quiz,
            Some(_) => AppState::Summary,
            None => AppState::Home,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(session) = &mut self.quiz
            && session.tick(now)
        {
            self.quiz_cursor = 0;
            if session.is_finished() && self.state == AppState::Quiz {
                self.state = AppState::Summary;
            }
        }
        if let Some(session) = &mut self.learn {
            session.tick(now);
        }
    }

    /// The scheduled transition the loop must wake up for next.
    pub fn next_scheduled(&self) -> Option<Scheduled> {
        let quiz = self.quiz.as_ref().and_then(|session| session.pending_advance());
        let learn = self.learn.as_ref().and_then(|session| session.pending_step());
        match (quiz, learn) {
            (Some(a), Some(b)) => Some(if a.due <= b.due { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_scheduled().map(|scheduled| scheduled.due)
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.next_scheduled()
            .map(|scheduled| scheduled.remaining(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL)
    }

    /// Starts or stops playback so that the audio matches what is on screen.
    pub fn sync_audio(&mut self, now: Instant) {
        let ended = self.player.poll_ended();

        if let Some(session) = &mut self.learn {
            let cue = session.cue();
            // An ended playback only counts for the cue that started it.
            if ended && cue.is_some() && cue == self.last_learn_cue {
                session.on_audio_ended(now);
            }
            if cue != self.last_learn_cue {
                match cue {
                    Some(_) => {
                        let source = session.audio_source(&self.resolver);
                        self.player.play(source, session.playback_rate());
                    }
                    None => self.player.stop(),
                }
                self.last_learn_cue = cue;
            }
        }

        if let Some(session) = &self.quiz {
            let cue = session
                .question()
                .filter(|question| !question.is_answered())
                .map(|_| session.generation());
            if cue != self.last_quiz_cue {
                match (cue, session.current_entry()) {
                    (Some(_), Some(entry)) => {
                        let kind = session.kind();
                        let source = match entry.audio_path(kind.prompt_audio()) {
                            Some(raw) => self.resolver.resolve(raw),
                            None => {
                                logger::warn(&format!(
                                    "Audio file not found for key: {} ({})",
                                    kind.prompt_audio(),
                                    entry.word_1_en
                                ));
                                None
                            }
                        };
                        self.player.play(source, 1.0);
                    }
                    _ => self.player.stop(),
                }
                self.last_quiz_cue = cue;
            }
        }
    }
}
