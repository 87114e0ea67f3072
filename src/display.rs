use crate::logger;
use crate::media::MediaResolver;
use crate::schedule::{Scheduled, Timer};
use crate::vocab::{AudioKey, Gender, Language, VocabEntry, Vocabulary};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const MIN_PLAYBACK_RATE: f32 = 0.5;
pub const MAX_PLAYBACK_RATE: f32 = 2.0;
pub const PLAYBACK_RATE_STEP: f32 = 0.25;
pub const MAX_NEXT_WORD_DELAY: Duration = Duration::from_secs(10);
pub const NEXT_WORD_DELAY_STEP: Duration = Duration::from_millis(500);

/// One step of the learn-mode playback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioItem {
    pub key: AudioKey,
    pub show_english: bool,
    pub show_japanese: bool,
}

impl AudioItem {
    pub fn new(key: AudioKey) -> Self {
        Self {
            key,
            show_english: key.language == Language::English,
            show_japanese: key.language == Language::Japanese,
        }
    }
}

pub fn default_sequence() -> Vec<AudioItem> {
    vec![
        AudioItem::new(AudioKey::new(Language::English, Gender::Male, 1)),
        AudioItem::new(AudioKey::new(Language::Japanese, Gender::Male, 1)),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayField {
    Pronunciation,
    Description,
    WordClass,
    Structure,
    Alt,
}

impl DisplayField {
    pub const ALL: [DisplayField; 5] = [
        DisplayField::Pronunciation,
        DisplayField::Description,
        DisplayField::WordClass,
        DisplayField::Structure,
        DisplayField::Alt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayField::Pronunciation => "Pronunciation / 発音",
            DisplayField::Description => "Description / 説明",
            DisplayField::WordClass => "Word class / 品詞",
            DisplayField::Structure => "Structure / 構造",
            DisplayField::Alt => "Alternatives / 類義語",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub pronunciation: bool,
    pub description: bool,
    pub word_class: bool,
    pub structure: bool,
    pub alt: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            pronunciation: true,
            description: true,
            word_class: true,
            structure: true,
            alt: true,
        }
    }
}

impl DisplayOptions {
    pub fn is_shown(&self, field: DisplayField) -> bool {
        match field {
            DisplayField::Pronunciation => self.pronunciation,
            DisplayField::Description => self.description,
            DisplayField::WordClass => self.word_class,
            DisplayField::Structure => self.structure,
            DisplayField::Alt => self.alt,
        }
    }

    pub fn toggle(&mut self, field: DisplayField) {
        let flag = match field {
            DisplayField::Pronunciation => &mut self.pronunciation,
            DisplayField::Description => &mut self.description,
            DisplayField::WordClass => &mut self.word_class,
            DisplayField::Structure => &mut self.structure,
            DisplayField::Alt => &mut self.alt,
        };
        *flag = !*flag;
    }
}

/// Identifies one playback request; a new cue means "play again".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCue {
    pub word: usize,
    pub item: usize,
    pub generation: u64,
}

/// Learn mode: walks every entry, playing the configured audio sequence and
/// moving on by itself when each recording ends.
#[derive(Debug)]
pub struct DisplaySession {
    vocabulary: Vocabulary,
    word_index: usize,
    audio_index: usize,
    playing: bool,
    playback_rate: f32,
    next_word_delay: Duration,
    sequence: Vec<AudioItem>,
    options: DisplayOptions,
    timer: Timer,
}

impl DisplaySession {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            word_index: 0,
            audio_index: 0,
            playing: false,
            playback_rate: 1.0,
            next_word_delay: Duration::from_secs(1),
            sequence: default_sequence(),
            options: DisplayOptions::default(),
            timer: Timer::new(),
        }
    }

    pub fn current_entry(&self) -> Option<&VocabEntry> {
        self.vocabulary.get(self.word_index)
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn word_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn audio_index(&self) -> usize {
        self.audio_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    pub fn next_word_delay(&self) -> Duration {
        self.next_word_delay
    }

    pub fn sequence(&self) -> &[AudioItem] {
        &self.sequence
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.options
    }

    pub fn pending_step(&self) -> Option<Scheduled> {
        self.timer.pending()
    }

    fn current_item(&self) -> Option<&AudioItem> {
        self.sequence.get(self.audio_index)
    }

    /// Word slot of the recording being played; slot 1 when nothing is.
    pub fn current_slot(&self) -> u8 {
        self.current_item().map(|item| item.key.slot).unwrap_or(1)
    }

    pub fn show_english(&self) -> bool {
        let slot = self.current_slot();
        self.sequence.iter().any(|item| {
            item.key.slot == slot && item.key.language == Language::English && item.show_english
        })
    }

    pub fn show_japanese(&self) -> bool {
        let slot = self.current_slot();
        self.sequence.iter().any(|item| {
            item.key.slot == slot && item.key.language == Language::Japanese && item.show_japanese
        })
    }

    fn jump_to(&mut self, index: usize) {
        self.word_index = index;
        self.audio_index = 0;
        self.timer.bump();
    }

    pub fn next_word(&mut self) {
        let len = self.vocabulary.len();
        if len == 0 {
            return;
        }
        self.jump_to((self.word_index + 1) % len);
    }

    pub fn prev_word(&mut self) {
        let len = self.vocabulary.len();
        if len == 0 {
            return;
        }
        self.jump_to((self.word_index + len - 1) % len);
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        // Pausing drops a pending step; resuming replays the current item.
        self.timer.bump();
    }

    pub fn cue(&self) -> Option<PlaybackCue> {
        if self.playing && self.current_entry().is_some() && self.current_item().is_some() {
            Some(PlaybackCue {
                word: self.word_index,
                item: self.audio_index,
                generation: self.timer.generation(),
            })
        } else {
            None
        }
    }

    /// Dataset path of the current recording; `None` (with a warning) when the
    /// entry has none.
    pub fn audio_key_path(&self) -> Option<&str> {
        let item = self.current_item()?;
        let entry = self.current_entry()?;
        let path = entry.audio_path(item.key);
        if path.is_none() {
            logger::warn(&format!(
                "Audio file not found for key: {} ({})",
                item.key, entry.word_1_en
            ));
        }
        path
    }

    pub fn audio_source(&self, resolver: &MediaResolver) -> Option<PathBuf> {
        self.audio_key_path().and_then(|raw| resolver.resolve(raw))
    }

    pub fn on_audio_ended(&mut self, now: Instant) -> Option<Scheduled> {
        if !self.playing {
            return None;
        }
        Some(self.timer.schedule(now, self.next_word_delay))
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.take_due(now) {
            return false;
        }
        if self.audio_index + 1 < self.sequence.len() {
            self.audio_index += 1;
            self.timer.bump();
        } else {
            let len = self.vocabulary.len().max(1);
            self.jump_to((self.word_index + 1) % len);
        }
        self.playing = true;
        true
    }

    pub fn faster(&mut self) {
        self.playback_rate = (self.playback_rate + PLAYBACK_RATE_STEP).min(MAX_PLAYBACK_RATE);
    }

    pub fn slower(&mut self) {
        self.playback_rate = (self.playback_rate - PLAYBACK_RATE_STEP).max(MIN_PLAYBACK_RATE);
    }

    pub fn longer_delay(&mut self) {
        self.next_word_delay = (self.next_word_delay + NEXT_WORD_DELAY_STEP).min(MAX_NEXT_WORD_DELAY);
    }

    pub fn shorter_delay(&mut self) {
        self.next_word_delay = self.next_word_delay.saturating_sub(NEXT_WORD_DELAY_STEP);
    }

    pub fn contains(&self, key: AudioKey) -> bool {
        self.sequence.iter().any(|item| item.key == key)
    }

    /// Adds `key` to the end of the sequence, or removes it if present.
    pub fn toggle_item(&mut self, key: AudioKey) {
        if let Some(position) = self.sequence.iter().position(|item| item.key == key) {
            self.sequence.remove(position);
        } else {
            self.sequence.push(AudioItem::new(key));
        }
        self.audio_index = 0;
        self.timer.bump();
    }

    pub fn sequence_summary(&self) -> String {
        if self.sequence.is_empty() {
            return "none / なし".to_string();
        }
        self.sequence
            .iter()
            .map(|item| item.key.as_key())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::tests::entry;

    fn three_words() -> Vocabulary {
        let mut words = vec![
            entry("apple", "りんご", "noun", true),
            entry("dog", "犬", "noun", false),
            entry("run", "走る", "verb", true),
        ];
        words[0].extra.insert(
            "ENG_male_1".to_string(),
            serde_json::Value::String("public\\audio\\apple_en.mp3".to_string()),
        );
        Vocabulary::new(words)
    }

    #[test]
    fn test_defaults() {
        let session = DisplaySession::new(three_words());
        assert!(!session.is_playing());
        assert_eq!(session.playback_rate(), 1.0);
        assert_eq!(session.next_word_delay(), Duration::from_secs(1));
        assert_eq!(session.sequence_summary(), "ENG_male_1 → JPN_male_1");
        assert!(session.show_english());
        assert!(session.show_japanese());
        assert_eq!(session.cue(), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut session = DisplaySession::new(three_words());
        session.prev_word();
        assert_eq!(session.word_index(), 2);
        session.next_word();
        assert_eq!(session.word_index(), 0);
        session.next_word();
        assert_eq!(session.current_entry().unwrap().word_1_en, "dog");
    }

    #[test]
    fn test_ended_steps_through_sequence_then_next_word() {
        let mut session = DisplaySession::new(three_words());
        let start = Instant::now();
        session.toggle_play();
        let first = session.cue().unwrap();

        session.on_audio_ended(start);
        assert!(!session.tick(start + Duration::from_millis(999)));
        assert!(session.tick(start + Duration::from_secs(1)));
        assert_eq!(session.word_index(), 0);
        assert_eq!(session.audio_index(), 1);
        let second = session.cue().unwrap();
        assert_ne!(first, second);

        session.on_audio_ended(start + Duration::from_secs(2));
        assert!(session.tick(start + Duration::from_secs(3)));
        assert_eq!(session.word_index(), 1);
        assert_eq!(session.audio_index(), 0);
        assert!(session.is_playing());
    }

    #[test]
    fn test_ended_while_paused_does_nothing() {
        let mut session = DisplaySession::new(three_words());
        assert!(session.on_audio_ended(Instant::now()).is_none());
        assert!(!session.tick(Instant::now() + Duration::from_secs(5)));
    }

    #[test]
    fn test_manual_navigation_cancels_pending_step() {
        let mut session = DisplaySession::new(three_words());
        let start = Instant::now();
        session.toggle_play();
        session.on_audio_ended(start);
        session.next_word();

        assert!(session.pending_step().is_none());
        assert!(!session.tick(start + Duration::from_secs(5)));
        assert_eq!(session.word_index(), 1);
    }

    #[test]
    fn test_pause_cancels_pending_step() {
        let mut session = DisplaySession::new(three_words());
        let start = Instant::now();
        session.toggle_play();
        session.on_audio_ended(start);
        session.toggle_play();
        assert!(!session.tick(start + Duration::from_secs(5)));
        assert_eq!(session.audio_index(), 0);
    }

    #[test]
    fn test_audio_key_path_and_missing_media() {
        let mut session = DisplaySession::new(three_words());
        assert_eq!(session.audio_key_path(), Some("public\\audio\\apple_en.mp3"));

        session.next_word();
        assert_eq!(session.audio_key_path(), None);

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(session.audio_source(&MediaResolver::new(dir.path())), None);
    }

    #[test]
    fn test_sequence_editing() {
        let mut session = DisplaySession::new(three_words());
        let en_male = AudioKey::new(Language::English, Gender::Male, 1);
        let ja_female_3 = AudioKey::new(Language::Japanese, Gender::Female, 3);

        session.toggle_item(en_male);
        assert_eq!(session.sequence_summary(), "JPN_male_1");
        assert!(!session.show_english());
        assert!(session.show_japanese());

        session.toggle_item(ja_female_3);
        assert!(session.contains(ja_female_3));
        assert_eq!(session.sequence_summary(), "JPN_male_1 → JPN_female_3");

        session.toggle_item(AudioKey::new(Language::Japanese, Gender::Male, 1));
        session.toggle_item(ja_female_3);
        assert_eq!(session.sequence_summary(), "none / なし");
        assert_eq!(session.current_slot(), 1);

        session.toggle_play();
        assert_eq!(session.cue(), None);
    }

    #[test]
    fn test_slot_follows_current_item() {
        let mut session = DisplaySession::new(three_words());
        session.toggle_item(AudioKey::new(Language::English, Gender::Female, 3));
        session.toggle_play();
        let start = Instant::now();

        session.on_audio_ended(start);
        session.tick(start + Duration::from_secs(1));
        session.on_audio_ended(start + Duration::from_secs(1));
        session.tick(start + Duration::from_secs(2));

        assert_eq!(session.audio_index(), 2);
        assert_eq!(session.current_slot(), 3);
        assert!(session.show_english());
        assert!(!session.show_japanese());
    }

    #[test]
    fn test_rate_and_delay_are_clamped() {
        let mut session = DisplaySession::new(three_words());
        for _ in 0..30 {
            session.faster();
            session.longer_delay();
        }
        assert_eq!(session.playback_rate(), MAX_PLAYBACK_RATE);
        assert_eq!(session.next_word_delay(), MAX_NEXT_WORD_DELAY);

        for _ in 0..40 {
            session.slower();
            session.shorter_delay();
        }
        assert_eq!(session.playback_rate(), MIN_PLAYBACK_RATE);
        assert_eq!(session.next_word_delay(), Duration::ZERO);
    }

    #[test]
    fn test_display_option_toggle() {
        let mut options = DisplayOptions::default();
        options.toggle(DisplayField::Description);
        assert!(!options.is_shown(DisplayField::Description));
        assert!(options.is_shown(DisplayField::Alt));
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut session = DisplaySession::new(Vocabulary::new(Vec::new()));
        session.next_word();
        session.prev_word();
        session.toggle_play();
        assert!(session.current_entry().is_none());
        assert_eq!(session.cue(), None);
    }
}
