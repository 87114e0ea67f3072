use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const BUNDLED_DATASET: &str = include_str!("../data/vocab.json");

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index} is missing its {field} word")]
    MissingWord { index: usize, field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Japanese,
}

impl Language {
    pub fn other(self) -> Self {
        match self {
            Language::English => Language::Japanese,
            Language::Japanese => Language::English,
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            Language::English => "ENG",
            Language::Japanese => "JPN",
        }
    }

    /// Both-language label used on screen.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English / 英語",
            Language::Japanese => "Japanese / 日本語",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn key_part(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male / 男性",
            Gender::Female => "female / 女性",
        }
    }
}

/// Word slots present in the dataset: 1 = word, 2 = phrase, 3 = example sentence.
pub const WORD_SLOTS: [u8; 3] = [1, 2, 3];

/// Identifies one audio recording of an entry, e.g. `ENG_male_1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioKey {
    pub language: Language,
    pub gender: Gender,
    pub slot: u8,
}

impl AudioKey {
    pub fn new(language: Language, gender: Gender, slot: u8) -> Self {
        Self {
            language,
            gender,
            slot,
        }
    }

    pub fn as_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.language.key_prefix(),
            self.gender.key_part(),
            self.slot
        )
    }

    /// Every key the dataset format allows, in a stable order.
    pub fn all() -> Vec<AudioKey> {
        let mut keys = Vec::new();
        for language in [Language::English, Language::Japanese] {
            for gender in [Gender::Male, Gender::Female] {
                for slot in WORD_SLOTS {
                    keys.push(AudioKey::new(language, gender, slot));
                }
            }
        }
        keys
    }
}

impl fmt::Display for AudioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabEntry {
    pub word_1_en: String,
    pub word_1_ja: String,
    #[serde(default)]
    pub word_2_en: String,
    #[serde(default)]
    pub word_2_ja: String,
    #[serde(default)]
    pub word_3_en: String,
    #[serde(default)]
    pub word_3_ja: String,
    #[serde(default)]
    pub word_class: String,
    #[serde(rename = "img_URL", default)]
    pub img_url: String,
    #[serde(rename = "remind_frag", default)]
    pub review: bool,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub word_structure: Option<String>,
    #[serde(default)]
    pub word_alt: Option<String>,
    /// Remaining keys; audio references live here under `ENG_male_1`-style names.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl VocabEntry {
    pub fn word(&self, slot: u8, language: Language) -> &str {
        match (slot, language) {
            (2, Language::English) => &self.word_2_en,
            (2, Language::Japanese) => &self.word_2_ja,
            (3, Language::English) => &self.word_3_en,
            (3, Language::Japanese) => &self.word_3_ja,
            (_, Language::English) => &self.word_1_en,
            (_, Language::Japanese) => &self.word_1_ja,
        }
    }

    /// Raw dataset path for a recording; `None` when absent or blank.
    pub fn audio_path(&self, key: AudioKey) -> Option<&str> {
        self.extra
            .get(&key.as_key())
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

/// Shared, immutable view of the loaded dataset. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Arc<[VocabEntry]>,
}

impl Vocabulary {
    pub fn new(entries: Vec<VocabEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let entries: Vec<VocabEntry> = serde_json::from_str(json)?;
        validate(&entries)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&VocabEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate(entries: &[VocabEntry]) -> Result<(), DatasetError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.word_1_en.trim().is_empty() {
            return Err(DatasetError::MissingWord {
                index,
                field: "word_1_en",
            });
        }
        if entry.word_1_ja.trim().is_empty() {
            return Err(DatasetError::MissingWord {
                index,
                field: "word_1_ja",
            });
        }
    }
    Ok(())
}

/// The dataset compiled into the binary.
pub fn load() -> Vocabulary {
    match Vocabulary::from_json(BUNDLED_DATASET) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            // Guarded by `test_bundled_dataset_is_valid`.
            crate::logger::warn(&format!("Bundled dataset rejected: {}", e));
            Vocabulary::new(Vec::new())
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Vocabulary, DatasetError> {
    let content = fs::read_to_string(path)?;
    Vocabulary::from_json(&content)
}

/// Indices of review-flagged entries, in source order.
pub fn filter_for_review(all: &[VocabEntry]) -> Vec<usize> {
    all.iter()
        .enumerate()
        .filter(|(_, entry)| entry.review)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn entry(en: &str, ja: &str, class: &str, review: bool) -> VocabEntry {
        VocabEntry {
            word_1_en: en.to_string(),
            word_1_ja: ja.to_string(),
            word_2_en: String::new(),
            word_2_ja: String::new(),
            word_3_en: format!("This is {}.", en),
            word_3_ja: format!("これは{}です。", ja),
            word_class: class.to_string(),
            img_url: format!("public\\images\\{}.webp", en),
            review,
            pronunciation: None,
            description: None,
            word_structure: None,
            word_alt: None,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_bundled_dataset_is_valid() {
        let vocabulary = Vocabulary::from_json(BUNDLED_DATASET).unwrap();
        assert!(!vocabulary.is_empty());
        assert!(!filter_for_review(vocabulary.entries()).is_empty());
    }

    #[test]
    fn test_parse_entry_with_audio_keys() {
        let json = r#"[{
            "word_1_en": "apple",
            "word_1_ja": "りんご",
            "word_class": "noun",
            "img_URL": "public\\images\\apple.webp",
            "remind_frag": true,
            "ENG_male_1": "public\\audio\\apple_en_m.mp3",
            "JPN_female_1": ""
        }]"#;
        let vocabulary = Vocabulary::from_json(json).unwrap();
        let apple = vocabulary.get(0).unwrap();

        assert!(apple.review);
        assert_eq!(apple.img_url, "public\\images\\apple.webp");
        assert_eq!(
            apple.audio_path(AudioKey::new(Language::English, Gender::Male, 1)),
            Some("public\\audio\\apple_en_m.mp3")
        );
        assert_eq!(
            apple.audio_path(AudioKey::new(Language::Japanese, Gender::Female, 1)),
            None
        );
        assert_eq!(
            apple.audio_path(AudioKey::new(Language::English, Gender::Female, 3)),
            None
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"[{"word_1_en": "cat", "word_1_ja": "ねこ"}]"#;
        let vocabulary = Vocabulary::from_json(json).unwrap();
        let cat = vocabulary.get(0).unwrap();

        assert!(!cat.review);
        assert!(cat.img_url.is_empty());
        assert!(cat.word_3_en.is_empty());
        assert!(cat.pronunciation.is_none());
    }

    #[test]
    fn test_missing_word_is_rejected() {
        let json = r#"[{"word_1_en": "cat", "word_1_ja": "ねこ"}, {"word_1_en": "dog", "word_1_ja": " "}]"#;
        match Vocabulary::from_json(json) {
            Err(DatasetError::MissingWord { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "word_1_ja");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            Vocabulary::from_json("{ not json"),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"word_1_en": "dog", "word_1_ja": "いぬ", "remind_frag": true}}]"#
        )
        .unwrap();

        let vocabulary = load_from_path(file.path()).unwrap();
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary.get(0).unwrap().word_1_ja, "いぬ");
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn test_filter_for_review_preserves_order() {
        let entries = vec![
            entry("a", "あ", "noun", true),
            entry("b", "い", "noun", false),
            entry("c", "う", "noun", true),
            entry("d", "え", "noun", true),
        ];
        assert_eq!(filter_for_review(&entries), vec![0, 2, 3]);
    }

    #[test]
    fn test_filter_for_review_empty() {
        let entries = vec![entry("a", "あ", "noun", false)];
        assert!(filter_for_review(&entries).is_empty());
        assert!(filter_for_review(&[]).is_empty());
    }

    #[test]
    fn test_audio_key_format() {
        assert_eq!(
            AudioKey::new(Language::English, Gender::Male, 1).as_key(),
            "ENG_male_1"
        );
        assert_eq!(
            AudioKey::new(Language::Japanese, Gender::Female, 3).to_string(),
            "JPN_female_3"
        );
        assert_eq!(AudioKey::all().len(), 12);
    }

    #[test]
    fn test_word_by_slot() {
        let e = entry("run", "走る", "verb", true);
        assert_eq!(e.word(1, Language::English), "run");
        assert_eq!(e.word(3, Language::Japanese), "これは走るです。");
        assert_eq!(e.word(2, Language::English), "");
    }
}
