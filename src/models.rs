use crate::quiz::{Direction, QuizKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Learn,
    Quiz,
    QuizQuitConfirm,
    Summary,
}

/// Entries of the home menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    Learn,
    TextQuiz(Direction),
    ImageQuiz,
}

impl HomeItem {
    pub const ALL: [HomeItem; 4] = [
        HomeItem::Learn,
        HomeItem::TextQuiz(Direction::EnToJa),
        HomeItem::TextQuiz(Direction::JaToEn),
        HomeItem::ImageQuiz,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeItem::Learn => "Learn words / 単語を覚える",
            HomeItem::TextQuiz(Direction::EnToJa) => "Word quiz: English → Japanese / 英→日クイズ",
            HomeItem::TextQuiz(Direction::JaToEn) => "Word quiz: Japanese → English / 日→英クイズ",
            HomeItem::ImageQuiz => "Picture quiz / 画像クイズ",
        }
    }

    pub fn quiz_kind(self, hint: bool) -> Option<QuizKind> {
        match self {
            HomeItem::Learn => None,
            HomeItem::TextQuiz(direction) => Some(QuizKind::Text { direction, hint }),
            HomeItem::ImageQuiz => Some(QuizKind::Image),
        }
    }
}

/// Popups that can cover the learn screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOverlay {
    None,
    Settings,
    AudioSequence,
}

/// Rows of the learn settings popup, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    PlaybackRate,
    NextWordDelay,
    Field(crate::display::DisplayField),
}

impl SettingsRow {
    pub fn all() -> Vec<SettingsRow> {
        let mut rows = vec![SettingsRow::PlaybackRate, SettingsRow::NextWordDelay];
        rows.extend(
            crate::display::DisplayField::ALL
                .iter()
                .map(|field| SettingsRow::Field(*field)),
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_items_map_to_quiz_kinds() {
        assert_eq!(HomeItem::Learn.quiz_kind(true), None);
        assert_eq!(HomeItem::ImageQuiz.quiz_kind(true), Some(QuizKind::Image));
        assert_eq!(
            HomeItem::TextQuiz(Direction::JaToEn).quiz_kind(true),
            Some(QuizKind::Text {
                direction: Direction::JaToEn,
                hint: true
            })
        );
    }

    #[test]
    fn test_settings_rows() {
        let rows = SettingsRow::all();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], SettingsRow::PlaybackRate);
    }
}
