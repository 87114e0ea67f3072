use crate::display::{DisplayField, DisplaySession};
use crate::media::{ImageView, MediaResolver};
use crate::models::{LearnOverlay, SettingsRow};
use crate::ui::layout::{calculate_learn_chunks, centered_rect};
use crate::ui::media::draw_image_panel;
use crate::utils::{key_hint, pad_to_width};
use crate::vocab::{AudioKey, Language, VocabEntry};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: usize = 34;

fn field_value(entry: &VocabEntry, field: DisplayField) -> Option<String> {
    let value = match field {
        DisplayField::Pronunciation => entry.pronunciation.as_deref(),
        DisplayField::Description => entry.description.as_deref(),
        DisplayField::WordClass => Some(entry.word_class.as_str()),
        DisplayField::Structure => entry.word_structure.as_deref(),
        DisplayField::Alt => entry.word_alt.as_deref(),
    }?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The word card for the current entry, honoring the sequence and options.
pub fn word_card(session: &DisplaySession) -> Text<'static> {
    let Some(entry) = session.current_entry() else {
        return Text::from("No words loaded / 単語がありません");
    };
    let slot = session.current_slot();
    let mut text = Text::default();

    if session.show_english() {
        text.push_line(Line::from(Span::styled(
            entry.word(slot, Language::English).to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if session.show_japanese() {
        text.push_line(Line::from(Span::styled(
            entry.word(slot, Language::Japanese).to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    text.push_line(Line::from(""));

    for field in DisplayField::ALL {
        if !session.options().is_shown(field) {
            continue;
        }
        if let Some(value) = field_value(entry, field) {
            text.push_line(Line::from(vec![
                Span::styled(
                    format!("{}: ", field.label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::from(value),
            ]));
        }
    }
    text
}

pub fn draw_learn(
    f: &mut Frame,
    session: &DisplaySession,
    overlay: LearnOverlay,
    overlay_cursor: usize,
    resolver: &MediaResolver,
) {
    let layout = calculate_learn_chunks(f.area());

    let header = Paragraph::new(format!(
        "Learn / 単語を覚える - Word {} / {}",
        (session.word_index() + 1).min(session.word_count()),
        session.word_count()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let card = Paragraph::new(word_card(session))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Word / 単語"));
    f.render_widget(card, layout.word_area);

    let view = session
        .current_entry()
        .map(|entry| ImageView::for_path(resolver, &entry.img_url))
        .unwrap_or(ImageView::Blank);
    draw_image_panel(
        f,
        layout.image_area,
        &view,
        "Image / 画像",
        Style::default().fg(Color::DarkGray),
        true,
    );

    let (state_label, state_color) = if session.is_playing() {
        ("▶ Playing", Color::Green)
    } else {
        ("⏸ Paused", Color::Yellow)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            state_label,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(
            "  Rate {:.2}x  Delay {:.1}s  Sequence: {}",
            session.playback_rate(),
            session.next_word_delay().as_secs_f32(),
            session.sequence_summary()
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let mut spans = key_hint("←/→", "Word");
    spans.extend(key_hint("Space", "Play/Pause"));
    spans.extend(key_hint("s", "Settings"));
    spans.extend(key_hint("a", "Audio"));
    spans.extend(key_hint("Esc", "Home"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);

    match overlay {
        LearnOverlay::None => {}
        LearnOverlay::Settings => draw_settings_popup(f, session, overlay_cursor),
        LearnOverlay::AudioSequence => draw_sequence_popup(f, session, overlay_cursor),
    }
}

fn settings_row_label(session: &DisplaySession, row: SettingsRow) -> String {
    match row {
        SettingsRow::PlaybackRate => format!(
            "{}◀ {:.2}x ▶",
            pad_to_width("Playback rate / 再生速度", LABEL_WIDTH),
            session.playback_rate()
        ),
        SettingsRow::NextWordDelay => format!(
            "{}◀ {:.1}s ▶",
            pad_to_width("Next word delay / 次の単語まで", LABEL_WIDTH),
            session.next_word_delay().as_secs_f32()
        ),
        SettingsRow::Field(field) => {
            let mark = if session.options().is_shown(field) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{} {}", mark, field.label())
        }
    }
}

fn popup_list(items: Vec<String>, cursor: usize, title: &str) -> List<'static> {
    let items: Vec<ListItem> = items
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title.to_string()),
    )
}

fn draw_settings_popup(f: &mut Frame, session: &DisplaySession, cursor: usize) {
    let area = centered_rect(70, 60, f.area());
    let labels = SettingsRow::all()
        .into_iter()
        .map(|row| settings_row_label(session, row))
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        popup_list(labels, cursor, " Settings / 設定  (←/→ adjust, Enter toggle, Esc close) "),
        area,
    );
}

fn draw_sequence_popup(f: &mut Frame, session: &DisplaySession, cursor: usize) {
    let area = centered_rect(70, 70, f.area());
    let labels = AudioKey::all()
        .into_iter()
        .map(|key| {
            let mark = if session.contains(key) { "[x]" } else { "[ ]" };
            format!(
                "{} {} {} {}",
                mark,
                key.language.label(),
                key.gender.label(),
                key.slot
            )
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        popup_list(labels, cursor, " Audio sequence / 音声  (Enter toggle, Esc close) "),
        area,
    );
}
