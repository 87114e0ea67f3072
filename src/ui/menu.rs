use crate::models::HomeItem;
use crate::utils::key_hint;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_home(f: &mut Frame, selected: usize, hint: bool, word_count: usize) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(format!("Vocab Quiz v0.1.0 ({} words)", word_count))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = HomeItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, item.label())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Mode / モード"),
    );
    f.render_widget(list, chunks[1]);

    let (hint_label, hint_color) = if hint {
        ("Hint images: ON / ヒント画像: オン", Color::Green)
    } else {
        ("Hint images: OFF / ヒント画像: オフ", Color::DarkGray)
    };
    let hint_status = Paragraph::new(hint_label)
        .style(Style::default().fg(hint_color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(hint_status, chunks[2]);

    let mut spans = key_hint("↑/↓", "Navigate");
    spans.extend(key_hint("Enter", "Select"));
    spans.extend(key_hint("h", "Toggle Hint"));
    spans.extend(key_hint("Esc/Ctrl+C", "Quit"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
