use crate::media::ImageView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draws a picture slot. The terminal cannot show the picture itself, so the
/// panel names the file and marks missing media. File names spell out the
/// word, so quizzes pass `show_name = false` until the question is answered.
pub fn draw_image_panel(
    f: &mut Frame,
    area: Rect,
    view: &ImageView,
    title: &str,
    border_style: Style,
    show_name: bool,
) {
    let mut text = Text::default();
    match view {
        ImageView::Available(_) | ImageView::Missing(_) if !show_name => {
            let label = if matches!(view, ImageView::Available(_)) {
                "Picture / 画像"
            } else {
                "Image not found / 画像なし"
            };
            text.push_line(Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        ImageView::Available(url) => {
            text.push_line(Line::from(Span::styled(
                format!("[{}]", view.file_name().unwrap_or(url)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(Span::styled(
                url.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        ImageView::Missing(url) => {
            text.push_line(Line::from(Span::styled(
                "Image not found / 画像なし",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )));
            text.push_line(Line::from(Span::styled(
                url.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        ImageView::Blank => {}
    }

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
    f.render_widget(panel, area);
}
