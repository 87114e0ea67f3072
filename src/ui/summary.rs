use crate::quiz::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{key_hint, truncate_string};
use crate::vocab::VocabEntry;
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const CELL_WIDTH: usize = 36;

fn result_cell(entry: Option<&VocabEntry>) -> String {
    entry
        .map(|entry| {
            truncate_string(
                &format!("{} / {}", entry.word_1_en, entry.word_1_ja),
                CELL_WIDTH,
            )
        })
        .unwrap_or_default()
}

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());
    let results = session.results();

    let title = Paragraph::new(format!(
        "これでクイズは終了です！ - {}",
        session.kind().title()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let counts = if session.pool_len() == 0 {
        Paragraph::new("No words are marked for review. / 復習する単語がありません。")
            .style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(format!(
            "Score: {} / {}",
            results.correct.len(),
            results.answered()
        ))
        .style(Style::default().add_modifier(Modifier::BOLD))
    };
    f.render_widget(
        counts
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout.counts_area,
    );

    let rows: Vec<Row> = results
        .rows()
        .into_iter()
        .map(|(correct, incorrect)| {
            Row::new(vec![
                Cell::from(result_cell(correct.and_then(|i| session.entry(i))))
                    .style(Style::default().fg(Color::Green)),
                Cell::from(result_cell(incorrect.and_then(|i| session.entry(i))))
                    .style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(format!("正解した単語（{}個）", results.correct.len())),
        Cell::from(format!("不正解の単語（{}個）", results.incorrect.len())),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let table = Table::new(
        rows,
        [Constraint::Percentage(50), Constraint::Percentage(50)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Results / 結果"));
    f.render_widget(table, layout.table_area);

    let mut spans = key_hint("r", "Restart");
    spans.extend(key_hint("Enter/m", "Home"));
    spans.extend(key_hint("Ctrl+C", "Exit App"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
