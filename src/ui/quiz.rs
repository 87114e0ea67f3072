use crate::media::{ImageView, MediaResolver};
use crate::quiz::{Feedback, QuestionState, QuizKind, QuizSession};
use crate::ui::layout::calculate_quiz_chunks;
use crate::ui::media::draw_image_panel;
use crate::utils::key_hint;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// How a choice is drawn given the cursor and the submission, if any.
pub fn choice_style(question: &QuestionState, index: usize, cursor: usize) -> Style {
    match question.submission {
        Some(_) if index == question.correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(submission) if index == submission.chosen => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
        Some(_) => Style::default().fg(Color::DarkGray),
        None if index == cursor => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    }
}

fn feedback_line(feedback: Option<Feedback>) -> Line<'static> {
    match feedback {
        Some(Feedback::Correct) => Line::from(Span::styled(
            "○ 正解！ Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Some(Feedback::Incorrect) => Line::from(Span::styled(
            "× 不正解… Incorrect",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    }
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, cursor: usize, resolver: &MediaResolver) {
    let (Some(question), Some(entry)) = (session.question(), session.current_entry()) else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());
    let kind = session.kind();

    let progress = format!(
        "{} - Question {} / {}",
        kind.title(),
        session.question_number().unwrap_or(0),
        session.pool_len()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let answered = question.is_answered();
    let mut prompt_text = Text::default();
    prompt_text.push_line(Line::from(Span::styled(
        kind.prompt(entry).to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    if answered {
        prompt_text.push_line(Line::from(Span::styled(
            kind.reveal(entry).to_string(),
            Style::default().fg(Color::Cyan),
        )));
    }
    prompt_text.push_line(Line::from(""));
    prompt_text.push_line(feedback_line(session.feedback()));

    match kind {
        QuizKind::Image => {
            let prompt = Paragraph::new(prompt_text)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Question"));
            f.render_widget(prompt, layout.prompt_area);
        }
        QuizKind::Text { .. } => {
            let parts = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(layout.prompt_area);
            let prompt = Paragraph::new(prompt_text)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Question"));
            f.render_widget(prompt, parts[0]);

            let view = if kind.shows_prompt_image(answered) {
                ImageView::for_path(resolver, &entry.img_url)
            } else {
                ImageView::Blank
            };
            draw_image_panel(
                f,
                parts[1],
                &view,
                "Hint / ヒント",
                Style::default().fg(Color::DarkGray),
                answered,
            );
        }
    }

    match kind {
        QuizKind::Image => draw_image_choices(f, layout.choices_area, question, cursor, resolver),
        QuizKind::Text { .. } => draw_text_choices(f, layout.choices_area, question, cursor),
    }

    let mut first = Vec::new();
    if !answered {
        first.extend(key_hint(&format!("1-{}", question.choices.len()), "Answer"));
        first.extend(key_hint("←/→", "Move"));
        first.extend(key_hint("Enter", "Choose"));
    }
    first.extend(key_hint("Esc", "Quit to Home"));
    let help_text = vec![
        Line::from(first),
        Line::from(key_hint("Ctrl+C", "Exit App")),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_text_choices(f: &mut Frame, area: Rect, question: &QuestionState, cursor: usize) {
    let lines: Vec<Line> = question
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let marker = if !question.is_answered() && i == cursor {
                ">"
            } else {
                " "
            };
            Line::from(Span::styled(
                format!("{} {}. {}", marker, i + 1, choice.label),
                choice_style(question, i, cursor),
            ))
        })
        .collect();

    let choices = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Choices / 選択肢"));
    f.render_widget(choices, area);
}

fn draw_image_choices(
    f: &mut Frame,
    area: Rect,
    question: &QuestionState,
    cursor: usize,
    resolver: &MediaResolver,
) {
    let count = question.choices.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            (0..count)
                .map(|_| Constraint::Ratio(1, count))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (i, choice) in question.choices.iter().enumerate() {
        let view = ImageView::for_path(resolver, &choice.label);
        let border = match choice_style(question, i, cursor) {
            style if style == Style::default() => Style::default().fg(Color::DarkGray),
            style => style,
        };
        draw_image_panel(
            f,
            columns[i],
            &view,
            &format!(" {} ", i + 1),
            border,
            question.is_answered(),
        );
    }
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Home")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to the home screen? / ホームに戻りますか？")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return Home)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::distractor::Choice;
    use crate::quiz::Submission;

    fn question(submission: Option<Submission>) -> QuestionState {
        QuestionState {
            entry: 0,
            choices: (0..3)
                .map(|i| Choice {
                    entry: i,
                    label: format!("choice {}", i),
                })
                .collect(),
            correct: 1,
            submission,
        }
    }

    #[test]
    fn test_choice_style_before_answer_follows_cursor() {
        let q = question(None);
        assert_eq!(choice_style(&q, 2, 2).fg, Some(Color::Yellow));
        assert_eq!(choice_style(&q, 1, 2), Style::default());
    }

    #[test]
    fn test_choice_style_after_wrong_answer() {
        let q = question(Some(Submission {
            chosen: 0,
            feedback: Feedback::Incorrect,
        }));
        assert_eq!(choice_style(&q, 1, 0).fg, Some(Color::Green));
        assert_eq!(choice_style(&q, 0, 0).fg, Some(Color::Red));
        assert_eq!(choice_style(&q, 2, 0).fg, Some(Color::DarkGray));
    }
}
