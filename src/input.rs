use crate::app::App;
use crate::models::{AppState, HomeItem, LearnOverlay, SettingsRow};
use crate::vocab::AudioKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.state {
        AppState::Home => handle_home_input(app, key),
        AppState::Learn => handle_learn_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key, now),
        AppState::QuizQuitConfirm => handle_quit_confirm_input(app, key),
        AppState::Summary => handle_summary_input(app, key),
    }
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => {
            app.home_index = app.home_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.home_index < HomeItem::ALL.len() - 1 {
                app.home_index += 1;
            }
        }
        KeyCode::Char('h') => app.hint = !app.hint,
        KeyCode::Enter => app.open_selected(),
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

pub fn handle_quiz_input(app: &mut App, key: KeyEvent, now: Instant) {
    let Some(question) = app.quiz.as_ref().and_then(|session| session.question()) else {
        return;
    };
    let choices = question.choices.len();
    let answered = question.is_answered();

    match key.code {
        KeyCode::Esc => app.state = AppState::QuizQuitConfirm,
        _ if answered => {}
        KeyCode::Up | KeyCode::Left => {
            app.quiz_cursor = app.quiz_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Right => {
            if app.quiz_cursor + 1 < choices {
                app.quiz_cursor += 1;
            }
        }
        KeyCode::Enter => app.answer(app.quiz_cursor, now),
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10)
                && digit >= 1
                && (digit as usize) <= choices
            {
                app.answer(digit as usize - 1, now);
            }
        }
        _ => {}
    }
}

fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.go_home(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = app.quiz_screen();
        }
        _ => {}
    }
}

fn handle_summary_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart_quiz(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => app.go_home(),
        _ => {}
    }
}

pub fn handle_learn_input(app: &mut App, key: KeyEvent) {
    match app.learn_overlay {
        LearnOverlay::None => handle_learn_main(app, key),
        LearnOverlay::Settings => handle_learn_settings(app, key),
        LearnOverlay::AudioSequence => handle_learn_sequence(app, key),
    }
}

fn open_overlay(app: &mut App, overlay: LearnOverlay) {
    app.learn_overlay = overlay;
    app.overlay_cursor = 0;
}

fn handle_learn_main(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.go_home(),
        KeyCode::Char('s') => return open_overlay(app, LearnOverlay::Settings),
        KeyCode::Char('a') => return open_overlay(app, LearnOverlay::AudioSequence),
        _ => {}
    }
    let Some(session) = &mut app.learn else {
        return;
    };
    match key.code {
        KeyCode::Left => session.prev_word(),
        KeyCode::Right => session.next_word(),
        KeyCode::Char(' ') => session.toggle_play(),
        _ => {}
    }
}

fn handle_learn_settings(app: &mut App, key: KeyEvent) {
    let rows = SettingsRow::all();
    let Some(session) = &mut app.learn else {
        return;
    };
    let row = rows[app.overlay_cursor.min(rows.len() - 1)];

    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => app.learn_overlay = LearnOverlay::None,
        KeyCode::Up => app.overlay_cursor = app.overlay_cursor.saturating_sub(1),
        KeyCode::Down => {
            if app.overlay_cursor + 1 < rows.len() {
                app.overlay_cursor += 1;
            }
        }
        KeyCode::Left => match row {
            SettingsRow::PlaybackRate => session.slower(),
            SettingsRow::NextWordDelay => session.shorter_delay(),
            SettingsRow::Field(_) => {}
        },
        KeyCode::Right => match row {
            SettingsRow::PlaybackRate => session.faster(),
            SettingsRow::NextWordDelay => session.longer_delay(),
            SettingsRow::Field(_) => {}
        },
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let SettingsRow::Field(field) = row {
                session.options_mut().toggle(field);
            }
        }
        _ => {}
    }
}

fn handle_learn_sequence(app: &mut App, key: KeyEvent) {
    let keys = AudioKey::all();
    let Some(session) = &mut app.learn else {
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Char('a') => app.learn_overlay = LearnOverlay::None,
        KeyCode::Up => app.overlay_cursor = app.overlay_cursor.saturating_sub(1),
        KeyCode::Down => {
            if app.overlay_cursor + 1 < keys.len() {
                app.overlay_cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(key) = keys.get(app.overlay_cursor) {
                session.toggle_item(*key);
            }
        }
        _ => {}
    }
}
