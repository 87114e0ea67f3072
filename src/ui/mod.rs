pub mod layout;
mod learn;
mod media;
mod menu;
mod quiz;
mod summary;

pub use layout::{calculate_learn_chunks, calculate_quiz_chunks, calculate_summary_chunks};
pub use learn::{draw_learn, word_card};
pub use media::draw_image_panel;
pub use menu::draw_home;
pub use quiz::{choice_style, draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

/// Renders whichever screen `app` is on.
pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Home => draw_home(f, app.home_index, app.hint, app.vocabulary.len()),
        AppState::Learn => {
            if let Some(session) = &app.learn {
                draw_learn(f, session, app.learn_overlay, app.overlay_cursor, &app.resolver);
            }
        }
        AppState::Quiz => {
            if let Some(session) = &app.quiz {
                draw_quiz(f, session, app.quiz_cursor, &app.resolver);
            }
        }
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Summary => {
            if let Some(session) = &app.quiz {
                draw_summary(f, session);
            }
        }
    }
}
