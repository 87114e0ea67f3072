pub mod app;
pub mod audio;
pub mod config;
pub mod display;
pub mod input;
pub mod logger;
pub mod media;
pub mod models;
pub mod quiz;
pub mod schedule;
pub mod ui;
pub mod utils;
pub mod vocab;


// Re-exports for convenience
pub use app::App;
pub use audio::{AudioPlayer, PlayerCommand};
pub use config::Config;
pub use display::DisplaySession;
pub use input::handle_key;
pub use media::MediaResolver;
pub use models::AppState;
pub use quiz::{Feedback, QuizError, QuizKind, QuizSession};
pub use vocab::{VocabEntry, Vocabulary};
