use crate::audio::PlayerCommand;
use crate::logger::DEFAULT_LOG_FILE;
use std::path::PathBuf;

pub const DATA_ENV: &str = "VOCAB_QUIZ_DATA";
pub const MEDIA_ROOT_ENV: &str = "VOCAB_QUIZ_MEDIA_ROOT";
pub const PLAYER_ENV: &str = "VOCAB_QUIZ_PLAYER";
pub const LOG_ENV: &str = "VOCAB_QUIZ_LOG";

pub const DEFAULT_MEDIA_ROOT: &str = "public";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Alternative dataset; the bundled one is used when unset.
    pub data_path: Option<PathBuf>,
    pub media_root: PathBuf,
    pub player: Option<PlayerCommand>,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            data_path: value(DATA_ENV).map(PathBuf::from),
            media_root: value(MEDIA_ROOT_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT)),
            player: value(PLAYER_ENV).and_then(|command| PlayerCommand::parse(&command).ok()),
            log_path: value(LOG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
