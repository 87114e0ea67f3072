use crate::logger;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;
use thiserror::Error;

const RATE_PLACEHOLDER: &str = "{rate}";
const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio player command is empty")]
    EmptyCommand,

    #[error("failed to start audio player: {0}")]
    Spawn(#[from] std::io::Error),
}

/// External program used to play one file, e.g. `mpv --no-video --speed={rate}`.
/// The file path is appended as the last argument.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    pub fn parse(command: &str) -> Result<Self, AudioError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(AudioError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn build(&self, path: &Path, rate: f32) -> Command {
        let rate = format!("{:.2}", rate);
        let mut command = Command::new(&self.program);
        command
            .args(self.args.iter().map(|arg| arg.replace(RATE_PLACEHOLDER, &rate)))
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

#[derive(Debug)]
pub enum AudioCommand {
    Play { id: u64, path: PathBuf, rate: f32 },
    Stop,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Playback `id` ran to completion (or was skipped).
    Ended { id: u64 },
    Failed { id: u64, error: String },
}

fn stop_child(child: &mut Option<(u64, Child)>) {
    if let Some((_, mut running)) = child.take() {
        let _ = running.kill();
        let _ = running.wait();
    }
}

pub fn spawn_audio_worker(
    player: PlayerCommand,
    commands: Receiver<AudioCommand>,
    events: Sender<AudioEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("vocab-quiz::audio_worker".to_string())
        .spawn(move || {
            let mut child: Option<(u64, Child)> = None;
            loop {
                match commands.recv_timeout(CHILD_POLL_INTERVAL) {
                    Ok(AudioCommand::Play { id, path, rate }) => {
                        stop_child(&mut child);
                        match player.build(&path, rate).spawn() {
                            Ok(started) => {
                                logger::log(&format!("Playing {} (#{})", path.display(), id));
                                child = Some((id, started));
                            }
                            Err(e) => {
                                let error = AudioError::from(e).to_string();
                                logger::warn(&error);
                                let _ = events.send(AudioEvent::Failed { id, error });
                            }
                        }
                    }
                    Ok(AudioCommand::Stop) => stop_child(&mut child),
                    Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                        stop_child(&mut child);
                        logger::log("Audio worker exiting");
                        break;
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                }

                let finished = match child.as_mut() {
                    Some((id, running)) => match running.try_wait() {
                        Ok(Some(_)) => Some(*id),
                        Ok(None) => None,
                        Err(e) => {
                            logger::warn(&format!("Lost track of audio player: {}", e));
                            Some(*id)
                        }
                    },
                    None => None,
                };
                if let Some(id) = finished {
                    child = None;
                    let _ = events.send(AudioEvent::Ended { id });
                }
            }
        })
}

/// Playback collaborator: takes a file and a rate, reports when it ends.
///
/// Without a configured player every request ends immediately, which keeps
/// the learn flow moving in silence.
pub struct AudioPlayer {
    commands: Option<Sender<AudioCommand>>,
    events_tx: Sender<AudioEvent>,
    events: Receiver<AudioEvent>,
    worker: Option<thread::JoinHandle<()>>,
    next_id: u64,
    current: Option<u64>,
}

impl AudioPlayer {
    pub fn silent() -> Self {
        let (events_tx, events) = unbounded();
        Self {
            commands: None,
            events_tx,
            events,
            worker: None,
            next_id: 0,
            current: None,
        }
    }

    pub fn new(player: Option<PlayerCommand>) -> Self {
        let mut audio = Self::silent();
        let Some(player) = player else {
            logger::log("No audio player configured; audio is silent");
            return audio;
        };

        let (commands_tx, commands_rx) = unbounded();
        match spawn_audio_worker(player, commands_rx, audio.events_tx.clone()) {
            Ok(handle) => {
                audio.commands = Some(commands_tx);
                audio.worker = Some(handle);
            }
            Err(e) => logger::warn(&format!("Failed to spawn audio worker: {}", e)),
        }
        audio
    }

    pub fn is_silent(&self) -> bool {
        self.commands.is_none()
    }

    /// Starts playing `source`, superseding whatever was playing. A missing
    /// source is skipped: it ends straight away.
    pub fn play(&mut self, source: Option<PathBuf>, rate: f32) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(id);

        match (source, &self.commands) {
            (Some(path), Some(commands)) => {
                if commands.send(AudioCommand::Play { id, path, rate }).is_err() {
                    logger::warn("Audio worker is gone; skipping playback");
                    let _ = self.events_tx.send(AudioEvent::Ended { id });
                }
            }
            _ => {
                if let Some(commands) = &self.commands {
                    let _ = commands.send(AudioCommand::Stop);
                }
                let _ = self.events_tx.send(AudioEvent::Ended { id });
            }
        }
        id
    }

    pub fn stop(&mut self) {
        self.current = None;
        if let Some(commands) = &self.commands {
            let _ = commands.send(AudioCommand::Stop);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Drains worker events; true when the current playback has ended.
    pub fn poll_ended(&mut self) -> bool {
        let mut ended = false;
        while let Ok(event) = self.events.try_recv() {
            let id = match event {
                AudioEvent::Ended { id } => id,
                AudioEvent::Failed { id, error } => {
                    logger::warn(&format!("Playback #{} failed: {}", id, error));
                    id
                }
            };
            if self.current == Some(id) {
                self.current = None;
                ended = true;
            }
        }
        ended
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(AudioCommand::Shutdown);
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_command() {
        let command = PlayerCommand::parse("mpv --no-video --speed={rate}").unwrap();
        assert_eq!(command.program, "mpv");
        assert_eq!(command.args, vec!["--no-video", "--speed={rate}"]);
        assert!(matches!(
            PlayerCommand::parse("   "),
            Err(AudioError::EmptyCommand)
        ));
    }

    #[test]
    fn test_build_substitutes_rate_and_appends_path() {
        let command = PlayerCommand::parse("mpv --speed={rate}").unwrap();
        let built = command.build(Path::new("/tmp/a.mp3"), 1.5);
        let args: Vec<String> = built
            .get_args()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect();
        assert_eq!(built.get_program(), "mpv");
        assert_eq!(args, vec!["--speed=1.50", "/tmp/a.mp3"]);
    }

    #[test]
    fn test_silent_player_ends_immediately() {
        let mut player = AudioPlayer::silent();
        assert!(player.is_silent());

        player.play(Some(PathBuf::from("/tmp/a.mp3")), 1.0);
        assert!(player.is_playing());
        assert!(player.poll_ended());
        assert!(!player.is_playing());
        assert!(!player.poll_ended());
    }

    #[test]
    fn test_superseded_playback_is_ignored() {
        let mut player = AudioPlayer::silent();
        player.play(None, 1.0);
        player.stop();
        assert!(!player.poll_ended());

        player.play(None, 1.0);
        player.play(None, 1.0);
        // Both ended, but only the latest counts, once.
        assert!(player.poll_ended());
        assert!(!player.poll_ended());
    }

    #[cfg(unix)]
    #[test]
    fn test_worker_reports_natural_end() {
        let player = PlayerCommand::parse("true").unwrap();
        let (commands_tx, commands_rx) = unbounded();
        let (events_tx, events_rx) = unbounded();
        let handle = spawn_audio_worker(player, commands_rx, events_tx).unwrap();

        commands_tx
            .send(AudioCommand::Play {
                id: 7,
                path: PathBuf::from("ignored.mp3"),
                rate: 1.0,
            })
            .unwrap();
        let event = events_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, AudioEvent::Ended { id: 7 });

        commands_tx.send(AudioCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_worker_reports_spawn_failure() {
        let player = PlayerCommand::parse("/nonexistent/player-binary").unwrap();
        let (commands_tx, commands_rx) = unbounded();
        let (events_tx, events_rx) = unbounded();
        let handle = spawn_audio_worker(player, commands_rx, events_tx).unwrap();

        commands_tx
            .send(AudioCommand::Play {
                id: 1,
                path: PathBuf::from("a.mp3"),
                rate: 1.0,
            })
            .unwrap();
        let event = events_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, AudioEvent::Failed { id: 1, .. }));

        drop(commands_tx);
        handle.join().unwrap();
    }
}
