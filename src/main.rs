use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use vocab_quiz::{handle_key, logger, ui, vocab, App, AudioPlayer, Config, MediaResolver};

fn main() -> io::Result<()> {
    let config = Config::from_env();
    logger::init(&config.log_path);
    logger::log("Starting vocab-quiz");

    let vocabulary = match &config.data_path {
        Some(path) => match vocab::load_from_path(path) {
            Ok(vocabulary) => vocabulary,
            Err(e) => {
                eprintln!(
                    "Failed to load dataset {}: {}. Using the bundled words.",
                    path.display(),
                    e
                );
                logger::warn(&format!("Dataset {} rejected: {}", path.display(), e));
                vocab::load()
            }
        },
        None => vocab::load(),
    };
    logger::log(&format!("Loaded {} words", vocabulary.len()));

    let player = AudioPlayer::new(config.player.clone());
    let resolver = MediaResolver::new(config.media_root.clone());
    logger::log(&format!("Media root: {}", resolver.root().display()));
    let mut app = App::new(vocabulary, resolver, player);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::warn(&format!("Terminal error: {}", e));
    }
    logger::log("Exiting vocab-quiz");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.sync_audio(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key, Instant::now());
        }
        app.tick(Instant::now());

        if app.should_quit {
            app.player.stop();
            return Ok(());
        }
    }
}
