mod api;
mod app;
mod config;
mod gallery;
mod input;
mod loader;
mod logging;
mod models;
mod ui;
mod view;

use api::{HttpMovieSource, MovieSource};
use app::App;
use clap::Parser;
use config::{GalleryConfig, Overrides};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use loader::{LoadOutcome, PageLoader};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

/// Browse the paginated movie catalogue in the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the paginated movies endpoint
    #[arg(long)]
    api_base: Option<String>,

    /// Page to open first
    #[arg(short, long)]
    page: Option<u32>,

    /// Path to a JSON config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_path = match cli.log_file {
        Some(path) => path,
        None => logging::default_log_path()?,
    };
    logging::init(&log_path, cli.verbose)?;

    let config = GalleryConfig::load(cli.config.as_deref())?.with_overrides(Overrides {
        api_base: cli.api_base,
        start_page: cli.page,
    });

    let source = HttpMovieSource::new(config.api_base.clone(), config.request_timeout())?;
    info!(base = source.base(), start_page = config.start_page, "starting gallery");

    let (loader, mut outcomes) = PageLoader::new(source);
    let mut app = App::new(loader);
    app.load_page(config.start_page);

    // Init terminal
    let mut terminal = ratatui::init();
    let result = run_terminal(&mut terminal, &mut app, &mut outcomes).await;

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Everything between `ratatui::init` and `ratatui::restore`. Errors are
/// returned so the caller can restore the terminal before reporting them.
async fn run_terminal<S: MovieSource>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<S>,
    outcomes: &mut UnboundedReceiver<LoadOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    app.area = ratatui::layout::Rect::new(0, 0, size.width, size.height);

    run_app(terminal, app, outcomes).await
}

async fn run_app<S: MovieSource>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<S>,
    outcomes: &mut UnboundedReceiver<LoadOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.handle_outcome(outcome);
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so finished requests show up promptly
        if event::poll(std::time::Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(width, height) => {
                    app.area = ratatui::layout::Rect::new(0, 0, width, height);
                }
                _ => {}
            }
        }
    }
}
