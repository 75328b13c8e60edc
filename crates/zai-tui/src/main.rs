use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use zai_core::theme::detect_os_dark_mode;
use zai_core::{Config, MemoryStore, PreferenceStore, ZaiError};

mod app;
mod handler;
mod icons;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "zai")]
#[command(about = "Terminal shell for building and exploring AI experiments")]
#[command(version)]
struct Cli {
    /// Page to open on start (home, chat, explore, create, learn)
    #[arg(short, long, default_value = "home")]
    page: String,

    /// Preference file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the terminal as having a dark background
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Treat the terminal as having a light background
    #[arg(long)]
    light: bool,
}

impl Cli {
    fn os_prefers_dark(&self) -> bool {
        match (self.dark, self.light) {
            (true, _) => true,
            (_, true) => false,
            _ => detect_os_dark_mode(),
        }
    }
}

/// Open the preference file, falling back to a fresh one (or memory only)
/// when it cannot be read.
fn open_store(path: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    let loaded = match &path {
        Some(path) => Config::load_from(path.clone()),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => Box::new(config),
        Err(ZaiError::NoConfigDir) => {
            tracing::warn!("no config directory; theme preference will not persist");
            Box::new(MemoryStore::default())
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read preferences; starting fresh");
            let fresh = match path {
                Some(path) => Some(path),
                None => Config::get_config_path().ok(),
            };
            match fresh {
                Some(path) => Box::new(Config::new(path)),
                None => Box::new(MemoryStore::default()),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; the app runs without a log file
    let _log_guard = logging::init().ok();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting zai");

    let store = open_store(cli.config.clone());
    let os_prefers_dark = cli.os_prefers_dark();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let mut app = App::new(store, os_prefers_dark, &cli.page, events.sender());
    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    tracing::info!("exiting zai");
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    terminal.draw(|f| ui::render(app, f))?;

    while !app.should_quit {
        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event);

        if app.viewport.take_dirty() {
            terminal.draw(|f| ui::render(app, f))?;
        }
    }

    Ok(())
}
