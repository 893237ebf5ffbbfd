// remy - an eye icon that watches your terminal pointer
// Blinks now and then, cycles accent colors, follows light/dark themes.

mod app;
mod logging;
mod theme;
mod timer;
mod ui;
mod widget;

use anyhow::{Context, Result};
use app::{
    config::FRAME_INTERVAL_MS,
    event::{handle_key_event, handle_mouse_event},
    AppSettings, AppState, RemyConfig,
};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use theme::{
    ColorFgBgPreference, FileThemeWatcher, PolledThemeWatcher, SystemThemeObserver, ThemeOverride,
};
use widget::Mode;

/// Animated eye icon for the terminal
#[derive(Debug, Parser)]
#[command(name = "remy", version, about)]
struct Cli {
    /// TOML file with palettes and tracking settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of widgets side by side (1-4)
    #[arg(short = 'n', long, default_value_t = 1,
          value_parser = clap::value_parser!(u8).range(1..=app::config::MAX_INSTANCES as i64))]
    instances: u8,

    /// Initial theme override
    #[arg(short, long, value_enum, default_value_t = ThemeOverride::Auto)]
    theme: ThemeOverride,

    /// Initial mode: follow, thinking or idle (anything else is follow)
    #[arg(short, long, default_value = "follow")]
    mode: String,

    /// File holding "dark" or "light", watched as the system preference
    /// (default: COLORFGBG, polled)
    #[arg(long)]
    system_theme_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let config = match &cli.config {
        Some(path) => RemyConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RemyConfig::default(),
    };

    let system_theme: Box<dyn SystemThemeObserver> = match &cli.system_theme_file {
        Some(path) => Box::new(
            FileThemeWatcher::start(path)
                .with_context(|| format!("watching {}", path.display()))?,
        ),
        None => Box::new(PolledThemeWatcher::new(
            Box::new(ColorFgBgPreference),
            Instant::now(),
        )),
    };

    let settings = AppSettings {
        config,
        instances: usize::from(cli.instances),
        theme_override: cli.theme,
        mode: Mode::from_name(&cli.mode),
        system_theme,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "remy exited with an error");
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    settings: AppSettings,
) -> Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut app = AppState::new(settings, Instant::now());

    loop {
        app.on_tick(Instant::now());
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !app.running {
            return Ok(());
        }

        // Wait up to one frame for input, then drain whatever else queued up
        let mut timeout = frame_interval;
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(&mut app, key.code);
                }
                Event::Mouse(mouse) => handle_mouse_event(&mut app, mouse),
                _ => {}
            }
            timeout = Duration::ZERO;
        }
    }
}
