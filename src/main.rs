use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};

use toptick::app::App;
use toptick::config::{Config, RenderMode, load_config, load_config_from_path};
use toptick::event::{Event, EventHandler};
use toptick::format::clock_now;
use toptick::logging::init_file_logging;
use toptick::system::boot_time;
use toptick::system::platform::{self, UptimeClock};
use toptick::ui;

/// Samples are always one second apart.
const TICK_RATE: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "toptick", about = "top-style terminal resource monitor")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clear and reprint the summary each tick instead of a full-screen UI
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Root of the /proc pseudo-file tree
    #[arg(long)]
    proc_root: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &config.logging.file {
        init_file_logging(path, &config.logging.level)
            .wrap_err_with(|| format!("cannot log to {}", path.display()))?;
    }

    if !platform::prepare_console() {
        tracing::warn!("console refused escape sequences; output may be garbled");
    }

    let mut ctx = config.source.context();
    if ctx.uptime_clock == UptimeClock::BootTime
        && let Some(helper) = platform::boot_time_query()
    {
        ctx.boot_time = boot_time::discover(&helper, config.source.helper_timeout()).await;
        tracing::info!(known = ctx.boot_time.is_some(), "boot time discovery finished");
    }

    let source = platform::native_source(&ctx);
    tracing::info!(source = source.name(), "metric source selected");
    let app = App::new(source).map_err(|e| eyre!("Failed to read CPU statistics: {e}"))?;

    match config.general.render_mode {
        RenderMode::Plain => run_plain(app).await,
        RenderMode::Tui => run_tui(app).await,
    }
}

async fn run_tui(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = tui_loop(&mut terminal, &mut app).await;

    ratatui::restore();

    result
}

async fn tui_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE, true);

    terminal.draw(|frame| ui::draw(frame, app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
            Event::Tick => {
                app.refresh()
                    .map_err(|e| eyre!("Failed to read CPU statistics: {e}"))?;
                terminal.draw(|frame| ui::draw(frame, app))?;
            }
            Event::Resize => {
                terminal.draw(|frame| ui::draw(frame, app))?;
            }
            Event::Interrupt => app.quit(),
        }
    }

    Ok(())
}

async fn run_plain(mut app: App) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE, false);
    let mut out = stdout();

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Tick => {
                let report = app
                    .refresh()
                    .map_err(|e| eyre!("Failed to read CPU statistics: {e}"))?;
                ui::plain::render(&mut out, report, &clock_now())?;
            }
            Event::Interrupt => app.quit(),
            Event::Key(_) | Event::Resize => {}
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if cli.plain {
        config.general.render_mode = RenderMode::Plain;
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
    if let Some(root) = &cli.proc_root {
        config.source.proc_root = root.clone();
    }

    config
}
