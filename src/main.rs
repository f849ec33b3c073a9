mod app;
mod config;
mod export;
mod forms;
mod logging;
mod ollama;
mod prompts;
mod session;
mod settings_ui;
mod ui;
mod validators;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{DefaultTerminal, Terminal};
use tracing::{debug, info};

use crate::app::App;
use crate::forms::Tab;
use crate::ollama::OllamaClient;
use crate::ui::draw_ui;

/// Terminal study planner backed by a local Ollama model.
#[derive(Debug, Parser)]
#[command(name = "studyhub", version, about)]
struct Cli {
    /// Ollama endpoint, e.g. http://localhost:11434
    #[arg(long)]
    endpoint: Option<String>,

    /// Model tag to generate with
    #[arg(long)]
    model: Option<String>,

    /// Directory for exported results
    #[arg(long)]
    export_dir: Option<String>,
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    // Config first so the log level is known before the subscriber exists.
    let mut loaded = config::load_config()?;
    if let Some(endpoint) = cli.endpoint {
        loaded.config.ollama.url = endpoint;
    }
    if let Some(model) = cli.model {
        loaded.config.ollama.model = model;
    }
    if let Some(dir) = cli.export_dir {
        loaded.config.export.directory = dir;
    }

    let logging_ctx = match logging::init(&loaded.config.logging.level) {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {e}");
            None
        }
    };
    if let Some(ctx) = &logging_ctx {
        logging::cleanup_old_logs(&ctx.log_directory);
    }
    debug!(
        config_path = %loaded.path.display(),
        status = ?loaded.status,
        "config loaded"
    );

    let client = OllamaClient::new(
        &loaded.config.ollama.url,
        &loaded.config.ollama.model,
        loaded.config.ollama.timeout(),
    )
    .context("failed to build the Ollama client")?;

    let session_id = logging_ctx
        .as_ref()
        .map(|ctx| ctx.session_id.clone())
        .unwrap_or_else(|| "------".to_string());
    let export_dir = loaded.config.export.resolved_directory();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

    let app = App::new(client, export_dir, session_id.clone());
    let result = run_app(terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    info!(
        session_id = %session_id,
        duration_secs = start_time.elapsed().as_secs_f64(),
        "session end"
    );

    result
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        // Collect finished generations and refresh the backend status.
        app.poll();

        terminal.draw(|f| draw_ui(f, &mut app))?;

        // Short timeout so worker results keep flowing while idle.
        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;

        // Popup dismissal swallows the key.
        if app.show_busy_popup {
            if let Event::Key(key) = event
                && (key.code == KeyCode::Enter || key.code == KeyCode::Esc)
            {
                app.show_busy_popup = false;
            }
            continue;
        }

        match event {
            Event::Key(key) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') if ctrl => return Ok(()),
                    KeyCode::Char('s') if ctrl => {
                        app.show_settings = !app.show_settings;
                    }
                    _ if app.show_settings => {
                        forms::handle_settings_input(&mut app, key.code);
                    }
                    KeyCode::Char('e') if ctrl => app.export_active(),
                    KeyCode::Char('n') if ctrl => app.select_tab(app.active_tab.next()),
                    KeyCode::Char('p') if ctrl => app.select_tab(app.active_tab.prev()),
                    KeyCode::Char('u') if ctrl => {
                        let half = app.result_pane_height / 2;
                        app.scroll_up(half.max(1));
                    }
                    KeyCode::Char('d') if ctrl => {
                        let half = app.result_pane_height / 2;
                        app.scroll_down(half.max(1));
                    }
                    KeyCode::PageUp => app.scroll_up(app.result_pane_height.max(1)),
                    KeyCode::PageDown => app.scroll_down(app.result_pane_height.max(1)),
                    code => {
                        if app.active_tab == Tab::Result {
                            match code {
                                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                                _ => {}
                            }
                        } else {
                            forms::handle_tab_input(&mut app, code, key.modifiers);
                        }
                    }
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_up(3),
                MouseEventKind::ScrollDown => app.scroll_down(3),
                _ => {}
            },
            Event::Resize(_, _) => {
                // Handled by the next draw.
            }
            _ => {}
        }
    }
}
