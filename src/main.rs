use graph_inspector::{actions, app, config, event, fetch, logging, ui};

use anyhow::Result;
use app::AppState;
use clap::Parser;
use config::{load_config, CliArgs};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    logging::init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting graph-inspector");

    // Create application state
    let mut app = AppState::new(config);

    // Fetch the configured model in the background
    if let Some(model) = app.config.model.clone() {
        app.start_fetch(fetch::PathTransport::new(model));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal
    terminal.clear()?;

    // Run the main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    // Handle any errors from the main loop
    if let Err(err) = res {
        error!(error = %err, "main loop failed");
        eprintln!("Error: {}", err);
    }

    info!("exiting");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    let tick = Duration::from_millis(app.config.tick_rate_ms);

    while app.running {
        // Apply whatever arrived since the last frame
        app.pump_fetch();
        app.pump_engine_events();

        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if let Some(action) = event::handle_events(app, tick)? {
            actions::execute_action(action, app)?;
        }
    }

    Ok(())
}
