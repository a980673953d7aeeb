mod app;
mod cli;
mod event;
mod logging;
mod mount;
mod surface;
mod tui;

use std::io;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    app::App,
    cli::Cli,
    event::EventHandler,
    logging::{LoggingConfig, init_logging},
    tui::Tui,
};

fn main() -> Result<()> {
    // panic hook
    color_eyre::install()?;

    // the terminal belongs to the UI, so logs only go to file
    let _guard = init_logging(LoggingConfig::from_env().for_tui())
        .wrap_err("Failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "glyphwave-preview starting up");

    let cli = Cli::parse();
    cli.validate()?;

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let events = EventHandler::new(cli.tick_rate());

    let mut tui = Tui::new(terminal, events);
    tui.enter()?;

    let result = App::new(&cli).run(&mut tui);
    tui.exit()?;

    result
}
