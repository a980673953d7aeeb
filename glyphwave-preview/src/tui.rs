use std::{io, panic};

use color_eyre::{Result, eyre::eyre};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

use crate::event::{EventHandler, PreviewEvent};

pub type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub struct Tui {
    terminal: CrosstermTerminal,
    events: EventHandler,
}

impl Tui {
    pub fn new(terminal: CrosstermTerminal, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    pub fn draw(&mut self, render_ui: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render_ui)?;
        Ok(())
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    /// Blocks for the next event, then drains whatever else is queued.
    pub fn receive_events<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(PreviewEvent),
    {
        let event = self
            .events
            .next()
            .map_err(|_| eyre!("event thread stopped"))?;

        f(event);
        while let Some(event) = self.events.try_next() {
            f(event);
        }

        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen)?;

        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic| {
            let _ = Self::reset();
            panic_hook(panic);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
