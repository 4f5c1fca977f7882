//! crossterm integration: frame output, input pump and window size.

use std::io::{self, Stdout, Write};
use std::thread::{self, JoinHandle};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, warn};

use crate::{Effect, Emitter, Error, Event, Renderer, Result};

/// Draws frames on the alternate screen in raw mode.
///
/// The terminal is restored when the renderer is dropped.
pub struct TerminalRenderer {
    out: Stdout,
}

impl TerminalRenderer {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // Raw mode does not translate bare newlines.
        for (row, line) in frame.lines().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: String) {
        if let Err(err) = self.draw(&frame) {
            warn!(%err, "failed to draw frame");
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.out, Show, LeaveAlternateScreen) {
            warn!(%err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            warn!(%err, "failed to disable raw mode");
        }
    }
}

/// Read terminal input on a background thread and feed it to `emitter`.
///
/// The thread ends when the runtime drops its receiver or input fails.
pub fn spawn_input<M>(emitter: Emitter<M>) -> JoinHandle<()>
where
    M: Send + 'static,
{
    thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(raw) => {
                let Some(event) = Event::from_terminal(raw) else {
                    continue;
                };
                if !emitter.emit(event) {
                    debug!("runtime gone; stopping input pump");
                    break;
                }
            }
            Err(err) => {
                warn!(%err, "terminal input failed");
                emitter.emit(Event::Error(Error::from(err)));
                break;
            }
        }
    })
}

/// An effect reporting the current terminal size as an [`Event::Resize`].
pub fn window_size<M>() -> Effect<M>
where
    M: Send + 'static,
{
    Effect::perform(|| match terminal::size() {
        Ok((width, height)) => Event::Resize { width, height },
        Err(err) => Event::Error(Error::from(err)),
    })
}
