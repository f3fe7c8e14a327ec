// Alternate-screen terminal used by continuous mode

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    terminal::{
        BeginSynchronizedUpdate, EndSynchronizedUpdate, EnterAlternateScreen,
        LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{
    Terminal, TerminalOptions, Viewport,
    backend::CrosstermBackend,
    layout::{Rect, Size},
};

use super::{Palette, Screen, render_frame};
use crate::error::MonitorError;
use crate::layout::Frame;

/// Owns raw mode, the alternate screen and the hidden cursor for its lifetime.
/// Dropping it restores all three.
pub struct TerminalScreen<W: Write = Stdout> {
    terminal: Terminal<CrosstermBackend<W>>,
    palette: Palette,
    /// Set for writers that are not the process's own terminal.
    fixed_size: Option<Size>,
    raw_mode: bool,
    restored: bool,
}

impl TerminalScreen<Stdout> {
    pub fn acquire(palette: Palette) -> Result<Self, MonitorError> {
        enable_raw_mode()?;
        let screen = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(MonitorError::from)
            .and_then(|terminal| Self::enter(terminal, palette, None, true));
        if screen.is_err() {
            restore_terminal(&mut io::stdout());
        }
        screen
    }
}

impl<W: Write> TerminalScreen<W> {
    /// Drives any writer as a fixed-size alternate screen. Raw mode is left alone.
    pub fn with_writer(out: W, size: Size, palette: Palette) -> Result<Self, MonitorError> {
        let viewport = Viewport::Fixed(Rect::new(0, 0, size.width, size.height));
        let terminal = Terminal::with_options(CrosstermBackend::new(out), TerminalOptions { viewport })?;
        Self::enter(terminal, palette, Some(size), false)
    }

    fn enter(
        mut terminal: Terminal<CrosstermBackend<W>>,
        palette: Palette,
        fixed_size: Option<Size>,
        raw_mode: bool,
    ) -> Result<Self, MonitorError> {
        execute!(terminal.backend_mut(), EnterAlternateScreen, cursor::Hide)?;
        tracing::debug!(raw_mode, "terminal acquired");
        Ok(Self {
            terminal,
            palette,
            fixed_size,
            raw_mode,
            restored: false,
        })
    }

    /// Leaves the alternate screen and shows the cursor. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let raw = if self.raw_mode { disable_raw_mode() } else { Ok(()) };
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        // Through the terminal, so its own drop does not show the cursor again.
        self.terminal.show_cursor()?;
        raw
    }
}

impl<W: Write> Drop for TerminalScreen<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, operation = "restore_terminal", "terminal restore failed");
        } else {
            tracing::debug!("terminal restored");
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn size(&mut self) -> Result<Size, MonitorError> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => Ok(self.terminal.size()?),
        }
    }

    /// Only changed cells are written (ratatui diffs against the previous buffer),
    /// wrapped in a synchronized update so the terminal shows the frame in one step.
    fn present(&mut self, frame: &Frame) -> Result<(), MonitorError> {
        let palette = self.palette;
        queue!(self.terminal.backend_mut(), BeginSynchronizedUpdate)?;
        let drawn = self
            .terminal
            .draw(|f| render_frame(frame, &palette, f.buffer_mut()))
            .map(|_| ());
        execute!(self.terminal.backend_mut(), EndSynchronizedUpdate)?;
        drawn?;
        Ok(())
    }
}

fn restore_terminal(out: &mut impl io::Write) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
}

/// Restores the terminal before the default panic output, so a panic mid-frame
/// does not leave the shell in raw mode on the alternate screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut io::stdout());
        original_hook(info);
    }));
}
