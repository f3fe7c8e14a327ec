// Inline screen: writes a frame once to a plain writer (single-shot mode)

use std::io::{IsTerminal, Write};

use crossterm::{
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Rect, Size},
    style::{Color, Modifier},
};
use unicode_width::UnicodeWidthStr;

use super::{Palette, Screen, render_frame};
use crate::config::DisplayConfig;
use crate::error::MonitorError;
use crate::layout::Frame;

/// Renders into an off-screen buffer and prints it line by line. Nothing on the
/// terminal is changed besides the printed text, so there is nothing to restore.
pub struct InlineScreen<W: Write> {
    out: W,
    size: Size,
    palette: Palette,
}

impl<W: Write> InlineScreen<W> {
    pub fn new(out: W, size: Size, palette: Palette) -> Self {
        Self { out, size, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl InlineScreen<std::io::Stdout> {
    /// Sized to the terminal, one row short so the prompt does not scroll the
    /// frame; the configured fallback size when stdout is not a terminal.
    pub fn stdout(display: &DisplayConfig, palette: Palette) -> Self {
        let stdout = std::io::stdout();
        let fallback = Size::new(display.fallback_width, display.fallback_height);
        let size = if stdout.is_terminal() {
            crossterm::terminal::size()
                .map(|(w, h)| Size::new(w, h.saturating_sub(1).max(1)))
                .unwrap_or(fallback)
        } else {
            fallback
        };
        let palette = if stdout.is_terminal() {
            palette
        } else {
            Palette::monochrome()
        };
        Self::new(stdout, size, palette)
    }
}

impl<W: Write> Screen for InlineScreen<W> {
    fn size(&mut self) -> Result<Size, MonitorError> {
        Ok(self.size)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), MonitorError> {
        let mut buf = Buffer::empty(Rect::new(0, 0, self.size.width, self.size.height));
        render_frame(frame, &self.palette, &mut buf);
        write_buffer(&mut self.out, &buf, self.palette.is_colored())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes `buf` as text lines, trimming trailing blank cells. With `styled`,
/// colors and bold are emitted as ANSI sequences and reset at each line end.
/// Cells covered by a preceding wide glyph are not printed, so every line
/// occupies at most `buf.area.width` columns.
pub fn write_buffer(out: &mut impl Write, buf: &Buffer, styled: bool) -> std::io::Result<()> {
    let width = buf.area.width as usize;
    if width == 0 {
        return Ok(());
    }
    for row in buf.content.chunks(width) {
        let end = row
            .iter()
            .rposition(|c| c.symbol() != " " || c.bg != Color::Reset)
            .map_or(0, |i| i + 1);
        let mut current: Option<(Color, Color, bool)> = None;
        let mut to_skip = 0;
        for cell in &row[..end] {
            if to_skip > 0 {
                to_skip -= 1;
                continue;
            }
            to_skip = cell.symbol().width().saturating_sub(1);
            if styled {
                let style = cell_style(cell);
                if current != Some(style) {
                    let (fg, bg, bold) = style;
                    queue!(
                        out,
                        SetAttribute(Attribute::Reset),
                        SetForegroundColor(fg.into()),
                        SetBackgroundColor(bg.into())
                    )?;
                    if bold {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    current = Some(style);
                }
            }
            queue!(out, Print(cell.symbol()))?;
        }
        if styled && current.is_some() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}

fn cell_style(cell: &Cell) -> (Color, Color, bool) {
    (cell.fg, cell.bg, cell.modifier.contains(Modifier::BOLD))
}
