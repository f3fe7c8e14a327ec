// Frame rendering and the screens frames are presented on

mod inline;
mod palette;
mod terminal;

pub use inline::{InlineScreen, write_buffer};
pub use palette::Palette;
pub use terminal::{TerminalScreen, install_panic_hook};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Rect, Size};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Row, Table, Widget};
use unicode_width::UnicodeWidthStr;

use crate::error::MonitorError;
use crate::layout::Frame;
use crate::panel::{GaugeRow, PLACEHOLDER, Panel, PanelKind, PanelSlot, TableContent, TextContent};

const BAR_FILLED: &str = "█";
const BAR_EMPTY: &str = "░";

/// Output target for frames. Each `present` replaces the previous frame as a whole.
///
/// Implementations that change terminal modes restore them when dropped, so the
/// refresh loop takes the screen by value and every exit path releases it.
pub trait Screen {
    fn size(&mut self) -> Result<Size, MonitorError>;
    fn present(&mut self, frame: &Frame) -> Result<(), MonitorError>;
}

/// Draws every placed panel into `buf`. Areas outside the buffer are clipped.
pub fn render_frame(frame: &Frame, palette: &Palette, buf: &mut Buffer) {
    for placed in &frame.panels {
        let area = placed.area.intersection(buf.area);
        if area.is_empty() {
            continue;
        }
        render_panel(&placed.panel, area, palette, buf);
    }
}

pub fn render_panel(panel: &Panel, area: Rect, palette: &Palette, buf: &mut Buffer) {
    let mut block = Block::bordered().border_style(palette.border(panel.slot));
    if !panel.title.is_empty() {
        block = block.title(Span::styled(
            format!(" {} ", panel.title),
            palette.title(panel.slot),
        ));
    }

    match &panel.kind {
        PanelKind::Text(text) => text_widget(panel.slot, text, palette)
            .block(block)
            .render(area, buf),
        PanelKind::Gauges(rows) => {
            let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
            let lines: Vec<Line> = rows
                .iter()
                .map(|row| gauge_line(row, label_width, palette))
                .collect();
            Paragraph::new(lines).block(block).render(area, buf)
        }
        PanelKind::Table(table) => table_widget(table, palette).block(block).render(area, buf),
    }
}

fn text_widget<'a>(slot: PanelSlot, text: &'a TextContent, palette: &Palette) -> Paragraph<'a> {
    let lines: Vec<Line> = text
        .lines
        .iter()
        .map(|line| {
            let value_style = if line.value == PLACEHOLDER {
                palette.placeholder()
            } else if slot == PanelSlot::Header {
                palette.banner()
            } else {
                Default::default()
            };
            match &line.label {
                Some(label) => Line::from(vec![
                    Span::styled(format!("{}: ", label), palette.label()),
                    Span::styled(line.value.as_str(), value_style),
                ]),
                None => Line::from(Span::styled(line.value.as_str(), value_style)),
            }
        })
        .collect();
    let paragraph = Paragraph::new(lines);
    if text.centered {
        paragraph.alignment(Alignment::Center)
    } else {
        paragraph
    }
}

fn gauge_line<'a>(row: &'a GaugeRow, label_width: usize, palette: &Palette) -> Line<'a> {
    let label = Span::styled(
        format!("{:<width$} ", row.label, width = label_width),
        palette.label(),
    );
    let Some(value) = row.value else {
        return Line::from(vec![label, Span::styled(PLACEHOLDER, palette.placeholder())]);
    };
    let mut spans = vec![
        label,
        Span::styled(BAR_FILLED.repeat(value.filled), palette.band(value.band)),
        Span::styled(
            BAR_EMPTY.repeat(value.width.saturating_sub(value.filled)),
            palette.detail(),
        ),
        Span::raw(format!(" {:5.1}%", value.pct)),
    ];
    if !row.detail.is_empty() {
        spans.push(Span::styled(format!("  {}", row.detail), palette.detail()));
    }
    Line::from(spans)
}

fn table_widget<'a>(table: &'a TableContent, palette: &Palette) -> Table<'a> {
    let widths: Vec<Constraint> = table
        .header
        .iter()
        .enumerate()
        .map(|(col, title)| {
            let widest = table
                .rows
                .iter()
                .filter_map(|r| r.get(col))
                .map(|cell| cell.width())
                .chain(std::iter::once(title.width()))
                .max()
                .unwrap_or(0);
            Constraint::Length(widest as u16 + 1)
        })
        .collect();

    let header = Row::new(table.header.iter().map(String::as_str)).style(palette.table_header());
    let rows: Vec<Row> = match &table.placeholder {
        Some(placeholder) => vec![Row::new([placeholder.as_str()]).style(palette.placeholder())],
        None => table
            .rows
            .iter()
            .map(|r| Row::new(r.iter().map(String::as_str)))
            .collect(),
    };
    Table::new(rows, widths).header(header)
}
