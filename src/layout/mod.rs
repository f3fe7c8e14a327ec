// Layout composition: fixed slot grid per terminal size

use ratatui::layout::{Constraint, Layout, Rect, Size};

use crate::config::DisplayConfig;
use crate::panel::{Panel, PanelSlot};

const HEADER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Header, then [system | resources | network], then [cpu cores | processes].
    Grid,
    /// Everything stacked; used when the terminal is below the grid minimum.
    SingleColumn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPanel {
    pub slot: PanelSlot,
    pub area: Rect,
    pub panel: Panel,
}

/// One composed screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub size: Size,
    pub mode: LayoutMode,
    pub panels: Vec<PlacedPanel>,
}

impl Frame {
    /// Slot positions only, for comparing structure across cycles.
    pub fn layout(&self) -> Vec<(PanelSlot, Rect)> {
        self.panels.iter().map(|p| (p.slot, p.area)).collect()
    }

    pub fn panel(&self, slot: PanelSlot) -> Option<&PlacedPanel> {
        self.panels.iter().find(|p| p.slot == slot)
    }
}

/// Places panels into slot areas. Areas are computed once per terminal size and
/// reused every cycle, so consecutive frames differ only in panel content.
#[derive(Debug)]
pub struct LayoutComposer {
    min_width: u16,
    min_height: u16,
    size: Option<Size>,
    mode: LayoutMode,
    slots: Vec<(PanelSlot, Rect)>,
    narrow_warned: bool,
}

impl LayoutComposer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            min_width: display.min_grid_width,
            min_height: display.min_grid_height,
            size: None,
            mode: LayoutMode::Grid,
            slots: Vec::new(),
            narrow_warned: false,
        }
    }

    pub fn compose(&mut self, size: Size, mut panels: Vec<Panel>) -> Frame {
        if self.size != Some(size) {
            self.recompute(size);
        }

        let placed = self
            .slots
            .iter()
            .filter_map(|&(slot, area)| {
                let idx = panels.iter().position(|p| p.slot == slot)?;
                Some(PlacedPanel {
                    slot,
                    area,
                    panel: panels.swap_remove(idx),
                })
            })
            .collect();
        if !panels.is_empty() {
            tracing::debug!(
                operation = "compose",
                dropped = panels.len(),
                "panels without a slot were not placed"
            );
        }

        Frame {
            size,
            mode: self.mode,
            panels: placed,
        }
    }

    fn recompute(&mut self, size: Size) {
        let area = Rect::new(0, 0, size.width, size.height);
        self.mode = if size.width < self.min_width || size.height < self.min_height {
            LayoutMode::SingleColumn
        } else {
            LayoutMode::Grid
        };
        match self.mode {
            LayoutMode::Grid => {
                self.narrow_warned = false;
                self.slots = grid_slots(area);
            }
            LayoutMode::SingleColumn => {
                if !self.narrow_warned {
                    tracing::warn!(
                        width = size.width,
                        height = size.height,
                        min_width = self.min_width,
                        min_height = self.min_height,
                        "terminal too small for grid layout; using single column"
                    );
                    self.narrow_warned = true;
                }
                self.slots = single_column_slots(area);
            }
        }
        tracing::debug!(operation = "layout", mode = ?self.mode, width = size.width, height = size.height, "layout computed");
        self.size = Some(size);
    }
}

fn grid_slots(area: Rect) -> Vec<(PanelSlot, Rect)> {
    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    let [system, resources, network] = Layout::horizontal([
        Constraint::Percentage(32),
        Constraint::Percentage(43),
        Constraint::Percentage(25),
    ])
    .areas(top);
    let [cores, processes] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    vec![
        (PanelSlot::Header, header),
        (PanelSlot::SystemInfo, system),
        (PanelSlot::Resources, resources),
        (PanelSlot::Network, network),
        (PanelSlot::CpuCores, cores),
        (PanelSlot::Processes, processes),
    ]
}

fn single_column_slots(area: Rect) -> Vec<(PanelSlot, Rect)> {
    let constraints = PanelSlot::ALL.iter().map(|slot| match slot {
        PanelSlot::Header => Constraint::Length(HEADER_HEIGHT),
        _ => Constraint::Fill(1),
    });
    let areas = Layout::vertical(constraints).split(area);
    PanelSlot::ALL.iter().copied().zip(areas.iter().copied()).collect()
}
