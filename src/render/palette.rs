// Colors and text styles, with a monochrome fallback

use ratatui::style::{Color, Modifier, Style};

use crate::panel::{Band, PanelSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn monochrome() -> Self {
        Self { color: false }
    }

    /// Colored when the terminal reports at least 8 colors and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let colors = crossterm::style::available_color_count();
        let palette = if !no_color && colors >= 8 {
            Self::colored()
        } else {
            Self::monochrome()
        };
        tracing::debug!(colors, no_color, color = palette.color, "palette detected");
        palette
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn fg(&self, color: Color) -> Style {
        if self.color {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    pub fn band(&self, band: Band) -> Style {
        self.fg(match band {
            Band::Normal => Color::Green,
            Band::Warning => Color::Yellow,
            Band::Critical => Color::Red,
        })
    }

    pub fn border(&self, slot: PanelSlot) -> Style {
        self.fg(match slot {
            PanelSlot::Header => Color::Blue,
            PanelSlot::SystemInfo => Color::Blue,
            PanelSlot::Resources => Color::Green,
            PanelSlot::Network => Color::Cyan,
            PanelSlot::CpuCores => Color::Yellow,
            PanelSlot::Processes => Color::Red,
        })
    }

    pub fn title(&self, slot: PanelSlot) -> Style {
        self.border(slot).add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn detail(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    pub fn placeholder(&self) -> Style {
        self.fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    }

    pub fn banner(&self) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if self.color {
            style.fg(Color::White).bg(Color::Blue)
        } else {
            style
        }
    }

    pub fn table_header(&self) -> Style {
        self.fg(Color::Red).add_modifier(Modifier::BOLD)
    }
}
