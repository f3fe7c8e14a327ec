// Panel building: pure functions from one snapshot to renderable panels

mod builders;
mod format;
mod gauge;

pub use format::{format_bytes, format_rate, format_uptime, truncate_to_width};
pub use gauge::{Band, band, gauge_fill};

use crate::config::{AppConfig, ThresholdConfig};
use crate::models::{ProcessStat, Snapshot};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "N/A";

/// Fixed screen positions. Every cycle produces exactly one panel per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelSlot {
    Header,
    SystemInfo,
    Resources,
    Network,
    CpuCores,
    Processes,
}

impl PanelSlot {
    pub const ALL: [PanelSlot; 6] = [
        PanelSlot::Header,
        PanelSlot::SystemInfo,
        PanelSlot::Resources,
        PanelSlot::Network,
        PanelSlot::CpuCores,
        PanelSlot::Processes,
    ];
}

/// One renderable unit. Built fresh each cycle and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub slot: PanelSlot,
    pub title: String,
    pub kind: PanelKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Gauges(Vec<GaugeRow>),
    Table(TableContent),
    Text(TextContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeRow {
    pub label: String,
    /// `None` renders the placeholder instead of a bar.
    pub value: Option<GaugeValue>,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeValue {
    pub pct: f64,
    pub filled: usize,
    pub width: usize,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableContent {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Set when the table's data group is unavailable.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub lines: Vec<TextLine>,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub label: Option<String>,
    pub value: String,
}

impl TextLine {
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }
}

/// Display settings the builders need; everything else comes from the snapshot.
#[derive(Debug, Clone)]
pub struct PanelBuilder {
    pub bar_width: usize,
    pub thresholds: ThresholdConfig,
    pub max_processes: usize,
    pub process_name_width: usize,
}

impl PanelBuilder {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            bar_width: config.display.bar_width,
            thresholds: config.thresholds,
            max_processes: config.display.max_processes,
            process_name_width: config.display.process_name_width,
        }
    }

    /// All panels for one snapshot, in `PanelSlot::ALL` order.
    pub fn build_all(&self, snapshot: &Snapshot) -> Vec<Panel> {
        vec![
            builders::header_panel(snapshot),
            builders::system_info_panel(snapshot),
            self.resources_panel(snapshot),
            builders::network_panel(snapshot),
            self.cpu_cores_panel(snapshot),
            self.processes_panel(snapshot),
        ]
    }

    pub fn gauge_value(&self, pct: f64) -> GaugeValue {
        let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
        GaugeValue {
            pct,
            filled: gauge_fill(pct, self.bar_width),
            width: self.bar_width,
            band: band(pct, &self.thresholds),
        }
    }
}

/// Highest memory share first; equal shares by ascending pid. Truncated to `limit`.
pub fn rank_processes(processes: &[ProcessStat], limit: usize) -> Vec<&ProcessStat> {
    let key = |p: &ProcessStat| {
        if p.mem_pct.is_nan() {
            f64::NEG_INFINITY
        } else {
            // -0.0 and 0.0 must tie so the pid decides
            p.mem_pct + 0.0
        }
    };
    let mut ranked: Vec<&ProcessStat> = processes.iter().collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)).then(a.pid.cmp(&b.pid)));
    ranked.truncate(limit);
    ranked
}
