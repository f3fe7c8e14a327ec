// Per-group panel builders

use super::{
    GaugeRow, PLACEHOLDER, Panel, PanelBuilder, PanelKind, PanelSlot, TableContent, TextContent,
    TextLine, format_bytes, format_rate, format_uptime, rank_processes, truncate_to_width,
};
use crate::models::Snapshot;
use crate::version;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

pub(super) fn header_panel(snapshot: &Snapshot) -> Panel {
    Panel {
        slot: PanelSlot::Header,
        title: String::new(),
        kind: PanelKind::Text(TextContent {
            lines: vec![TextLine::plain(format!(
                "{} {} - {}",
                version::NAME,
                version::VERSION,
                snapshot.timestamp.format("%Y-%m-%d %H:%M:%S")
            ))],
            centered: true,
        }),
    }
}

pub(super) fn system_info_panel(snapshot: &Snapshot) -> Panel {
    let cores = snapshot
        .cpu
        .as_available()
        .map(|c| c.per_core_pct.len().to_string())
        .unwrap_or_else(|| PLACEHOLDER.into());
    let memory_total = snapshot
        .memory
        .as_available()
        .map(|m| format!("{:.1} GB", m.total_bytes as f64 / GIB))
        .unwrap_or_else(|| PLACEHOLDER.into());
    let [one, five, fifteen] = snapshot.load_averages;

    let mut lines = vec![
        TextLine::labeled("Hostname", snapshot.hostname.as_str()),
        TextLine::labeled("System", snapshot.os_name.as_str()),
    ];
    if let Some(distro) = &snapshot.distro {
        lines.push(TextLine::labeled("Distro", distro.as_str()));
    }
    lines.extend([
        TextLine::labeled("CPU Cores", cores),
        TextLine::labeled("Uptime", format_uptime(snapshot.uptime_seconds)),
        TextLine::labeled("Memory Total", memory_total),
        TextLine::labeled(
            "Load Average",
            format!("{:.2}, {:.2}, {:.2}", one, five, fifteen),
        ),
    ]);

    Panel {
        slot: PanelSlot::SystemInfo,
        title: "System Information".into(),
        kind: PanelKind::Text(TextContent {
            lines,
            centered: false,
        }),
    }
}

pub(super) fn network_panel(snapshot: &Snapshot) -> Panel {
    let (sent, recv, up, down) = match snapshot.network.as_available() {
        Some(n) => (
            format!("{:.1} MB", n.bytes_sent as f64 / MIB),
            format!("{:.1} MB", n.bytes_recv as f64 / MIB),
            format_rate(n.sent_per_sec),
            format_rate(n.recv_per_sec),
        ),
        None => (
            PLACEHOLDER.into(),
            PLACEHOLDER.into(),
            PLACEHOLDER.into(),
            PLACEHOLDER.into(),
        ),
    };
    Panel {
        slot: PanelSlot::Network,
        title: "Network".into(),
        kind: PanelKind::Text(TextContent {
            lines: vec![
                TextLine::labeled("Net Sent", sent),
                TextLine::labeled("Net Recv", recv),
                TextLine::labeled("Upload", up),
                TextLine::labeled("Download", down),
            ],
            centered: false,
        }),
    }
}

impl PanelBuilder {
    pub fn resources_panel(&self, snapshot: &Snapshot) -> Panel {
        let cpu = match snapshot.cpu.as_available() {
            Some(c) => GaugeRow {
                label: "CPU".into(),
                value: Some(self.gauge_value(c.overall_pct)),
                detail: format!("{} cores", c.per_core_pct.len()),
            },
            None => placeholder_row("CPU"),
        };
        let memory = match snapshot.memory.as_available() {
            Some(m) => GaugeRow {
                label: "Memory".into(),
                value: Some(self.gauge_value(m.used_pct)),
                detail: format!("{} free", format_bytes(m.available_bytes)),
            },
            None => placeholder_row("Memory"),
        };
        let disk = match snapshot.disk.as_available() {
            Some(d) => GaugeRow {
                label: "Disk".into(),
                value: Some(self.gauge_value(d.used_pct)),
                detail: format!("{} free on {}", format_bytes(d.free_bytes), d.mount),
            },
            None => placeholder_row("Disk"),
        };

        Panel {
            slot: PanelSlot::Resources,
            title: "Resource Usage".into(),
            kind: PanelKind::Gauges(vec![cpu, memory, disk]),
        }
    }

    pub fn cpu_cores_panel(&self, snapshot: &Snapshot) -> Panel {
        let rows = match snapshot.cpu.as_available() {
            Some(c) => c
                .per_core_pct
                .iter()
                .enumerate()
                .map(|(i, pct)| GaugeRow {
                    label: format!("Core {:2}", i),
                    value: Some(self.gauge_value(*pct)),
                    detail: String::new(),
                })
                .collect(),
            None => vec![placeholder_row("Cores")],
        };
        Panel {
            slot: PanelSlot::CpuCores,
            title: "CPU Cores".into(),
            kind: PanelKind::Gauges(rows),
        }
    }

    pub fn processes_panel(&self, snapshot: &Snapshot) -> Panel {
        let header: Vec<String> = ["PID", "Name", "CPU%", "MEM%"]
            .into_iter()
            .map(String::from)
            .collect();
        let content = match snapshot.top_processes.as_available() {
            Some(processes) => TableContent {
                header,
                rows: rank_processes(processes, self.max_processes)
                    .into_iter()
                    .map(|p| {
                        vec![
                            p.pid.to_string(),
                            truncate_to_width(&p.name, self.process_name_width),
                            format!("{:.1}", p.cpu_pct),
                            format!("{:.1}", p.mem_pct),
                        ]
                    })
                    .collect(),
                placeholder: None,
            },
            None => TableContent {
                header,
                rows: vec![],
                placeholder: Some(PLACEHOLDER.into()),
            },
        };
        Panel {
            slot: PanelSlot::Processes,
            title: "Top Processes".into(),
            kind: PanelKind::Table(content),
        }
    }
}

fn placeholder_row(label: &str) -> GaugeRow {
    GaugeRow {
        label: label.into(),
        value: None,
        detail: String::new(),
    }
}
