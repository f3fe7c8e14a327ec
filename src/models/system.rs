// CPU, memory and the full snapshot

use chrono::{DateTime, Local};

use super::{DiskStats, MetricGroup, NetworkStats, ProcessStat, Reading};

#[derive(Debug, Clone, PartialEq)]
pub struct CpuStats {
    pub overall_pct: f64,
    pub per_core_pct: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStats {
    pub used_pct: f64,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// All metrics for one sampling instant. Built once by a `MetricsSource`, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub hostname: String,
    /// OS name and kernel release, e.g. "Linux 6.8.0".
    pub os_name: String,
    /// Distribution pretty name, when the host exposes one.
    pub distro: Option<String>,
    pub uptime_seconds: u64,
    pub load_averages: [f64; 3],
    pub cpu: Reading<CpuStats>,
    pub memory: Reading<MemoryStats>,
    pub disk: Reading<DiskStats>,
    pub network: Reading<NetworkStats>,
    pub top_processes: Reading<Vec<ProcessStat>>,
}

impl Snapshot {
    /// Groups marked unavailable, with their reasons, in a fixed order.
    pub fn unavailable_groups(&self) -> Vec<(MetricGroup, &str)> {
        [
            (MetricGroup::Cpu, self.cpu.unavailable_reason()),
            (MetricGroup::Memory, self.memory.unavailable_reason()),
            (MetricGroup::Disk, self.disk.unavailable_reason()),
            (MetricGroup::Network, self.network.unavailable_reason()),
            (MetricGroup::Processes, self.top_processes.unavailable_reason()),
        ]
        .into_iter()
        .filter_map(|(group, reason)| reason.map(|r| (group, r)))
        .collect()
    }
}
