// System metrics via sysinfo; the production MetricsSource

mod linux;

use crate::config::SamplingConfig;
use crate::error::MonitorError;
use crate::models::*;
use crate::source::MetricsSource;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Disks, Networks, ProcessesToUpdate, System};
use tracing::instrument;

/// Host identity, read once at startup.
#[derive(Debug, Clone)]
struct HostIdentity {
    hostname: String,
    os_name: String,
    distro: Option<String>,
}

/// Each metric group owns its own sysinfo handle so groups can be sampled concurrently.
pub struct SysinfoRepo {
    cpu_sys: Arc<Mutex<System>>,
    mem_sys: Arc<Mutex<System>>,
    proc_sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    networks: Arc<Mutex<Networks>>,
    last_cpu_refresh: Arc<Mutex<Option<Instant>>>,
    last_network: Arc<Mutex<Option<(u64, u64, Instant)>>>,
    identity: HostIdentity,
    config: SamplingConfig,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

impl SysinfoRepo {
    pub fn new(config: SamplingConfig) -> Self {
        let mut cpu_sys = System::new();
        cpu_sys.refresh_cpu_all();
        let mut proc_sys = System::new();
        proc_sys.refresh_memory();
        proc_sys.refresh_processes(ProcessesToUpdate::All, true);

        let name = System::name().unwrap_or_else(|| std::env::consts::OS.into());
        let os_name = match System::kernel_version() {
            Some(kernel) if !kernel.is_empty() => format!("{} {}", name, kernel),
            _ => name,
        };
        let identity = HostIdentity {
            hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
            os_name,
            distro: linux::read_os_pretty_name_linux(),
        };

        Self {
            cpu_sys: Arc::new(Mutex::new(cpu_sys)),
            mem_sys: Arc::new(Mutex::new(System::new())),
            proc_sys: Arc::new(Mutex::new(proc_sys)),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            last_cpu_refresh: Arc::new(Mutex::new(Some(Instant::now()))),
            last_network: Arc::new(Mutex::new(None)),
            identity,
            config,
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_stats"))]
    pub async fn get_cpu_stats(&self) -> anyhow::Result<CpuStats> {
        let sys = self.cpu_sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let mut last = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu refresh lock poisoned: {}", e))?;

            // Usage is a delta between two refreshes; too short a gap reads as 0%.
            if let Some(prev) = *last {
                let elapsed = prev.elapsed();
                if elapsed < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
                    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - elapsed);
                }
            }
            sys.refresh_cpu_all();
            *last = Some(Instant::now());

            let per_core_pct: Vec<f64> = sys
                .cpus()
                .iter()
                .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
                .collect();
            anyhow::ensure!(!per_core_pct.is_empty(), "no CPUs reported");

            Ok(CpuStats {
                overall_pct: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                per_core_pct,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_stats"))]
    pub async fn get_memory_stats(&self) -> anyhow::Result<MemoryStats> {
        let sys = self.mem_sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            anyhow::ensure!(total > 0, "total memory reported as 0");
            let available = sys.available_memory();
            let used = total.saturating_sub(available);

            Ok(MemoryStats {
                used_pct: percent(used, total),
                total_bytes: total,
                available_bytes: available,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_disk_stats"))]
    pub async fn get_disk_stats(&self) -> anyhow::Result<DiskStats> {
        let disks = self.disks.clone();
        let mount = self.config.disk_mount.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);
            let disk = disks_guard
                .list()
                .iter()
                .find(|d| d.mount_point() == std::path::Path::new(&mount))
                .ok_or_else(|| anyhow::anyhow!("no disk mounted at {}", mount))?;

            let total = disk.total_space();
            let free = disk.available_space();
            Ok(DiskStats {
                mount,
                used_pct: percent(total.saturating_sub(free), total),
                free_bytes: free,
                total_bytes: total,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_network_stats"))]
    pub async fn get_network_stats(&self) -> anyhow::Result<NetworkStats> {
        let networks = self.networks.clone();
        let last_network = self.last_network.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);
            anyhow::ensure!(
                !networks_guard.list().is_empty(),
                "no network interfaces found"
            );
            let (bytes_sent, bytes_recv) = networks_guard
                .list()
                .values()
                .fold((0u64, 0u64), |(tx, rx), data| {
                    (
                        tx.saturating_add(data.total_transmitted()),
                        rx.saturating_add(data.total_received()),
                    )
                });

            let now = Instant::now();
            let mut stats = NetworkStats {
                bytes_sent,
                bytes_recv,
                sent_per_sec: 0.0,
                recv_per_sec: 0.0,
            };
            if let Ok(mut guard) = last_network.lock() {
                if let Some((prev_tx, prev_rx, prev_ts)) = *guard {
                    let dt_secs = now.duration_since(prev_ts).as_secs_f64();
                    if dt_secs > 0.0 {
                        stats.sent_per_sec = bytes_sent.saturating_sub(prev_tx) as f64 / dt_secs;
                        stats.recv_per_sec = bytes_recv.saturating_sub(prev_rx) as f64 / dt_secs;
                    }
                }
                *guard = Some((bytes_sent, bytes_recv, now));
            }

            Ok(stats)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Processes above the configured memory share, unordered. Ranking is a display concern.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_process_stats"))]
    pub async fn get_process_stats(&self) -> anyhow::Result<Vec<ProcessStat>> {
        let sys = self.proc_sys.clone();
        let min_mem_pct = self.config.process_min_mem_pct;
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            sys.refresh_processes(ProcessesToUpdate::All, true);

            let total = sys.total_memory();
            anyhow::ensure!(total > 0, "total memory reported as 0");
            Ok(sys
                .processes()
                .iter()
                .filter_map(|(pid, p)| {
                    let mem_pct = percent(p.memory(), total);
                    (mem_pct > min_mem_pct).then(|| ProcessStat {
                        pid: pid.as_u32(),
                        name: p.name().to_string_lossy().into_owned(),
                        cpu_pct: p.cpu_usage() as f64,
                        mem_pct,
                    })
                })
                .collect())
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

impl MetricsSource for SysinfoRepo {
    /// Samples all groups concurrently and joins them into one snapshot. Fails only
    /// when every group failed.
    async fn sample(&self) -> Result<Snapshot, MonitorError> {
        let (cpu, memory, disk, network, processes) = tokio::join!(
            self.get_cpu_stats(),
            self.get_memory_stats(),
            self.get_disk_stats(),
            self.get_network_stats(),
            self.get_process_stats(),
        );
        if let (Err(e), Err(_), Err(_), Err(_), Err(_)) =
            (&cpu, &memory, &disk, &network, &processes)
        {
            return Err(MonitorError::SourceUnavailable(format!(
                "every metric group failed, first: {:#}",
                e
            )));
        }

        let load = System::load_average();
        Ok(Snapshot {
            timestamp: chrono::Local::now(),
            hostname: self.identity.hostname.clone(),
            os_name: self.identity.os_name.clone(),
            distro: self.identity.distro.clone(),
            uptime_seconds: System::uptime(),
            load_averages: [load.one, load.five, load.fifteen],
            cpu: cpu.into(),
            memory: memory.into(),
            disk: disk.into(),
            network: network.into(),
            top_processes: processes.into(),
        })
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
