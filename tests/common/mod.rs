// Shared test helpers: synthetic snapshots, scripted sources, recording screens
#![allow(dead_code)]

use chrono::{Local, TimeZone};
use ratatui::layout::Size;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use sysdash::error::MonitorError;
use sysdash::layout::Frame;
use sysdash::models::*;
use sysdash::render::Screen;
use sysdash::source::MetricsSource;
use tokio::sync::oneshot;

pub fn process(pid: u32, name: &str, cpu_pct: f64, mem_pct: f64) -> ProcessStat {
    ProcessStat {
        pid,
        name: name.into(),
        cpu_pct,
        mem_pct,
    }
}

/// cpu 42%, memory 77%, disk 10%, four cores, a handful of processes out of order.
pub fn synthetic_snapshot() -> Snapshot {
    Snapshot {
        timestamp: Local.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap(),
        hostname: "testhost".into(),
        os_name: "Linux 6.8.0".into(),
        distro: Some("Debian GNU/Linux 12 (bookworm)".into()),
        uptime_seconds: 2 * 86_400 + 5 * 3_600 + 7 * 60,
        load_averages: [0.5, 0.75, 1.25],
        cpu: Reading::Available(CpuStats {
            overall_pct: 42.0,
            per_core_pct: vec![10.0, 55.0, 70.0, 99.0],
        }),
        memory: Reading::Available(MemoryStats {
            used_pct: 77.0,
            total_bytes: 16 * 1024 * 1024 * 1024,
            available_bytes: 4 * 1024 * 1024 * 1024,
        }),
        disk: Reading::Available(DiskStats {
            mount: "/".into(),
            used_pct: 10.0,
            free_bytes: 90 * 1024 * 1024 * 1024,
            total_bytes: 100 * 1024 * 1024 * 1024,
        }),
        network: Reading::Available(NetworkStats {
            bytes_sent: 10 * 1024 * 1024,
            bytes_recv: 20 * 1024 * 1024,
            sent_per_sec: 1024.0,
            recv_per_sec: 2048.0,
        }),
        top_processes: Reading::Available(vec![
            process(300, "postgres", 1.0, 5.0),
            process(42, "firefox", 12.5, 20.0),
            process(7, "systemd", 0.0, 5.0),
            process(1200, "a-very-long-process-name", 3.0, 0.5),
            process(88, "code", 8.0, 12.0),
        ]),
    }
}

/// Yields the synthetic snapshot with cpu usage and timestamp varying per call.
pub struct CyclingSource {
    calls: Mutex<u64>,
}

impl CyclingSource {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }
}

impl MetricsSource for CyclingSource {
    async fn sample(&self) -> Result<Snapshot, MonitorError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        let mut snapshot = synthetic_snapshot();
        snapshot.timestamp += chrono::Duration::seconds(n as i64);
        snapshot.cpu = Reading::Available(CpuStats {
            overall_pct: (n * 10 % 100) as f64,
            per_core_pct: vec![(n * 5 % 100) as f64; 4],
        });
        Ok(snapshot)
    }
}

/// Returns queued results in order, then the synthetic snapshot.
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<Snapshot, MonitorError>>>,
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<Snapshot, MonitorError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }
}

impl MetricsSource for ScriptedSource {
    async fn sample(&self) -> Result<Snapshot, MonitorError> {
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(synthetic_snapshot()))
    }
}

#[derive(Debug)]
pub enum ScreenEvent {
    Presented(Frame),
    Restored,
}

/// Shared record of what a `RecordingScreen` saw; outlives the screen itself.
#[derive(Clone, Default)]
pub struct ScreenLog(Arc<Mutex<Vec<ScreenEvent>>>);

impl ScreenLog {
    pub fn frames(&self) -> Vec<Frame> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ScreenEvent::Presented(f) => Some(f.clone()),
                ScreenEvent::Restored => None,
            })
            .collect()
    }

    pub fn restored(&self) -> bool {
        matches!(self.0.lock().unwrap().last(), Some(ScreenEvent::Restored))
    }

    pub fn restore_count(&self) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, ScreenEvent::Restored))
            .count()
    }
}

/// In-memory screen. Records frames, records `Restored` when dropped, can signal
/// shutdown after a number of frames, and can fail on a given present call.
pub struct RecordingScreen {
    size: Size,
    log: ScreenLog,
    stop_after: Option<(usize, oneshot::Sender<()>)>,
    fail_on_present: Option<usize>,
    presented: usize,
}

impl RecordingScreen {
    pub fn new(width: u16, height: u16, log: ScreenLog) -> Self {
        Self {
            size: Size::new(width, height),
            log,
            stop_after: None,
            fail_on_present: None,
            presented: 0,
        }
    }

    pub fn stop_after(mut self, frames: usize, shutdown_tx: oneshot::Sender<()>) -> Self {
        self.stop_after = Some((frames, shutdown_tx));
        self
    }

    pub fn fail_on_present(mut self, nth: usize) -> Self {
        self.fail_on_present = Some(nth);
        self
    }
}

impl Screen for RecordingScreen {
    fn size(&mut self) -> Result<Size, MonitorError> {
        Ok(self.size)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), MonitorError> {
        self.presented += 1;
        if self.fail_on_present == Some(self.presented) {
            return Err(MonitorError::Terminal(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "terminal went away",
            )));
        }
        self.log
            .0
            .lock()
            .unwrap()
            .push(ScreenEvent::Presented(frame.clone()));
        let reached = matches!(&self.stop_after, Some((n, _)) if self.presented >= *n);
        if reached && let Some((_, tx)) = self.stop_after.take() {
            let _ = tx.send(());
        }
        Ok(())
    }
}

impl Drop for RecordingScreen {
    fn drop(&mut self) {
        self.log.0.lock().unwrap().push(ScreenEvent::Restored);
    }
}
