// Snapshot data model: one immutable bundle of metrics per sampling instant

mod network;
mod process;
mod reading;
mod storage;
mod system;

pub use network::NetworkStats;
pub use process::ProcessStat;
pub use reading::{MetricGroup, Reading};
pub use storage::DiskStats;
pub use system::{CpuStats, MemoryStats, Snapshot};
