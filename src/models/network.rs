// Network counter models

/// Totals summed over all interfaces since boot, plus rates since the previous sample.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    /// Transmit rate in bytes/sec (0 on the first sample).
    pub sent_per_sec: f64,
    /// Receive rate in bytes/sec (0 on the first sample).
    pub recv_per_sec: f64,
}
