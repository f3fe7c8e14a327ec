// Disk usage model

#[derive(Debug, Clone, PartialEq)]
pub struct DiskStats {
    pub mount: String,
    pub used_pct: f64,
    pub free_bytes: u64,
    pub total_bytes: u64,
}
