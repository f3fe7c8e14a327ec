// Metrics source seam: the refresh loop only sees this trait

use std::future::Future;

use crate::error::MonitorError;
use crate::models::Snapshot;

/// Produces one snapshot per call.
///
/// A subsystem that cannot be read (e.g. network counters behind a permission
/// error) is reported as `Reading::Unavailable` inside an otherwise complete
/// snapshot. `Err` means the source as a whole is unusable and is fatal.
pub trait MetricsSource {
    fn sample(&self) -> impl Future<Output = Result<Snapshot, MonitorError>> + Send;
}
