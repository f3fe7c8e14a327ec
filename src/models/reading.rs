// Per-group availability marker

use std::fmt;

/// One metric group of a snapshot: either sampled, or explicitly unavailable for this cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Reading<T> {
    pub fn unavailable(reason: impl fmt::Display) -> Self {
        Reading::Unavailable(reason.to_string())
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Reading::Available(v) => Some(v),
            Reading::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Reading::Available(_) => None,
            Reading::Unavailable(reason) => Some(reason),
        }
    }
}

impl<T> From<anyhow::Result<T>> for Reading<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(v) => Reading::Available(v),
            Err(e) => Reading::unavailable(format!("{:#}", e)),
        }
    }
}

/// Metric groups that can fail independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricGroup {
    Cpu,
    Memory,
    Disk,
    Network,
    Processes,
}

impl MetricGroup {
    pub fn name(&self) -> &'static str {
        match self {
            MetricGroup::Cpu => "cpu",
            MetricGroup::Memory => "memory",
            MetricGroup::Disk => "disk",
            MetricGroup::Network => "network",
            MetricGroup::Processes => "processes",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
