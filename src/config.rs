use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "sysdash.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
    pub thresholds: ThresholdConfig,
    pub sampling: SamplingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Period of `--live` mode.
    pub live_interval_ms: u64,
    /// Period of `--fast` mode.
    pub fast_interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            live_interval_ms: 1000,
            fast_interval_ms: 500,
        }
    }
}

impl RefreshConfig {
    pub fn live_interval(&self) -> Duration {
        Duration::from_millis(self.live_interval_ms)
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width of every gauge bar, in cells.
    pub bar_width: usize,
    pub max_processes: usize,
    pub process_name_width: usize,
    /// Below these dimensions the grid collapses to a single column.
    pub min_grid_width: u16,
    pub min_grid_height: u16,
    /// Canvas size for single-shot output when stdout is not a terminal.
    pub fallback_width: u16,
    pub fallback_height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: 20,
            max_processes: 8,
            process_name_width: 14,
            min_grid_width: 80,
            min_grid_height: 24,
            fallback_width: 100,
            fallback_height: 40,
        }
    }
}

/// Color banding for gauges: below `warn_pct` is normal, above `critical_pct` is critical.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub warn_pct: f64,
    pub critical_pct: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warn_pct: 60.0,
            critical_pct: 85.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Processes using less memory than this are not collected.
    pub process_min_mem_pct: f64,
    /// Mount point whose usage feeds the disk gauge.
    pub disk_mount: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            process_min_mem_pct: 0.1,
            disk_mount: "/".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path. The dashboard owns stdout, so without a file logs go to
    /// stderr in single-shot mode and nowhere in continuous mode.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads from `CONFIG_FILE`, or `sysdash.toml` in the working directory.
    /// A missing default file yields the built-in defaults; a missing file named
    /// by `CONFIG_FILE` is an error.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => {
                if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
                    Self::load_from_path(DEFAULT_CONFIG_FILE)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.refresh.live_interval_ms > 0,
            "refresh.live_interval_ms must be > 0, got {}",
            self.refresh.live_interval_ms
        );
        anyhow::ensure!(
            self.refresh.fast_interval_ms > 0,
            "refresh.fast_interval_ms must be > 0, got {}",
            self.refresh.fast_interval_ms
        );
        anyhow::ensure!(
            (1..=200).contains(&self.display.bar_width),
            "display.bar_width must be between 1 and 200, got {}",
            self.display.bar_width
        );
        anyhow::ensure!(
            (1..=100).contains(&self.display.max_processes),
            "display.max_processes must be between 1 and 100, got {}",
            self.display.max_processes
        );
        anyhow::ensure!(
            self.display.process_name_width > 0,
            "display.process_name_width must be > 0, got {}",
            self.display.process_name_width
        );
        anyhow::ensure!(
            self.display.fallback_width > 0 && self.display.fallback_height > 0,
            "display.fallback_width and display.fallback_height must be > 0, got {}x{}",
            self.display.fallback_width,
            self.display.fallback_height
        );
        anyhow::ensure!(
            self.thresholds.warn_pct >= 0.0
                && self.thresholds.warn_pct < self.thresholds.critical_pct
                && self.thresholds.critical_pct <= 100.0,
            "thresholds must satisfy 0 <= warn_pct < critical_pct <= 100, got warn_pct={} critical_pct={}",
            self.thresholds.warn_pct,
            self.thresholds.critical_pct
        );
        anyhow::ensure!(
            self.sampling.process_min_mem_pct >= 0.0,
            "sampling.process_min_mem_pct must be >= 0, got {}",
            self.sampling.process_min_mem_pct
        );
        anyhow::ensure!(
            !self.sampling.disk_mount.is_empty(),
            "sampling.disk_mount must be non-empty"
        );
        Ok(())
    }
}
