// Refresh loop: sampling cadence, frame composition and screen replacement.
// One task drives everything; the only suspension points are sampling and the
// inter-cycle wait, and both race the shutdown signal.

mod shutdown;

pub use shutdown::{is_quit_key, spawn_shutdown_listener};

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{MissedTickBehavior, interval};
use tracing::instrument;

use crate::config::AppConfig;
use crate::error::MonitorError;
use crate::layout::LayoutComposer;
use crate::models::Snapshot;
use crate::panel::PanelBuilder;
use crate::render::Screen;
use crate::source::MetricsSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Sample once, render once, return.
    SingleShot,
    /// Sample and render every `period` until shut down.
    Continuous { period: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
}

pub struct RefreshLoop<S> {
    source: S,
    builder: PanelBuilder,
    composer: LayoutComposer,
}

impl<S: MetricsSource> RefreshLoop<S> {
    pub fn new(source: S, config: &AppConfig) -> Self {
        Self {
            source,
            builder: PanelBuilder::from_config(config),
            composer: LayoutComposer::new(&config.display),
        }
    }

    /// Runs until done, shut down, or a fatal error. The screen is consumed and
    /// dropped on return, which restores any terminal state it changed.
    pub async fn run<D: Screen>(
        &mut self,
        mode: RefreshMode,
        screen: D,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Result<LoopSummary, MonitorError> {
        match mode {
            RefreshMode::SingleShot => self.run_once(screen).await,
            RefreshMode::Continuous { period } => {
                self.run_continuous(period, screen, shutdown_rx).await
            }
        }
    }

    pub async fn run_once<D: Screen>(&mut self, mut screen: D) -> Result<LoopSummary, MonitorError> {
        let snapshot = self.source.sample().await?;
        self.render(&mut screen, snapshot)?;
        Ok(LoopSummary { frames: 1 })
    }

    /// A cycle that overruns `period` is followed immediately by the next one;
    /// missed ticks are skipped, never queued.
    #[instrument(skip_all, fields(period_ms = period.as_millis() as u64))]
    pub async fn run_continuous<D: Screen>(
        &mut self,
        period: Duration,
        mut screen: D,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) -> Result<LoopSummary, MonitorError> {
        let mut tick = interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => {
                    tracing::debug!(frames, "refresh loop shutting down");
                    break;
                }
                _ = tick.tick() => {}
            }

            let snapshot = tokio::select! {
                biased;
                _ = &mut shutdown_rx => {
                    tracing::debug!(frames, "refresh loop shutting down during sampling");
                    break;
                }
                result = self.source.sample() => match result {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        tracing::error!(error = %e, operation = "sample", "metrics source failed");
                        return Err(e);
                    }
                },
            };

            if let Err(e) = self.render(&mut screen, snapshot) {
                tracing::error!(error = %e, operation = "present", "frame could not be presented");
                return Err(e);
            }
            frames += 1;
        }

        Ok(LoopSummary { frames })
    }

    /// Build, compose and present one frame. The snapshot and panels are dropped
    /// here; only the screen keeps what it needs to replace the frame next cycle.
    fn render<D: Screen>(&mut self, screen: &mut D, snapshot: Snapshot) -> Result<(), MonitorError> {
        for (group, reason) in snapshot.unavailable_groups() {
            tracing::warn!(
                group = %group,
                reason,
                operation = "sample",
                "metric group unavailable this cycle"
            );
        }
        let panels = self.builder.build_all(&snapshot);
        let size = screen.size()?;
        let frame = self.composer.compose(size, panels);
        screen.present(&frame)
    }
}
