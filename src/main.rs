use anyhow::Result;
use clap::Parser;
use std::sync::Mutex;
use sysdash::config::{AppConfig, LoggingConfig};
use sysdash::refresh::{RefreshLoop, RefreshMode, spawn_shutdown_listener};
use sysdash::render::{InlineScreen, Palette, TerminalScreen, install_panic_hook};
use sysdash::sysinfo_repo::SysinfoRepo;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Terminal system monitor: CPU, memory, disk, network and top processes.
#[derive(Parser, Debug)]
#[command(name = "sysdash", version, about, long_about = None)]
struct Args {
    /// Live monitoring, refreshed every second (q, Esc or Ctrl+C to exit)
    #[arg(long, conflicts_with = "fast")]
    live: bool,

    /// Live monitoring, refreshed every half second
    #[arg(long)]
    fast: bool,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// The dashboard owns stdout: logs go to the configured file, else stderr for a
/// single report, else nowhere while the live screen is up.
fn init_logging(logging: &LoggingConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, ansi) = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("opening log file {}: {}", path.display(), e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if interactive => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let app_config = AppConfig::load()?;

    let mode = if args.fast {
        RefreshMode::Continuous {
            period: app_config.refresh.fast_interval(),
        }
    } else if args.live {
        RefreshMode::Continuous {
            period: app_config.refresh.live_interval(),
        }
    } else {
        RefreshMode::SingleShot
    };
    init_logging(
        &app_config.logging,
        matches!(mode, RefreshMode::Continuous { .. }),
    )?;

    let palette = Palette::detect();
    let source = SysinfoRepo::new(app_config.sampling.clone());
    let mut refresh_loop = RefreshLoop::new(source, &app_config);

    match mode {
        RefreshMode::SingleShot => {
            let screen = InlineScreen::stdout(&app_config.display, palette);
            refresh_loop.run_once(screen).await?;
        }
        RefreshMode::Continuous { period } => {
            tracing::info!(period_ms = period.as_millis() as u64, "starting live monitor");
            install_panic_hook();
            let screen = TerminalScreen::acquire(palette)?;
            let (shutdown_rx, listener) = spawn_shutdown_listener(true);
            let result = refresh_loop.run_continuous(period, screen, shutdown_rx).await;
            listener.abort();
            let summary = result?;
            tracing::info!(frames = summary.frames, "monitoring stopped");
            println!("Monitoring stopped.");
        }
    }

    Ok(())
}
