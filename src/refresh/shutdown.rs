// Shutdown signal: Ctrl-C / SIGTERM, and quit keys while the terminal is in raw mode

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use tokio::sync::oneshot;

/// Spawns a task that fires the returned receiver once on the first shutdown
/// request. With `watch_keys`, `q`, `Esc` and `Ctrl+C` key presses count too;
/// raw mode delivers Ctrl+C as a key rather than a signal.
pub fn spawn_shutdown_listener(
    watch_keys: bool,
) -> (oneshot::Receiver<()>, tokio::task::JoinHandle<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let reason = tokio::select! {
            _ = tokio::signal::ctrl_c() => "interrupt signal",
            _ = terminate() => "terminate signal",
            _ = quit_key(watch_keys) => "quit key",
        };
        tracing::info!(reason, "shutdown requested");
        let _ = shutdown_tx.send(());
    });
    (shutdown_rx, handle)
}

async fn terminate() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        std::future::pending::<()>().await;
    }
}

async fn quit_key(watch_keys: bool) {
    if !watch_keys {
        return std::future::pending().await;
    }
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if is_quit_key(&key) => return,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "terminal event stream failed; quit keys disabled");
                break;
            }
        }
    }
    std::future::pending().await
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
