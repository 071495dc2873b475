//! Serve command - preview server with rebuild on change

use std::{
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{Builder, CachedPortfolio, Portfolio};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use tokio::{net::TcpListener, sync::mpsc};

use super::build::print_stats;
use crate::server::create_router;

/// Debounce interval for file changes.
const DEBOUNCE_MS: u64 = 200;

/// Run the serve command.
///
/// Builds once, serves the output directory and the live model, and rebuilds
/// whenever the content root changes.
pub async fn run(config_path: &Path, port: u16) -> Result<()> {
    tracing::info!(?config_path, port, "Starting preview server");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let output_dir = Path::new(&config.build.output_dir).to_path_buf();
    let content_dir = config.content.root.clone();

    tracing::info!("Running initial build...");
    let builder = Builder::new(config.clone(), &output_dir);
    let stats = builder.build().wrap_err("Build failed")?;
    print_stats(&stats);

    let state = Arc::new(CachedPortfolio::new(Portfolio::from_config(&config)));

    // Setup file watcher
    let (tx, mut rx) = mpsc::channel::<()>(16);

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res
                && matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                )
            {
                let _ = tx.blocking_send(());
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    watcher
        .watch(&content_dir, RecursiveMode::Recursive)
        .wrap_err("Failed to watch content directory")?;
    tracing::debug!(dir = %content_dir.display(), "Watching content directory");

    // Start rebuild task
    let rebuild_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut last_rebuild = Instant::now();

        while next_change(&mut rx, last_rebuild).await {
            println!();
            println!("  Content change detected, rebuilding...");
            rebuild_state.invalidate();

            let builder = Builder::new(config.clone(), &output_dir);
            match tokio::task::spawn_blocking(move || builder.build()).await {
                Ok(Ok(stats)) => {
                    println!(
                        "  ✓ Rebuilt {} collections in {}ms",
                        stats.collections, stats.duration_ms
                    );
                }
                Ok(Err(e)) => {
                    tracing::error!("Rebuild failed: {e}");
                    eprintln!("  ✗ Rebuild failed: {e}");
                }
                Err(e) => tracing::error!("Rebuild task panicked: {e}"),
            }

            last_rebuild = Instant::now();
        }
    });

    let app = create_router(builder.output_dir(), state);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Preview server running at http://{addr}");
    println!("  Model API at http://{addr}/api/collections");
    println!("  Press Ctrl+C to stop");
    println!();

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

/// Wait for the next batch of content changes.
///
/// A change inside the debounce window is held until the window closes, then
/// everything queued so far is folded into one rebuild. Returns `false` once
/// the watcher has gone away.
async fn next_change(rx: &mut mpsc::Receiver<()>, last_rebuild: Instant) -> bool {
    if rx.recv().await.is_none() {
        return false;
    }

    let window = Duration::from_millis(DEBOUNCE_MS);
    if let Some(remaining) = window.checked_sub(last_rebuild.elapsed()) {
        tokio::time::sleep(remaining).await;
    }

    while rx.try_recv().is_ok() {}
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_change_inside_window_is_delayed_not_dropped() {
        let (tx, mut rx) = mpsc::channel(16);
        let last_rebuild = Instant::now();

        tx.send(()).await.expect("send");
        tx.send(()).await.expect("send");
        tx.send(()).await.expect("send");

        assert!(next_change(&mut rx, last_rebuild).await);
        assert!(last_rebuild.elapsed() >= Duration::from_millis(DEBOUNCE_MS));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_change_after_window_is_immediate() {
        let (tx, mut rx) = mpsc::channel(16);
        let last_rebuild = Instant::now()
            .checked_sub(Duration::from_millis(DEBOUNCE_MS * 5))
            .expect("instant");

        tx.send(()).await.expect("send");
        let started = Instant::now();
        assert!(next_change(&mut rx, last_rebuild).await);
        assert!(started.elapsed() < Duration::from_millis(DEBOUNCE_MS));
    }

    #[tokio::test]
    async fn test_closed_watcher_stops_loop() {
        let (tx, mut rx) = mpsc::channel::<()>(1);
        drop(tx);
        assert!(!next_change(&mut rx, Instant::now()).await);
    }
}
