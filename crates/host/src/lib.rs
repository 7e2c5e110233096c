//! i3bar-protocol host for `bar`.
//!
//! Owns the tick loop and wires together:
//! - the module list (polled once per tick)
//! - stdin click events (routed to modules as gestures)
//! - stdout status lines (one JSON array per frame)
//!
//! Module calls block on D-Bus and child processes, so every step runs on
//! the blocking pool with the whole [`Bar`] moved in and handed back.  A click
//! runs on its own blocking task with only its module checked out, so an open
//! menu does not stall the other modules.

pub mod bar;
pub mod protocol;

pub use bar::{Bar, Dispatch};
pub use protocol::{Block, ClickEvent, Header};

use bar_config::BarConfig;
use bar_core::{BarError, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Shortest accepted poll interval.
const MIN_INTERVAL_MS: u64 = 100;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the bar until stdout closes.
pub async fn run(config: BarConfig) -> Result<()> {
    let interval = Duration::from_millis(config.global.interval_ms.max(MIN_INTERVAL_MS));

    let mut bar = blocking(move || Bar::from_config(&config)).await?;
    if bar.is_empty() {
        warn!("No modules loaded; the bar will stay empty");
    }
    info!(modules = bar.len(), ?interval, "Bar running");

    let mut out = tokio::io::stdout();
    let header = serde_json::to_string(&Header::default()).map_err(encode_error)?;
    emit(&mut out, &format!("{header}\n[\n")).await?;

    let mut clicks = spawn_click_reader();
    let mut dispatches: JoinSet<Dispatch> = JoinSet::new();
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = clicks.recv() => {
                if let Some(dispatch) = bar.checkout(&event) {
                    dispatches.spawn_blocking(move || dispatch.run());
                }
                // Redraw once the click has been handled.
                continue;
            }
            Some(done) = dispatches.join_next() => {
                let dispatch = done.map_err(|e| BarError::Runtime(format!("click task failed: {e}")))?;
                bar.checkin(dispatch);
            }
        }

        let (next, blocks) = blocking(move || {
            bar.update_all();
            let blocks = bar.blocks();
            (bar, blocks)
        })
        .await?;
        bar = next;

        let line = serde_json::to_string(&blocks).map_err(encode_error)?;
        emit(&mut out, &format!("{line},\n")).await?;
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Run `f` on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BarError::Runtime(format!("worker task failed: {e}")))
}

async fn emit(out: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

fn encode_error(e: serde_json::Error) -> BarError {
    BarError::Runtime(format!("cannot encode status line: {e}"))
}

/// Spawn a task that parses click events from stdin.
///
/// The channel closes when stdin does; the bar keeps ticking without input.
fn spawn_click_reader() -> mpsc::Receiver<ClickEvent> {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(event) = protocol::parse_click(&line) {
                        if tx.send(event).await.is_err() {
                            return; // receiver dropped
                        }
                    }
                }
                Ok(None) => {
                    info!("stdin closed; click events disabled");
                    return;
                }
                Err(e) => {
                    warn!("cannot read click events: {e}");
                    return;
                }
            }
        }
    });

    rx
}
