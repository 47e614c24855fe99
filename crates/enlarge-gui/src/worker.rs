use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use enlarge_core::asset::load_asset;
use tracing::{info, warn};

use crate::messages::{LoaderCommand, LoaderResult};

/// Spawn the loader thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<LoaderResult>,
    ctx: egui::Context,
) -> Result<mpsc::Sender<LoaderCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoaderCommand>();

    std::thread::Builder::new()
        .name("enlarge-loader".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .context("Failed to spawn loader thread")?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<LoaderResult>, ctx: &egui::Context, result: LoaderResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<LoaderCommand>,
    tx: mpsc::Sender<LoaderResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            LoaderCommand::Load { slot, path } => {
                let start = Instant::now();
                match load_asset(&path) {
                    Ok(asset) => {
                        info!(
                            ?slot,
                            path = %path.display(),
                            width = asset.width,
                            height = asset.height,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "Asset decoded"
                        );
                        send(&tx, &ctx, LoaderResult::Loaded { slot, path, asset });
                    }
                    Err(e) => {
                        warn!(?slot, path = %path.display(), "Asset load failed: {e}");
                        send(
                            &tx,
                            &ctx,
                            LoaderResult::Error {
                                message: format!("Failed to load {}: {e}", path.display()),
                            },
                        );
                    }
                }
            }
        }
    }
}
