use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use lookstudio_core::capability::GeminiClient;
use lookstudio_core::config::{ServiceConfig, StudioConfig};
use lookstudio_core::controller::EditJob;
use lookstudio_core::data_uri::DataUri;
use lookstudio_core::error::CapabilityError;
use lookstudio_core::intake::read_image_file;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
///
/// All blocking work (file I/O, the remote edit call) happens here so the UI
/// stays responsive while a request is in flight.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    service: ServiceConfig,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("lookstudio-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, service);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    service: ServiceConfig,
) {
    let mut client = build_client(&service, &tx, &ctx);

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                handle_load_image(&path, &tx, &ctx);
            }
            WorkerCommand::Edit { job } => {
                handle_edit(&job, &client, &tx, &ctx);
            }
            WorkerCommand::SaveImage { path, image } => {
                match save_image(&path, &image) {
                    Ok(()) => send(&tx, &ctx, WorkerResult::ImageSaved { path }),
                    Err(e) => send_error(&tx, &ctx, format!("{e:#}")),
                }
            }
            WorkerCommand::ImportConfig { path } => match StudioConfig::load(&path) {
                Ok(config) => send(
                    &tx,
                    &ctx,
                    WorkerResult::ConfigImported {
                        path,
                        config: Box::new(config),
                    },
                ),
                Err(e) => send_error(
                    &tx,
                    &ctx,
                    format!("Failed to import config {}: {e}", path.display()),
                ),
            },
            WorkerCommand::Configure { service } => {
                client = build_client(&service, &tx, &ctx);
            }
        }
    }
}

fn build_client(
    service: &ServiceConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<GeminiClient, CapabilityError> {
    let client = GeminiClient::new(service);
    match &client {
        Ok(client) => send_log(tx, ctx, format!("Edit service ready ({})", client.model())),
        Err(e) => send_log(tx, ctx, format!("Edit service unavailable: {e}")),
    }
    client
}

fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match read_image_file(path) {
        Ok(file) => send(
            tx,
            ctx,
            WorkerResult::ImageLoaded {
                path: path.to_path_buf(),
                file,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

/// Every edit job is answered, so the controller always leaves the InFlight state.
fn handle_edit(
    job: &EditJob,
    client: &Result<GeminiClient, CapabilityError>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let outcome = match client {
        Ok(client) => job.run(client),
        Err(e) => job.finish(Err(e.clone())),
    };
    send(
        tx,
        ctx,
        WorkerResult::EditSettled {
            outcome,
            elapsed: start.elapsed(),
        },
    );
}

fn save_image(path: &Path, image: &DataUri) -> Result<()> {
    let bytes = image.decode().context("Edited image is not valid base64")?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
