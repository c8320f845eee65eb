use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use lookstudio_core::config::StudioConfig;
use lookstudio_core::controller::{EditController, Settlement, Submission};
use lookstudio_core::session::{SessionChange, SessionObserver, SessionStore};

use crate::convert::decode_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{PaneTexture, UIState, ViewportState};
use crate::worker;

/// Marks the panes stale and wakes the UI whenever the session changes.
struct RepaintOnChange {
    ctx: egui::Context,
    stale: Arc<AtomicBool>,
}

impl SessionObserver for RepaintOnChange {
    fn session_changed(&self, _session: &SessionStore, change: SessionChange) {
        match change {
            SessionChange::Instruction | SessionChange::ErrorReported | SessionChange::ErrorDismissed => {}
            _ => self.stale.store(true, Ordering::Relaxed),
        }
        self.ctx.request_repaint();
    }
}

pub struct StudioApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub controller: EditController,
    pub config: StudioConfig,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    panes_stale: Arc<AtomicBool>,
}

impl StudioApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = StudioConfig::default();
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone(), config.service.clone());

        let panes_stale = Arc::new(AtomicBool::new(false));
        let mut controller = EditController::from_config(&config);
        controller.subscribe(Box::new(RepaintOnChange {
            ctx: ctx.clone(),
            stale: panes_stale.clone(),
        }));

        Self {
            cmd_tx,
            result_rx,
            controller,
            config,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            panes_stale,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { path, file } => {
                    let size = file.bytes.len();
                    match self.controller.load_image(file.bytes, file.mime_type.as_deref()) {
                        Ok(()) => {
                            self.ui_state.add_log(format!(
                                "Opened: {} ({:.1} KB)",
                                path.display(),
                                size as f64 / 1024.0
                            ));
                            self.ui_state.file_path = Some(path);
                        }
                        Err(e) => self.ui_state.add_log(format!("Rejected {}: {e}", file.name)),
                    }
                }
                WorkerResult::EditSettled { outcome, elapsed } => {
                    self.ui_state.request_started = None;
                    let secs = elapsed.as_secs_f32();
                    match self.controller.settle(outcome) {
                        Settlement::Succeeded => {
                            self.ui_state.add_log(format!("Edit complete in {secs:.1}s"));
                        }
                        Settlement::Failed => {
                            let message = self.controller.session().error().unwrap_or_default();
                            self.ui_state.add_log(format!("ERROR: {message}"));
                        }
                        Settlement::Discarded => {
                            self.ui_state
                                .add_log("Image changed during the edit; result discarded".into());
                        }
                        Settlement::Ignored => {}
                    }
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ConfigImported { path, config } => {
                    self.apply_config(*config);
                    self.ui_state.add_log(format!("Config imported from {}", path.display()));
                    self.ui_state.config_path = Some(path);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn apply_config(&mut self, config: StudioConfig) {
        self.controller.configure(&config);
        self.send_command(WorkerCommand::Configure {
            service: config.service.clone(),
        });
        self.config = config;
    }

    /// Rebuild pane textures from the session after it changed.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        if !self.panes_stale.swap(false, Ordering::Relaxed) {
            return;
        }

        let session = self.controller.session();
        let original = session.original().map(|o| o.bytes().to_vec());
        let edited = session.result().map(|r| r.decode());

        self.viewport.original = match original {
            Some(bytes) => self.upload(ctx, "original", &bytes),
            None => None,
        };
        self.viewport.edited = match edited {
            Some(Ok(bytes)) => self.upload(ctx, "edited", &bytes),
            Some(Err(e)) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                None
            }
            None => None,
        };
    }

    fn upload(&mut self, ctx: &egui::Context, name: &str, bytes: &[u8]) -> Option<PaneTexture> {
        match decode_color_image(bytes) {
            Ok((image, image_size)) => Some(PaneTexture {
                texture: ctx.load_texture(name, image, egui::TextureOptions::LINEAR),
                image_size,
            }),
            Err(e) => {
                self.ui_state.add_log(format!("Cannot display {name} image: {e:#}"));
                None
            }
        }
    }

    /// Hand a submission result to the worker or the log.
    pub fn dispatch(&mut self, submission: Submission) {
        match submission {
            Submission::Dispatched(job) => {
                self.ui_state.request_started = Some(std::time::Instant::now());
                self.ui_state
                    .add_log(format!("Editing: \"{}\"", job.instruction()));
                self.send_command(WorkerCommand::Edit { job });
            }
            Submission::Invalid(e) => self.ui_state.add_log(e.to_string()),
            Submission::Busy => {
                self.ui_state
                    .add_log("An edit request is already in progress.".into());
            }
            Submission::InstructionOnly => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        self.controller.in_flight().is_some()
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.sync_textures(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::prompt_bar::show(ctx, self);
        panels::error_toast::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Look Studio")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Look Studio");
                        ui.label("Photo editing with text instructions");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!("Model: {}", self.config.service.model));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
