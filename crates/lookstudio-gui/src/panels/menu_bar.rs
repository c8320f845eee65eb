use lookstudio_core::intake::extension_for_mime;

use crate::app::StudioApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut StudioApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let can_save = app.controller.session().result().is_some();
                if ui
                    .add_enabled(
                        can_save,
                        egui::Button::new("Save Edited Image...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_file(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &mut StudioApp) {
    let cmd_tx = app.cmd_tx.clone();
    let extensions = app.controller.intake().accepted_extensions();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", extensions.as_slice())
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

fn save_file(app: &mut StudioApp) {
    let Some(image) = app.controller.session().result().cloned() else {
        return;
    };
    let ext = extension_for_mime(image.mime_type()).unwrap_or("png");
    let file_name = match app.ui_state.file_path.as_ref().and_then(|p| p.file_stem()) {
        Some(stem) => format!("{}-edited.{ext}", stem.to_string_lossy()),
        None => format!("edited.{ext}"),
    };

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveImage { path, image });
        }
    });
}

fn import_config(app: &mut StudioApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ImportConfig { path });
        }
    });
}
