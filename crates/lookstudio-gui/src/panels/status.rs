use lookstudio_core::session::RequestState;

use crate::app::StudioApp;

pub fn show(ctx: &egui::Context, app: &mut StudioApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(started) = app.ui_state.request_started {
            let detail = format!("Generating edit ({:.0}s)", started.elapsed().as_secs_f32());
            ui.add(egui::ProgressBar::new(0.0).text(detail).animate(true));
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let state = app.controller.session().request_state();
            let state_label = match state {
                RequestState::Failed(_) => "Failed".to_string(),
                other => other.to_string(),
            };
            ui.label(format!("Request: {state_label}"));
            ui.separator();
            if let Some(original) = app.controller.session().original() {
                ui.label(original.mime_type());
                ui.separator();
            }
            ui.label(format!("Model: {}", app.config.service.model));
        });

        ui.add_space(2.0);
    });
}
