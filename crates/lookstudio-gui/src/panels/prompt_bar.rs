use crate::app::StudioApp;

pub fn show(ctx: &egui::Context, app: &mut StudioApp) {
    egui::TopBottomPanel::bottom("prompt_bar").show(ctx, |ui| {
        ui.add_space(6.0);

        let busy = app.is_busy();
        let mut instruction = app.controller.session().instruction().to_string();
        let mut submit = false;

        ui.horizontal(|ui| {
            let button_width = 110.0;
            let response = ui.add_sized(
                [ui.available_width() - button_width, 28.0],
                egui::TextEdit::singleline(&mut instruction)
                    .hint_text("Describe your edit, e.g. \"make it black and white\""),
            );
            if response.changed() {
                app.controller.set_instruction(instruction.clone());
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            let label = if busy { "Generating..." } else { "Generate" };
            if ui
                .add_enabled(!busy, egui::Button::new(label).min_size(egui::vec2(100.0, 28.0)))
                .clicked()
            {
                submit = true;
            }
        });

        if submit && !busy {
            let submission = app.controller.submit_edit(&instruction);
            app.dispatch(submission);
        }

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Styles").strong());
            let mut chosen = None;
            for (i, preset) in app.config.styles.iter().enumerate() {
                if ui
                    .add_enabled(!busy, egui::Button::new(preset.name.as_str()))
                    .on_hover_text(preset.instruction.as_str())
                    .clicked()
                {
                    chosen = Some(i);
                }
            }
            if let Some(preset) = chosen.and_then(|i| app.config.styles.iter().nth(i).cloned()) {
                let submission = app.controller.select_style(&preset);
                app.dispatch(submission);
            }
        });

        ui.add_space(6.0);
    });
}
