use crate::app::StudioApp;

/// Banner above the panes showing the session error with a dismiss button.
pub fn show(ctx: &egui::Context, app: &mut StudioApp) {
    let Some(message) = app.controller.session().error().map(str::to_string) else {
        return;
    };

    egui::TopBottomPanel::top("error_toast").show(ctx, |ui| {
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(90, 24, 24))
            .inner_margin(egui::Margin::same(8))
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&message).color(egui::Color32::from_rgb(255, 200, 200)),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            app.controller.dismiss_error();
                        }
                    });
                });
            });
    });
}
