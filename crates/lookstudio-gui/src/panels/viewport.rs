use lookstudio_core::session::RequestState;

use crate::app::StudioApp;
use crate::states::PaneTexture;

/// Largest upscale applied when fitting a small image into its pane.
const MAX_FIT_ZOOM: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut StudioApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let state = app.controller.session().request_state();

        ui.columns(2, |columns| {
            show_pane(
                &mut columns[0],
                "Original",
                app.viewport.original.as_ref(),
                "Upload an image to begin",
            );

            let placeholder = match state {
                RequestState::InFlight => "Generating your edit...",
                RequestState::Failed(_) => "The edit failed",
                _ => "Your edited image will appear here",
            };
            show_pane(
                &mut columns[1],
                "Edited",
                app.viewport.edited.as_ref(),
                placeholder,
            );
        });
    });
}

fn show_pane(ui: &mut egui::Ui, title: &str, pane: Option<&PaneTexture>, placeholder: &str) {
    ui.strong(title);
    let rect = ui.available_rect_before_wrap();
    paint_background(ui, rect);
    ui.allocate_rect(rect, egui::Sense::hover());

    match pane {
        Some(pane) => {
            let image_size = egui::vec2(pane.image_size[0] as f32, pane.image_size[1] as f32);
            let img_rect = fit_rect(rect, image_size);
            draw_image(ui, pane.texture.id(), img_rect);
            draw_size_label(ui, rect, pane.image_size);
        }
        None => show_placeholder(ui, rect, placeholder),
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 4.0, egui::Color32::from_gray(30));
}

/// Center the image in `rect`, scaled to fit without distortion.
fn fit_rect(rect: egui::Rect, image_size: egui::Vec2) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return rect;
    }
    let available = rect.size();
    let zoom = (available.x / image_size.x)
        .min(available.y / image_size.y)
        .min(MAX_FIT_ZOOM);
    egui::Rect::from_center_size(rect.center(), image_size * zoom)
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_size_label(ui: &egui::Ui, rect: egui::Rect, size: [usize; 2]) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        format!("{}x{}", size[0], size[1]),
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, text: &str) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
