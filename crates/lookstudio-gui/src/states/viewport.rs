/// A decoded image uploaded as a texture.
pub struct PaneTexture {
    pub texture: egui::TextureHandle,
    /// Original image size (before any display scaling).
    pub image_size: [usize; 2],
}

/// Display state of the original and edited panes.
#[derive(Default)]
pub struct ViewportState {
    pub original: Option<PaneTexture>,
    pub edited: Option<PaneTexture>,
}
