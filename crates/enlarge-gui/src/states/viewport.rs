/// Textures shown by the widget.
#[derive(Default)]
pub struct ViewportState {
    pub thumbnail: Option<egui::TextureHandle>,
    pub clone: Option<egui::TextureHandle>,
    /// Natural size of the thumbnail asset.
    pub thumbnail_size: Option<[usize; 2]>,
}
