use enlarge_core::asset::DecodedAsset;
use enlarge_core::geometry::Rect;

/// Convert a decoded RGBA8 asset to an egui ColorImage.
pub fn asset_to_color_image(asset: &DecodedAsset) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [asset.width as usize, asset.height as usize],
        &asset.rgba,
    )
}

pub fn to_core_rect(r: egui::Rect) -> Rect {
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn to_egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.w, r.h))
}
