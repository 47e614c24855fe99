use std::path::Path;

use crate::error::Result;
use crate::geometry::Size;

/// A decoded image ready for upload to a texture.
#[derive(Clone, Debug)]
pub struct DecodedAsset {
    pub width: u32,
    pub height: u32,
    /// Straight RGBA8, row-major.
    pub rgba: Vec<u8>,
}

impl DecodedAsset {
    pub fn natural_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Read only the header to get an asset's natural size.
pub fn natural_size(path: &Path) -> Result<Size> {
    let (w, h) = image::image_dimensions(path)?;
    Size::new(w as f32, h as f32).validated()
}

/// Decode a full image file to RGBA8.
pub fn load_asset(path: &Path) -> Result<DecodedAsset> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Size::new(width as f32, height as f32).validated()?;
    Ok(DecodedAsset {
        width,
        height,
        rgba: img.into_raw(),
    })
}
