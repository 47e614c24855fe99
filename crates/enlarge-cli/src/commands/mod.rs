pub mod config;
pub mod drag;
pub mod simulate;
pub mod target;

use std::path::Path;

use anyhow::{bail, Context, Result};
use enlarge_core::config::EnlargerConfig;
use enlarge_core::geometry::{Rect, Size, Viewport};
use enlarge_core::machine::LayoutProbe;

/// Load and validate a TOML config, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<EnlargerConfig> {
    let Some(path) = path else {
        return Ok(EnlargerConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: EnlargerConfig = toml::from_str(&contents).context("Invalid widget config")?;
    config
        .validate()
        .with_context(|| format!("Rejected config {}", path.display()))?;
    Ok(config)
}

/// Layout with a fixed thumbnail box and window size.
pub struct StaticLayout {
    pub thumbnail: Option<Rect>,
    pub viewport: Viewport,
}

impl LayoutProbe for StaticLayout {
    fn thumbnail_rect(&self) -> Option<Rect> {
        self.thumbnail
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn parse_floats<const N: usize>(s: &str, sep: char) -> Result<[f32; N]> {
    let values: Vec<f32> = s
        .split(sep)
        .map(|v| v.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid number in '{s}'"))?;
    match <[f32; N]>::try_from(values) {
        Ok(arr) => Ok(arr),
        Err(v) => bail!("Expected {N} values in '{s}', got {}", v.len()),
    }
}

/// Parse `x,y,w,h`.
pub fn parse_rect(s: &str) -> Result<Rect> {
    let [x, y, w, h] = parse_floats::<4>(s, ',')?;
    Ok(Rect::new(x, y, w, h))
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<Size> {
    let [w, h] = parse_floats::<2>(s, 'x')?;
    Ok(Size::new(w, h))
}

pub fn parse_viewport(s: &str) -> Result<Viewport> {
    let size = parse_size(s)?;
    Ok(Viewport::new(size.width, size.height))
}
