use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EnlargeError, Result};
use crate::machine::ZoomPhase;

/// Tint painted behind the enlarged clone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OverlayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in [0.0, 1.0].
    pub a: f32,
}

impl Default for OverlayColor {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 0.8,
        }
    }
}

impl OverlayColor {
    /// Straight (non-premultiplied) RGBA with alpha scaled by `opacity`.
    pub fn with_opacity(&self, opacity: f32) -> [u8; 4] {
        let alpha = (self.a * opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, alpha]
    }
}

impl FromStr for OverlayColor {
    type Err = EnlargeError;

    /// Accepts `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and `rgba(r,g,b,a)`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || EnlargeError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
                return Err(invalid());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            let a = if hex.len() == 8 {
                byte(6)? as f32 / 255.0
            } else {
                1.0
            };
            return Ok(OverlayColor {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a,
            });
        }

        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let a = if has_alpha {
            let a = parts[3].parse::<f32>().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(invalid());
            }
            a
        } else {
            1.0
        };

        Ok(OverlayColor {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a,
        })
    }
}

impl fmt::Display for OverlayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for OverlayColor {
    type Error = EnlargeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<OverlayColor> for String {
    fn from(color: OverlayColor) -> Self {
        color.to_string()
    }
}

/// What the consumer hands to the widget.
#[derive(Clone, Debug, Default)]
pub struct EnlargerProps {
    /// Thumbnail source.
    pub src: String,
    /// Distinct high-resolution source for the clone, if any.
    pub enlarged_src: Option<String>,
    pub overlay_color: OverlayColor,
    /// Whether the consumer supplied a loading indicator.
    pub has_loading_indicator: bool,
    /// Passed through untouched to the thumbnail element.
    pub thumbnail_attributes: BTreeMap<String, String>,
}

impl EnlargerProps {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn with_enlarged_src(mut self, src: impl Into<String>) -> Self {
        self.enlarged_src = Some(src.into());
        self
    }

    /// Asset the clone loads: the enlarged source when given, else the thumbnail's.
    pub fn clone_source(&self) -> &str {
        self.enlarged_src.as_deref().unwrap_or(&self.src)
    }
}

/// Which parts of the widget render and which accept input, derived from machine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// The overlay container (backdrop + clone) exists once a zoom has ever been requested.
    pub render_overlay: bool,
    /// Overlay takes pointer input; otherwise events pass through to the page.
    pub overlay_interactive: bool,
    pub overlay_aria_hidden: bool,
    pub show_loading_indicator: bool,
    pub phase: ZoomPhase,
}

impl ViewState {
    pub fn derive(
        phase: ZoomPhase,
        zoomed: bool,
        clone_loaded: bool,
        has_requested_zoom: bool,
        has_loading_indicator: bool,
    ) -> Self {
        Self {
            render_overlay: has_requested_zoom,
            overlay_interactive: zoomed,
            overlay_aria_hidden: !zoomed,
            show_loading_indicator: has_loading_indicator && zoomed && !clone_loaded,
            phase,
        }
    }
}
