use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::error::{EnlargeError, Result};

/// An axis-aligned box in viewport pixel coordinates (top-left + size).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// True when the box has no visible area.
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0) || !self.w.is_finite() || !self.h.is_finite()
    }
}

/// Natural (intrinsic) size of an image asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject sizes the geometry functions cannot divide by.
    pub fn validated(self) -> Result<Size> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(EnlargeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Current window dimensions. Zero when no display surface is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const HEADLESS: Viewport = Viewport {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scale + translation applied to the clone around its own centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub const fn new(translate_x: f32, translate_y: f32, scale: f32) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Identity within [`EPSILON`].
    pub fn is_identity(&self) -> bool {
        self.translate_x.abs() < EPSILON
            && self.translate_y.abs() < EPSILON
            && (self.scale - 1.0).abs() < EPSILON
    }

    /// Where a box laid out at `rect` appears on screen once this transform is applied.
    pub fn apply(&self, rect: Rect) -> Rect {
        let w = rect.w * self.scale;
        let h = rect.h * self.scale;
        let cx = rect.center_x() + self.translate_x;
        let cy = rect.center_y() + self.translate_y;
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Transform {
            translate_x: mix(self.translate_x, other.translate_x),
            translate_y: mix(self.translate_y, other.translate_y),
            scale: mix(self.scale, other.scale),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translateX({}px) translateY({}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Scale a natural size down (never up) to fit within the given bounds,
/// preserving aspect ratio.
pub fn fit_within_bounds(
    natural_width: f32,
    natural_height: f32,
    max_width: f32,
    max_height: f32,
) -> Size {
    let scale = (max_width / natural_width)
        .min(max_height / natural_height)
        .clamp(0.0, 1.0);
    Size::new(natural_width * scale, natural_height * scale)
}

/// Fit the natural size into the (padded) viewport and centre it.
pub fn centered_target(
    natural_width: f32,
    natural_height: f32,
    viewport: Viewport,
    padding: f32,
) -> Rect {
    let fitted = fit_within_bounds(
        natural_width,
        natural_height,
        viewport.width - padding,
        viewport.height - padding,
    );
    Rect::new(
        viewport.width / 2.0 - fitted.width / 2.0,
        viewport.height / 2.0 - fitted.height / 2.0,
        fitted.width,
        fitted.height,
    )
}

/// Transform that makes a box laid out at `target` visually coincide with `origin`.
///
/// Interpolating this transform back to identity reveals the box at `target`.
pub fn alignment_transform(origin: Rect, target: Rect) -> Transform {
    Transform {
        scale: origin.w / target.w,
        translate_x: origin.center_x() - target.center_x(),
        translate_y: origin.center_y() - target.center_y(),
    }
}

/// Build a linear mapping from `domain` onto `range` (unclamped).
pub fn linear_conversion(domain: [f32; 2], range: [f32; 2]) -> impl Fn(f32) -> f32 {
    let span_in = domain[1] - domain[0];
    let span_out = range[1] - range[0];
    move |x| (x - domain[0]) * span_out / span_in + range[0]
}

/// Build a clamp to `[min, max]`.
pub fn clamp(min: f32, max: f32) -> impl Fn(f32) -> f32 {
    move |x| {
        if x > max {
            max
        } else if x < min {
            min
        } else {
            x
        }
    }
}
