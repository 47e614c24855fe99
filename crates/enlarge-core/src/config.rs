use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FRICTION, DEFAULT_TENSION, DEFAULT_VIEWPORT_PADDING, SPRING_REST_PRECISION,
    STIFF_FRICTION, STIFF_TENSION,
};
use crate::drag::DragConfig;
use crate::error::{EnlargeError, Result};
use crate::presentation::OverlayColor;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnlargerConfig {
    #[serde(default)]
    pub overlay_color: OverlayColor,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub spring: SpringConfig,
}

impl EnlargerConfig {
    /// Reject parameter combinations the geometry or spring solver cannot work with.
    pub fn validate(&self) -> Result<()> {
        let drag = &self.drag;
        if !(drag.scale_distance > 0.0) {
            return Err(EnlargeError::InvalidConfig(format!(
                "drag.scale_distance must be > 0 (got {})",
                drag.scale_distance
            )));
        }
        if !(drag.min_scale > 0.0 && drag.min_scale <= 1.0) {
            return Err(EnlargeError::InvalidConfig(format!(
                "drag.min_scale must be in (0, 1] (got {})",
                drag.min_scale
            )));
        }
        if drag.dismiss_threshold < 0.0 {
            return Err(EnlargeError::InvalidConfig(format!(
                "drag.dismiss_threshold must be >= 0 (got {})",
                drag.dismiss_threshold
            )));
        }
        if self.layout.padding < 0.0 {
            return Err(EnlargeError::InvalidConfig(format!(
                "layout.padding must be >= 0 (got {})",
                self.layout.padding
            )));
        }
        self.spring.clone_spring.validate("spring.clone_spring")?;
        self.spring.fade_spring.validate("spring.fade_spring")?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixels subtracted from each viewport dimension before fitting the clone.
    pub padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_VIEWPORT_PADDING,
        }
    }
}

/// Physical parameters of one damped spring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub tension: f32,
    pub friction: f32,
    pub mass: f32,
    /// Distance and speed under which the spring snaps to its target and rests.
    pub precision: f32,
}

impl SpringParams {
    pub const STIFF: SpringParams = SpringParams {
        tension: STIFF_TENSION,
        friction: STIFF_FRICTION,
        mass: 1.0,
        precision: SPRING_REST_PRECISION,
    };

    pub const GENTLE: SpringParams = SpringParams {
        tension: DEFAULT_TENSION,
        friction: DEFAULT_FRICTION,
        mass: 1.0,
        precision: SPRING_REST_PRECISION,
    };

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.tension > 0.0 && self.mass > 0.0 && self.friction >= 0.0 && self.precision > 0.0)
        {
            return Err(EnlargeError::InvalidConfig(format!(
                "{name}: tension, mass and precision must be > 0 and friction >= 0"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Drives the clone's transform, box and opacity.
    pub clone_spring: SpringParams,
    /// Drives the thumbnail and backdrop opacity.
    pub fade_spring: SpringParams,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            clone_spring: SpringParams::STIFF,
            fade_spring: SpringParams::GENTLE,
        }
    }
}
