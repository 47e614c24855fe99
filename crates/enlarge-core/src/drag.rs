use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DISMISS_THRESHOLD, DEFAULT_DRAG_SCALE_DISTANCE, DEFAULT_HORIZONTAL_DAMPING,
    DEFAULT_MIN_DRAG_SCALE,
};
use crate::geometry::{clamp, linear_conversion, Transform};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Vertical distance (px) mapped onto the full `[1, min_scale]` range.
    pub scale_distance: f32,
    /// Floor for the live drag scale.
    pub min_scale: f32,
    /// Multiplier applied to horizontal movement.
    pub horizontal_damping: f32,
    /// Release is a dismiss when `|dy|` strictly exceeds this.
    pub dismiss_threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            scale_distance: DEFAULT_DRAG_SCALE_DISTANCE,
            min_scale: DEFAULT_MIN_DRAG_SCALE,
            horizontal_damping: DEFAULT_HORIZONTAL_DAMPING,
            dismiss_threshold: DEFAULT_DISMISS_THRESHOLD,
        }
    }
}

/// Live values produced for one pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragFrame {
    pub transform: Transform,
    pub backdrop_opacity: f32,
}

/// What to do when the pointer lets go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    Dismiss,
    SnapBack,
}

/// Turns cumulative drag deltas into clone transforms.
#[derive(Clone, Debug, Default)]
pub struct DragInterpreter {
    config: DragConfig,
}

impl DragInterpreter {
    pub fn new(config: DragConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Scale for a vertical delta. Sign-independent.
    pub fn scale_for(&self, dy: f32) -> f32 {
        let to_scale = linear_conversion(
            [0.0, self.config.scale_distance],
            [1.0, self.config.min_scale],
        );
        let bound = clamp(self.config.min_scale, 1.0);
        bound(to_scale(dy.abs()))
    }

    /// `clone_height` is the rendered height of the clone box; the vertical
    /// translate compensates for the shrink so the image stays under the pointer.
    pub fn on_move(&self, dx: f32, dy: f32, clone_height: f32) -> DragFrame {
        let scale = self.scale_for(dy);
        let diff_height = (1.0 - scale) * clone_height / 2.0;
        let direction = if dy > 0.0 { 1.0 } else { -1.0 };
        let translate_y = dy - diff_height * direction;

        DragFrame {
            transform: Transform::new(dx * self.config.horizontal_damping, translate_y, scale),
            backdrop_opacity: scale,
        }
    }

    pub fn on_release(&self, dy: f32) -> ReleaseDecision {
        if dy.abs() > self.config.dismiss_threshold {
            ReleaseDecision::Dismiss
        } else {
            ReleaseDecision::SnapBack
        }
    }
}
