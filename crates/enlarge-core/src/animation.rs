//! Animation targets and the side effects each state transition asks the host to perform.
//!
//! The state machine never interpolates anything itself. Every transition yields a list of
//! [`Effect`]s; the host hands the animation ones to its tween engine and performs the rest
//! (mounting the clone, locking scroll, wiring the resize listener, calling the consumer).
//! Targets follow last-write-wins semantics: a newer target for the same element replaces
//! any in-flight one, and the engine retargets from its current interpolated state.

use crate::geometry::{Rect, Transform};

/// Callback-style notification the tween engine reports back once an eased target settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestAction {
    /// The shrink-back animation finished; reveal the thumbnail and hide the clone.
    FinishExit,
}

/// Target values for the clone image.
///
/// Unset fields keep whatever the engine is currently animating toward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationTarget {
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
    pub bounding_box: Option<Rect>,
    pub immediate: bool,
    pub on_rest: Option<RestAction>,
}

impl AnimationTarget {
    pub fn immediate() -> Self {
        Self {
            immediate: true,
            ..Default::default()
        }
    }

    pub fn eased() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn bounding_box(mut self, rect: Rect) -> Self {
        self.bounding_box = Some(rect);
        self
    }

    pub fn on_rest(mut self, action: RestAction) -> Self {
        self.on_rest = Some(action);
        self
    }
}

/// Opacity-only target used for the thumbnail and the overlay backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityTarget {
    pub opacity: f32,
    pub immediate: bool,
}

impl OpacityTarget {
    pub fn immediate(opacity: f32) -> Self {
        Self {
            opacity,
            immediate: true,
        }
    }

    pub fn eased(opacity: f32) -> Self {
        Self {
            opacity,
            immediate: false,
        }
    }
}

/// A side effect requested by the zoom state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Allocate the clone element and start loading the enlarged asset. Emitted once.
    MountClone { source: String },
    Clone(AnimationTarget),
    Thumbnail(OpacityTarget),
    Backdrop(OpacityTarget),
    /// Acquire (`true`) or release (`false`) the scroll lock.
    ScrollLock(bool),
    SubscribeResize,
    UnsubscribeResize,
    /// Ask the consumer to close the overlay (it owns the zoomed flag).
    RequestClose,
}

impl Effect {
    pub fn as_clone(&self) -> Option<&AnimationTarget> {
        match self {
            Effect::Clone(target) => Some(target),
            _ => None,
        }
    }
}
