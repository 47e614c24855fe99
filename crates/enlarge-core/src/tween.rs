//! Reference tween engine: damped springs that retarget mid-flight.
//!
//! Each animated property is an independent spring integrated with
//! `a = (-tension * (x - target) - friction * v) / mass`. Setting a new target never resets
//! velocity, so an interrupted animation bends smoothly toward the new value. `immediate`
//! targets jump the value and zero the velocity.

use crate::animation::{AnimationTarget, Effect, OpacityTarget, RestAction};
use crate::config::{SpringConfig, SpringParams};
use crate::consts::MAX_SPRING_STEP;
use crate::geometry::{Rect, Transform};

#[derive(Clone, Copy, Debug)]
pub struct Spring {
    value: f32,
    target: f32,
    velocity: f32,
    params: SpringParams,
}

impl Spring {
    pub fn new(value: f32, params: SpringParams) -> Self {
        Self {
            value,
            target: value,
            velocity: 0.0,
            params,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32, immediate: bool) {
        self.target = target;
        if immediate {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds. Returns true once at rest.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_at_rest() {
            return true;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SPRING_STEP);
            let displacement = self.value - self.target;
            let accel = (-self.params.tension * displacement - self.params.friction * self.velocity)
                / self.params.mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;

            if (self.value - self.target).abs() < self.params.precision
                && self.velocity.abs() < self.params.precision
            {
                self.value = self.target;
                self.velocity = 0.0;
                return true;
            }
        }
        false
    }
}

/// Interpolated clone state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloneFrame {
    pub opacity: f32,
    pub transform: Transform,
    pub bounding_box: Rect,
}

impl CloneFrame {
    /// Where the clone is painted this frame.
    pub fn visual_rect(&self) -> Rect {
        self.transform.apply(self.bounding_box)
    }
}

/// Springs for every animated property of the clone.
#[derive(Clone, Debug)]
pub struct CloneAnimation {
    opacity: Spring,
    translate_x: Spring,
    translate_y: Spring,
    scale: Spring,
    x: Spring,
    y: Spring,
    w: Spring,
    h: Spring,
    pending_rest: Option<RestAction>,
}

impl CloneAnimation {
    /// Starts transparent, zero-sized, at identity.
    pub fn new(params: SpringParams) -> Self {
        let spring = |v| Spring::new(v, params);
        Self {
            opacity: spring(0.0),
            translate_x: spring(0.0),
            translate_y: spring(0.0),
            scale: spring(1.0),
            x: spring(0.0),
            y: spring(0.0),
            w: spring(0.0),
            h: spring(0.0),
            pending_rest: None,
        }
    }

    /// Retarget. The newest target's rest action replaces any pending one.
    pub fn apply(&mut self, target: &AnimationTarget) {
        let immediate = target.immediate;
        if let Some(opacity) = target.opacity {
            self.opacity.set_target(opacity, immediate);
        }
        if let Some(t) = target.transform {
            self.translate_x.set_target(t.translate_x, immediate);
            self.translate_y.set_target(t.translate_y, immediate);
            self.scale.set_target(t.scale, immediate);
        }
        if let Some(r) = target.bounding_box {
            self.x.set_target(r.x, immediate);
            self.y.set_target(r.y, immediate);
            self.w.set_target(r.w, immediate);
            self.h.set_target(r.h, immediate);
        }
        self.pending_rest = target.on_rest;
    }

    fn springs_mut(&mut self) -> [&mut Spring; 8] {
        [
            &mut self.opacity,
            &mut self.translate_x,
            &mut self.translate_y,
            &mut self.scale,
            &mut self.x,
            &mut self.y,
            &mut self.w,
            &mut self.h,
        ]
    }

    /// Advance all springs; yields the pending rest action once everything settles.
    pub fn step(&mut self, dt: f32) -> Option<RestAction> {
        let mut at_rest = true;
        for spring in self.springs_mut() {
            at_rest &= spring.step(dt);
        }
        if at_rest {
            self.pending_rest.take()
        } else {
            None
        }
    }

    pub fn is_at_rest(&self) -> bool {
        [
            &self.opacity,
            &self.translate_x,
            &self.translate_y,
            &self.scale,
            &self.x,
            &self.y,
            &self.w,
            &self.h,
        ]
        .iter()
        .all(|s| s.is_at_rest())
    }

    pub fn current(&self) -> CloneFrame {
        CloneFrame {
            opacity: self.opacity.value(),
            transform: Transform::new(
                self.translate_x.value(),
                self.translate_y.value(),
                self.scale.value(),
            ),
            bounding_box: Rect::new(self.x.value(), self.y.value(), self.w.value(), self.h.value()),
        }
    }
}

/// A single faded value (thumbnail or backdrop).
#[derive(Clone, Copy, Debug)]
pub struct OpacityAnimation {
    spring: Spring,
}

impl OpacityAnimation {
    pub fn new(initial: f32, params: SpringParams) -> Self {
        Self {
            spring: Spring::new(initial, params),
        }
    }

    pub fn apply(&mut self, target: &OpacityTarget) {
        self.spring.set_target(target.opacity, target.immediate);
    }

    pub fn step(&mut self, dt: f32) -> bool {
        self.spring.step(dt)
    }

    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    pub fn is_at_rest(&self) -> bool {
        self.spring.is_at_rest()
    }
}

/// Everything the widget animates, driven by machine effects.
#[derive(Clone, Debug)]
pub struct SceneAnimation {
    pub clone: CloneAnimation,
    pub thumbnail: OpacityAnimation,
    pub backdrop: OpacityAnimation,
}

impl SceneAnimation {
    pub fn new(config: &SpringConfig) -> Self {
        Self {
            clone: CloneAnimation::new(config.clone_spring),
            thumbnail: OpacityAnimation::new(1.0, config.fade_spring),
            backdrop: OpacityAnimation::new(0.0, config.fade_spring),
        }
    }

    /// Feed an effect to the matching animation. Returns false for non-animation effects.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::Clone(target) => self.clone.apply(target),
            Effect::Thumbnail(target) => self.thumbnail.apply(target),
            Effect::Backdrop(target) => self.backdrop.apply(target),
            _ => return false,
        }
        true
    }

    pub fn step(&mut self, dt: f32) -> Option<RestAction> {
        self.thumbnail.step(dt);
        self.backdrop.step(dt);
        self.clone.step(dt)
    }

    pub fn is_at_rest(&self) -> bool {
        self.clone.is_at_rest() && self.thumbnail.is_at_rest() && self.backdrop.is_at_rest()
    }
}
