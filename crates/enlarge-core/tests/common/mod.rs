#![allow(dead_code)]

use enlarge_core::animation::Effect;
use enlarge_core::geometry::{Rect, Viewport};
use enlarge_core::machine::LayoutProbe;

/// Fixed layout used in place of a real rendering substrate.
pub struct FakeLayout {
    pub thumbnail: Option<Rect>,
    pub viewport: Viewport,
}

impl FakeLayout {
    /// The scenario layout: thumbnail at {10,10,100,50} in an 800x600 window.
    pub fn scenario() -> Self {
        Self {
            thumbnail: Some(Rect::new(10.0, 10.0, 100.0, 50.0)),
            viewport: Viewport::new(800.0, 600.0),
        }
    }
}

impl LayoutProbe for FakeLayout {
    fn thumbnail_rect(&self) -> Option<Rect> {
        self.thumbnail
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Count effects matching a predicate.
pub fn count(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
    effects.iter().filter(|e| pred(e)).count()
}
