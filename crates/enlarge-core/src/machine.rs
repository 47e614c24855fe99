//! The zoom lifecycle: Closed → Entering → Open ⇄ Dragging → Exiting → Closed.
//!
//! Inputs arrive as discrete events (zoom flag changes, clone load completion, drag moves,
//! viewport resizes, animation rest). Each event updates the machine and returns the
//! [`Effect`]s the host must perform. Layout reads go through a [`LayoutProbe`] supplied per
//! call so the machine holds no reference to any UI toolkit.

use std::fmt;

use tracing::{debug, warn};

use crate::animation::{AnimationTarget, Effect, OpacityTarget, RestAction};
use crate::config::EnlargerConfig;
use crate::drag::{DragInterpreter, ReleaseDecision};
use crate::error::Result;
use crate::geometry::{alignment_transform, centered_target, Rect, Size, Transform, Viewport};
use crate::presentation::ViewState;
use crate::resize::ResizeReconciler;

/// Layout reads the machine needs from the rendering substrate.
pub trait LayoutProbe {
    /// Current on-screen box of the thumbnail, or `None` if it is not laid out yet.
    fn thumbnail_rect(&self) -> Option<Rect>;

    /// Current window size; zero-sized when there is no display surface.
    fn viewport(&self) -> Viewport;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomPhase {
    #[default]
    Closed,
    /// Zoom requested; waiting for the clone to load (or for a measurable thumbnail).
    Entering,
    Open,
    Dragging,
    /// Shrinking back over the thumbnail.
    Exiting,
}

impl ZoomPhase {
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

impl fmt::Display for ZoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Entering => write!(f, "Entering"),
            Self::Open => write!(f, "Open"),
            Self::Dragging => write!(f, "Dragging"),
            Self::Exiting => write!(f, "Exiting"),
        }
    }
}

/// Externally-driven flags, compared previous-vs-current to detect edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoomFlags {
    pub zoomed: bool,
    pub clone_loaded: bool,
}

/// Geometry for a single recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub thumbnail: Rect,
    pub target: Rect,
    pub alignment: Transform,
}

impl Placement {
    pub fn compute(thumbnail: Rect, natural: Size, viewport: Viewport, padding: f32) -> Self {
        let target = centered_target(natural.width, natural.height, viewport, padding);
        Self {
            thumbnail,
            target,
            alignment: alignment_transform(thumbnail, target),
        }
    }
}

/// Which positioning step a recompute performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionUpdate {
    /// Grow the clone from the thumbnail to its target.
    ZoomIn,
    /// Shrink the clone back over the thumbnail.
    ZoomOut,
    /// Jump the clone to a fresh target without animating.
    Reposition,
    Unchanged,
}

/// Decide the positioning step from the flag edges.
///
/// Zooming in fires on a rising zoom flag, or on the clone finishing its load while zoomed.
pub fn plan_position_update(
    prev: ZoomFlags,
    current: ZoomFlags,
    immediate: bool,
) -> PositionUpdate {
    let zooming_in = current.zoomed
        && ((!prev.zoomed) || (!prev.clone_loaded && current.clone_loaded));
    let zooming_out = prev.zoomed && !current.zoomed;

    if zooming_in && !immediate {
        PositionUpdate::ZoomIn
    } else if zooming_out {
        PositionUpdate::ZoomOut
    } else if immediate {
        PositionUpdate::Reposition
    } else {
        PositionUpdate::Unchanged
    }
}

pub struct ZoomMachine {
    config: EnlargerConfig,
    clone_source: String,
    drag: DragInterpreter,
    resize: ResizeReconciler,
    phase: ZoomPhase,
    flags: ZoomFlags,
    prev_flags: ZoomFlags,
    has_requested_zoom: bool,
    /// True while the exit animation is in flight.
    animating: bool,
    scroll_locked: bool,
    clone_size: Option<Size>,
    /// Box the clone is laid out at (before its transform).
    clone_box: Option<Rect>,
}

impl ZoomMachine {
    pub fn new(config: EnlargerConfig, clone_source: impl Into<String>) -> Self {
        let drag = DragInterpreter::new(config.drag);
        Self {
            config,
            clone_source: clone_source.into(),
            drag,
            resize: ResizeReconciler::new(),
            phase: ZoomPhase::Closed,
            flags: ZoomFlags::default(),
            prev_flags: ZoomFlags::default(),
            has_requested_zoom: false,
            animating: false,
            scroll_locked: false,
            clone_size: None,
            clone_box: None,
        }
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    pub fn flags(&self) -> ZoomFlags {
        self.flags
    }

    pub fn has_requested_zoom(&self) -> bool {
        self.has_requested_zoom
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn is_resize_subscribed(&self) -> bool {
        self.resize.is_subscribed()
    }

    pub fn clone_box(&self) -> Option<Rect> {
        self.clone_box
    }

    pub fn clone_size(&self) -> Option<Size> {
        self.clone_size
    }

    pub fn config(&self) -> &EnlargerConfig {
        &self.config
    }

    pub fn view_state(&self, has_loading_indicator: bool) -> ViewState {
        ViewState::derive(
            self.phase,
            self.flags.zoomed,
            self.flags.clone_loaded,
            self.has_requested_zoom,
            has_loading_indicator,
        )
    }

    /// The consumer changed the zoom flag.
    pub fn set_zoomed(&mut self, zoomed: bool, probe: &impl LayoutProbe) -> Vec<Effect> {
        if zoomed == self.flags.zoomed {
            return Vec::new();
        }
        let next = ZoomFlags {
            zoomed,
            ..self.flags
        };
        self.apply_flags(next, probe)
    }

    /// The clone asset finished loading with the given natural size.
    ///
    /// Zero or non-finite dimensions are rejected and leave the machine untouched,
    /// exactly as if the load had never completed.
    pub fn clone_loaded(&mut self, natural: Size, probe: &impl LayoutProbe) -> Result<Vec<Effect>> {
        let natural = natural.validated().inspect_err(|e| {
            warn!(error = %e, "Ignoring clone load with unusable dimensions");
        })?;

        if !self.has_requested_zoom {
            warn!("Clone load reported before the clone was mounted");
            return Ok(Vec::new());
        }

        self.clone_size = Some(natural);
        if self.flags.clone_loaded {
            return Ok(Vec::new());
        }
        let next = ZoomFlags {
            clone_loaded: true,
            ..self.flags
        };
        Ok(self.apply_flags(next, probe))
    }

    /// Viewport-size notification. Ignored unless subscribed and fully open.
    pub fn viewport_resized(&mut self, probe: &impl LayoutProbe) -> Vec<Effect> {
        if !self.resize.accepts() || self.phase != ZoomPhase::Open {
            return Vec::new();
        }
        self.recompute(probe, true)
    }

    /// Gesture activation gate.
    pub fn should_claim_drag(&self) -> bool {
        matches!(self.phase, ZoomPhase::Open | ZoomPhase::Dragging)
    }

    /// Cumulative drag delta since the gesture started.
    pub fn drag_move(&mut self, dx: f32, dy: f32) -> Vec<Effect> {
        if !self.should_claim_drag() {
            return Vec::new();
        }
        let clone_height = self.clone_box.map(|b| b.h).unwrap_or(0.0);
        let frame = self.drag.on_move(dx, dy, clone_height);
        self.transition(ZoomPhase::Dragging);

        vec![
            Effect::Clone(AnimationTarget::immediate().transform(frame.transform)),
            Effect::Backdrop(OpacityTarget::immediate(frame.backdrop_opacity)),
        ]
    }

    pub fn drag_release(&mut self, _dx: f32, dy: f32) -> Vec<Effect> {
        if self.phase != ZoomPhase::Dragging {
            return Vec::new();
        }
        self.transition(ZoomPhase::Open);

        match self.drag.on_release(dy) {
            ReleaseDecision::Dismiss => {
                debug!(dy, "Drag released past threshold, requesting close");
                vec![Effect::RequestClose]
            }
            ReleaseDecision::SnapBack => vec![
                Effect::Clone(AnimationTarget::eased().transform(Transform::IDENTITY)),
                Effect::Backdrop(OpacityTarget::eased(1.0)),
            ],
        }
    }

    /// The platform cancelled the gesture; handled like a release.
    pub fn drag_terminate(&mut self, dx: f32, dy: f32) -> Vec<Effect> {
        self.drag_release(dx, dy)
    }

    /// The tween engine reports that an eased target carrying `action` settled.
    pub fn animation_rest(&mut self, action: RestAction) -> Vec<Effect> {
        match action {
            RestAction::FinishExit => {
                if self.phase != ZoomPhase::Exiting {
                    debug!(phase = %self.phase, "Stale exit completion ignored");
                    return Vec::new();
                }
                self.animating = false;
                self.transition(ZoomPhase::Closed);
                let mut effects = vec![
                    Effect::Thumbnail(OpacityTarget::immediate(1.0)),
                    Effect::Clone(AnimationTarget::immediate().opacity(0.0)),
                ];
                self.sync_resources(&mut effects);
                effects
            }
        }
    }

    /// Release everything tied to the component's lifetime.
    pub fn teardown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        effects.extend(self.resize.teardown());
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.push(Effect::ScrollLock(false));
        }
        effects
    }

    /// Position-recompute path shared by flag changes and resizes.
    ///
    /// With unchanged flags and `immediate == false` this emits nothing.
    pub fn recompute(&mut self, probe: &impl LayoutProbe, immediate: bool) -> Vec<Effect> {
        let update = plan_position_update(self.prev_flags, self.flags, immediate);

        let Some(placement) = self.placement(probe) else {
            return self.settle_without_geometry();
        };

        match update {
            PositionUpdate::ZoomIn => self.enter(placement),
            PositionUpdate::ZoomOut => self.exit(placement),
            PositionUpdate::Reposition if self.phase == ZoomPhase::Open => {
                self.clone_box = Some(placement.target);
                debug!(target = ?placement.target, "Clone repositioned");
                vec![Effect::Clone(
                    AnimationTarget::immediate()
                        .transform(Transform::IDENTITY)
                        .bounding_box(placement.target),
                )]
            }
            PositionUpdate::Reposition | PositionUpdate::Unchanged => Vec::new(),
        }
    }

    fn apply_flags(&mut self, next: ZoomFlags, probe: &impl LayoutProbe) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.prev_flags = self.flags;
        self.flags = next;

        if next.zoomed && !self.has_requested_zoom {
            self.has_requested_zoom = true;
            debug!(source = %self.clone_source, "Mounting clone");
            effects.push(Effect::MountClone {
                source: self.clone_source.clone(),
            });
        }

        effects.extend(self.recompute(probe, false));
        self.prev_flags = self.flags;
        self.sync_resources(&mut effects);
        effects
    }

    fn placement(&self, probe: &impl LayoutProbe) -> Option<Placement> {
        if !self.flags.clone_loaded {
            return None;
        }
        let natural = self.clone_size?;
        let Some(thumbnail) = probe.thumbnail_rect() else {
            debug!("Thumbnail not measurable, skipping recompute");
            return None;
        };
        let placement = Placement::compute(
            thumbnail,
            natural,
            probe.viewport(),
            self.config.layout.padding,
        );
        if placement.target.is_degenerate() {
            debug!(viewport = ?probe.viewport(), "Degenerate target, skipping recompute");
            return None;
        }
        Some(placement)
    }

    fn enter(&mut self, placement: Placement) -> Vec<Effect> {
        self.clone_box = Some(placement.target);
        self.animating = false;
        self.transition(ZoomPhase::Open);

        vec![
            Effect::Thumbnail(OpacityTarget::immediate(0.0)),
            Effect::Clone(
                AnimationTarget::immediate()
                    .opacity(1.0)
                    .transform(placement.alignment)
                    .bounding_box(placement.target),
            ),
            Effect::Clone(AnimationTarget::eased().transform(Transform::IDENTITY)),
            Effect::Backdrop(OpacityTarget::eased(1.0)),
        ]
    }

    fn exit(&mut self, placement: Placement) -> Vec<Effect> {
        match self.phase {
            ZoomPhase::Open | ZoomPhase::Dragging => {}
            ZoomPhase::Entering => {
                self.transition(ZoomPhase::Closed);
                return Vec::new();
            }
            ZoomPhase::Closed | ZoomPhase::Exiting => return Vec::new(),
        }
        // Align against the box the clone is actually laid out at.
        let alignment = match self.clone_box {
            Some(laid_out) => alignment_transform(placement.thumbnail, laid_out),
            None => placement.alignment,
        };
        self.animating = true;
        self.transition(ZoomPhase::Exiting);

        vec![
            Effect::Clone(
                AnimationTarget::eased()
                    .transform(alignment)
                    .on_rest(RestAction::FinishExit),
            ),
            Effect::Backdrop(OpacityTarget::eased(0.0)),
        ]
    }

    /// Phase bookkeeping when no geometry can be computed.
    fn settle_without_geometry(&mut self) -> Vec<Effect> {
        match (self.flags.zoomed, self.phase) {
            (true, ZoomPhase::Closed) => {
                self.transition(ZoomPhase::Entering);
                Vec::new()
            }
            (true, ZoomPhase::Exiting) => {
                // Cancel the shrink in place; the clone reappears once a placement exists.
                self.animating = false;
                self.transition(ZoomPhase::Entering);
                vec![
                    Effect::Thumbnail(OpacityTarget::immediate(1.0)),
                    Effect::Clone(AnimationTarget::immediate().opacity(0.0)),
                    Effect::Backdrop(OpacityTarget::eased(0.0)),
                ]
            }
            (false, ZoomPhase::Entering) => {
                self.transition(ZoomPhase::Closed);
                Vec::new()
            }
            (false, ZoomPhase::Open | ZoomPhase::Dragging) => {
                // Nothing to shrink back onto; hide the clone in place.
                self.transition(ZoomPhase::Closed);
                vec![
                    Effect::Thumbnail(OpacityTarget::immediate(1.0)),
                    Effect::Clone(AnimationTarget::immediate().opacity(0.0)),
                    Effect::Backdrop(OpacityTarget::eased(0.0)),
                ]
            }
            _ => Vec::new(),
        }
    }

    fn sync_resources(&mut self, effects: &mut Vec<Effect>) {
        effects.extend(self.resize.sync(self.flags.zoomed));

        let lock = self.flags.zoomed || self.animating;
        if lock != self.scroll_locked {
            self.scroll_locked = lock;
            effects.push(Effect::ScrollLock(lock));
        }
    }

    fn transition(&mut self, next: ZoomPhase) {
        if self.phase != next {
            debug!(from = %self.phase, to = %next, "Zoom phase change");
            self.phase = next;
        }
    }
}
