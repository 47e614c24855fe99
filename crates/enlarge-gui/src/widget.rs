use enlarge_core::animation::{Effect, RestAction};
use enlarge_core::config::EnlargerConfig;
use enlarge_core::error::Result;
use enlarge_core::geometry::{Rect, Size, Viewport};
use enlarge_core::machine::{LayoutProbe, ZoomMachine};
use enlarge_core::presentation::{EnlargerProps, ViewState};
use enlarge_core::tween::SceneAnimation;
use tracing::debug;

/// Layout measured from the last rendered frame, in screen points.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostLayout {
    pub thumbnail: Option<Rect>,
    pub viewport: Viewport,
}

impl LayoutProbe for HostLayout {
    fn thumbnail_rect(&self) -> Option<Rect> {
        self.thumbnail
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Host-side half of the widget: feeds egui events to the zoom machine and
/// carries out the effects it returns.
pub struct ZoomWidget {
    pub props: EnlargerProps,
    machine: ZoomMachine,
    pub scene: SceneAnimation,
    pub layout: HostLayout,
    scroll_locked: bool,
    resize_listening: bool,
    /// Clone source to start loading, taken by the app.
    pending_mount: Option<String>,
    close_requested: bool,
    /// Cumulative pointer delta of the active drag gesture.
    drag_offset: Option<egui::Vec2>,
}

impl ZoomWidget {
    pub fn new(config: EnlargerConfig, props: EnlargerProps) -> Self {
        let scene = SceneAnimation::new(&config.spring);
        let machine = ZoomMachine::new(config, props.clone_source());
        Self {
            props,
            machine,
            scene,
            layout: HostLayout::default(),
            scroll_locked: false,
            resize_listening: false,
            pending_mount: None,
            close_requested: false,
            drag_offset: None,
        }
    }

    pub fn machine(&self) -> &ZoomMachine {
        &self.machine
    }

    pub fn view_state(&self) -> ViewState {
        self.machine.view_state(self.props.has_loading_indicator)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn take_pending_mount(&mut self) -> Option<String> {
        self.pending_mount.take()
    }

    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    /// Consumer-owned zoom flag changed (or was re-asserted).
    pub fn set_zoomed(&mut self, zoomed: bool) {
        let effects = self.machine.set_zoomed(zoomed, &self.layout);
        self.apply(effects);
    }

    pub fn clone_loaded(&mut self, natural: Size) -> Result<()> {
        let effects = self.machine.clone_loaded(natural, &self.layout)?;
        self.apply(effects);
        Ok(())
    }

    /// Record this frame's window size and forward a change while the resize listener is attached.
    pub fn observe_viewport(&mut self, viewport: Viewport) {
        let changed = self.layout.viewport != viewport;
        self.layout.viewport = viewport;
        if changed && self.resize_listening {
            let effects = self.machine.viewport_resized(&self.layout);
            self.apply(effects);
        }
    }

    pub fn observe_thumbnail(&mut self, rect: Option<Rect>) {
        self.layout.thumbnail = rect;
    }

    /// Drive the overlay gesture from the overlay's response.
    pub fn handle_drag(&mut self, response: &egui::Response) {
        if response.drag_started() && self.machine.should_claim_drag() {
            self.drag_offset = Some(egui::Vec2::ZERO);
        }

        let Some(mut offset) = self.drag_offset else {
            return;
        };

        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                offset += delta;
                self.drag_offset = Some(offset);
                let effects = self.machine.drag_move(offset.x, offset.y);
                self.apply(effects);
            }
        }

        if response.drag_stopped() {
            self.drag_offset = None;
            let effects = self.machine.drag_release(offset.x, offset.y);
            self.apply(effects);
        } else if !response.dragged() && !response.drag_started() {
            // The pointer went away without a release (focus loss, capture stolen).
            self.drag_offset = None;
            let effects = self.machine.drag_terminate(offset.x, offset.y);
            self.apply(effects);
        }
    }

    /// Forget a gesture the overlay can no longer finish.
    pub fn cancel_drag(&mut self) {
        self.drag_offset = None;
    }

    /// Advance the springs by `dt` seconds. Returns true while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(action) = self.scene.step(dt) {
            self.on_rest(action);
        }
        !self.scene.is_at_rest()
    }

    fn on_rest(&mut self, action: RestAction) {
        let effects = self.machine.animation_rest(action);
        self.apply(effects);
    }

    /// Release the resize listener and scroll lock ahead of replacing the widget.
    pub fn teardown(&mut self) {
        let effects = self.machine.teardown();
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::MountClone { source } => {
                    debug!(source, "Clone mounted");
                    self.pending_mount = Some(source);
                }
                Effect::ScrollLock(locked) => self.scroll_locked = locked,
                Effect::SubscribeResize => self.resize_listening = true,
                Effect::UnsubscribeResize => self.resize_listening = false,
                Effect::RequestClose => self.close_requested = true,
                other => {
                    self.scene.apply(&other);
                }
            }
        }
    }
}
