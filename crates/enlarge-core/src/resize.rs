use tracing::debug;

use crate::animation::Effect;

/// Tracks the viewport-resize subscription so it lives exactly as long as the zoom session.
///
/// The reconciler never touches a platform listener itself: it emits
/// [`Effect::SubscribeResize`] / [`Effect::UnsubscribeResize`] edges and
/// the host attaches or detaches accordingly.
#[derive(Debug, Default)]
pub struct ResizeReconciler {
    subscribed: bool,
}

impl ResizeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Bring the subscription in line with the zoomed flag. Returns the edge, if any.
    pub fn sync(&mut self, zoomed: bool) -> Option<Effect> {
        match (self.subscribed, zoomed) {
            (false, true) => {
                self.subscribed = true;
                debug!("Resize listener attached");
                Some(Effect::SubscribeResize)
            }
            (true, false) => {
                self.subscribed = false;
                debug!("Resize listener detached");
                Some(Effect::UnsubscribeResize)
            }
            _ => None,
        }
    }

    /// Whether a resize notification should reach the reposition path.
    pub fn accepts(&self) -> bool {
        self.subscribed
    }

    pub fn teardown(&mut self) -> Option<Effect> {
        self.sync(false)
    }
}
