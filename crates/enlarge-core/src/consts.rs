/// Vertical drag distance (pixels) over which the clone shrinks to its minimum scale.
pub const DEFAULT_DRAG_SCALE_DISTANCE: f32 = 400.0;

/// Smallest scale the clone reaches while being dragged.
pub const DEFAULT_MIN_DRAG_SCALE: f32 = 0.4;

/// Factor applied to horizontal drag so it tracks the pointer less directly than vertical drag.
pub const DEFAULT_HORIZONTAL_DAMPING: f32 = 0.8;

/// Vertical release distance (pixels) that must be exceeded to dismiss the overlay.
pub const DEFAULT_DISMISS_THRESHOLD: f32 = 20.0;

/// Default padding subtracted from the viewport before fitting the clone.
pub const DEFAULT_VIEWPORT_PADDING: f32 = 0.0;

/// Default overlay tint, as accepted by `OverlayColor::from_str`.
pub const DEFAULT_OVERLAY_COLOR: &str = "rgba(255,255,255,0.8)";

/// Spring tension of the "stiff" preset used for the clone.
pub const STIFF_TENSION: f32 = 210.0;

/// Spring friction of the "stiff" preset used for the clone.
pub const STIFF_FRICTION: f32 = 20.0;

/// Spring tension of the default preset used for the thumbnail and backdrop.
pub const DEFAULT_TENSION: f32 = 170.0;

/// Spring friction of the default preset used for the thumbnail and backdrop.
pub const DEFAULT_FRICTION: f32 = 26.0;

/// Distance from target (and speed) under which a spring is considered at rest.
pub const SPRING_REST_PRECISION: f32 = 0.01;

/// Largest integration step for the spring solver, in seconds.
/// Longer frames are split so a stalled frame cannot destabilise the springs.
pub const MAX_SPRING_STEP: f32 = 1.0 / 120.0;

/// Small epsilon for float comparisons on geometry.
pub const EPSILON: f32 = 1e-4;
