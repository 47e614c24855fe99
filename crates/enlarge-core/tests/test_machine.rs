mod common;

use approx::assert_abs_diff_eq;

use common::{count, FakeLayout};
use enlarge_core::animation::{AnimationTarget, Effect, OpacityTarget, RestAction};
use enlarge_core::config::EnlargerConfig;
use enlarge_core::geometry::{Size, Transform, Viewport};
use enlarge_core::machine::{
    plan_position_update, PositionUpdate, ZoomFlags, ZoomMachine, ZoomPhase,
};

const NATURAL: Size = Size::new(1000.0, 500.0);

fn machine() -> ZoomMachine {
    ZoomMachine::new(EnlargerConfig::default(), "enlarged.jpg")
}

/// Drive a fresh machine to Open with the scenario layout.
fn open_machine(layout: &FakeLayout) -> ZoomMachine {
    let mut m = machine();
    m.set_zoomed(true, layout);
    m.clone_loaded(NATURAL, layout).unwrap();
    assert_eq!(m.phase(), ZoomPhase::Open);
    m
}

fn clone_targets(effects: &[Effect]) -> Vec<AnimationTarget> {
    effects.iter().filter_map(|e| e.as_clone().copied()).collect()
}

// ---------------------------------------------------------------------------
// Entering
// ---------------------------------------------------------------------------

#[test]
fn test_first_zoom_mounts_clone_and_waits_for_load() {
    let layout = FakeLayout::scenario();
    let mut m = machine();

    let effects = m.set_zoomed(true, &layout);

    assert_eq!(m.phase(), ZoomPhase::Entering);
    assert!(!m.phase().is_closed());
    assert!(m.has_requested_zoom());
    assert_eq!(m.clone_size(), None);
    assert!(effects.contains(&Effect::MountClone {
        source: "enlarged.jpg".into()
    }));
    assert!(effects.contains(&Effect::SubscribeResize));
    assert!(effects.contains(&Effect::ScrollLock(true)));
    assert!(clone_targets(&effects).is_empty(), "clone must stay invisible until loaded");
}

#[test]
fn test_load_completion_runs_enter_sequence() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    m.set_zoomed(true, &layout);

    let effects = m.clone_loaded(NATURAL, &layout).unwrap();
    assert_eq!(m.phase(), ZoomPhase::Open);
    assert_eq!(m.clone_size(), Some(NATURAL));

    assert!(effects.contains(&Effect::Thumbnail(OpacityTarget::immediate(0.0))));
    assert!(effects.contains(&Effect::Backdrop(OpacityTarget::eased(1.0))));

    let clones = clone_targets(&effects);
    assert_eq!(clones.len(), 2);

    let jump = clones[0];
    assert!(jump.immediate);
    assert_eq!(jump.opacity, Some(1.0));
    let start = jump.transform.unwrap();
    assert_abs_diff_eq!(start.scale, 0.125, epsilon = 1e-5);
    assert_abs_diff_eq!(start.translate_x, -340.0, epsilon = 1e-3);
    assert_abs_diff_eq!(start.translate_y, -265.0, epsilon = 1e-3);
    let target = jump.bounding_box.unwrap();
    assert_abs_diff_eq!(target.x, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(target.y, 100.0, epsilon = 1e-3);
    assert_abs_diff_eq!(target.w, 800.0, epsilon = 1e-3);
    assert_abs_diff_eq!(target.h, 400.0, epsilon = 1e-3);

    let grow = clones[1];
    assert!(!grow.immediate);
    assert_eq!(grow.transform, Some(Transform::IDENTITY));
    assert_eq!(m.clone_box(), Some(target));
}

#[test]
fn test_enter_sequence_orders_jump_before_ease() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    m.set_zoomed(true, &layout);
    let effects = m.clone_loaded(NATURAL, &layout).unwrap();

    let thumb_idx = effects
        .iter()
        .position(|e| matches!(e, Effect::Thumbnail(_)))
        .unwrap();
    let ease_idx = effects
        .iter()
        .position(|e| matches!(e, Effect::Clone(t) if !t.immediate))
        .unwrap();
    assert!(thumb_idx < ease_idx);
}

#[test]
fn test_second_zoom_request_is_idempotent() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    assert!(m.set_zoomed(true, &layout).is_empty());
    assert!(m.clone_loaded(NATURAL, &layout).unwrap().is_empty());
    assert_eq!(m.phase(), ZoomPhase::Open);
}

#[test]
fn test_recompute_without_changes_is_noop() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    let before = m.clone_box();
    assert!(m.recompute(&layout, false).is_empty());
    assert_eq!(m.clone_box(), before);
    assert_eq!(m.phase(), ZoomPhase::Open);
}

#[test]
fn test_clone_mounted_only_once() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    let mut all = Vec::new();
    all.extend(m.set_zoomed(true, &layout));
    all.extend(m.clone_loaded(NATURAL, &layout).unwrap());
    for _ in 0..3 {
        all.extend(m.set_zoomed(false, &layout));
        all.extend(m.animation_rest(RestAction::FinishExit));
        all.extend(m.set_zoomed(true, &layout));
    }
    assert_eq!(count(&all, |e| matches!(e, Effect::MountClone { .. })), 1);
    assert!(m.has_requested_zoom());
}

#[test]
fn test_reopen_after_load_enters_immediately() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.set_zoomed(false, &layout);
    m.animation_rest(RestAction::FinishExit);
    assert_eq!(m.phase(), ZoomPhase::Closed);

    let effects = m.set_zoomed(true, &layout);
    assert_eq!(m.phase(), ZoomPhase::Open);
    assert_eq!(clone_targets(&effects).len(), 2);
}

#[test]
fn test_zero_sized_asset_is_rejected() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    m.set_zoomed(true, &layout);
    assert!(m.clone_loaded(Size::new(0.0, 0.0), &layout).is_err());
    assert_eq!(m.phase(), ZoomPhase::Entering);
    assert!(!m.flags().clone_loaded);
}

#[test]
fn test_headless_viewport_stays_entering() {
    let layout = FakeLayout {
        viewport: Viewport::HEADLESS,
        ..FakeLayout::scenario()
    };
    let mut m = machine();
    m.set_zoomed(true, &layout);
    let effects = m.clone_loaded(NATURAL, &layout).unwrap();
    assert!(clone_targets(&effects).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Entering);
}

#[test]
fn test_unmeasured_thumbnail_is_noop() {
    let layout = FakeLayout {
        thumbnail: None,
        ..FakeLayout::scenario()
    };
    let mut m = machine();
    m.set_zoomed(true, &layout);
    let effects = m.clone_loaded(NATURAL, &layout).unwrap();
    assert!(clone_targets(&effects).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Entering);
}

#[test]
fn test_load_before_mount_is_ignored() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    assert!(m.clone_loaded(NATURAL, &layout).unwrap().is_empty());
    assert!(!m.flags().clone_loaded);
}

// ---------------------------------------------------------------------------
// Exiting
// ---------------------------------------------------------------------------

#[test]
fn test_close_animates_back_and_finishes_on_rest() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);

    let effects = m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Exiting);
    assert!(m.is_animating());
    assert!(m.is_scroll_locked(), "scroll stays locked while the exit animates");
    assert!(effects.contains(&Effect::UnsubscribeResize));
    assert!(effects.contains(&Effect::Backdrop(OpacityTarget::eased(0.0))));
    assert!(!effects.contains(&Effect::ScrollLock(false)));

    let shrink = clone_targets(&effects)[0];
    assert!(!shrink.immediate);
    assert_eq!(shrink.on_rest, Some(RestAction::FinishExit));
    assert_abs_diff_eq!(shrink.transform.unwrap().scale, 0.125, epsilon = 1e-5);

    let effects = m.animation_rest(RestAction::FinishExit);
    assert!(m.phase().is_closed());
    assert!(!m.is_animating());
    assert!(effects.contains(&Effect::Thumbnail(OpacityTarget::immediate(1.0))));
    assert!(effects.contains(&Effect::Clone(AnimationTarget::immediate().opacity(0.0))));
    assert!(effects.contains(&Effect::ScrollLock(false)));
}

#[test]
fn test_stale_rest_is_ignored() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    assert!(m.animation_rest(RestAction::FinishExit).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Open);
}

#[test]
fn test_close_while_entering_returns_to_closed() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    m.set_zoomed(true, &layout);

    let effects = m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Closed);
    assert!(effects.contains(&Effect::UnsubscribeResize));
    assert!(effects.contains(&Effect::ScrollLock(false)));
    assert!(clone_targets(&effects).is_empty());
}

#[test]
fn test_load_after_cancelled_zoom_does_not_enter() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    m.set_zoomed(true, &layout);
    m.set_zoomed(false, &layout);

    let effects = m.clone_loaded(NATURAL, &layout).unwrap();
    assert!(clone_targets(&effects).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Closed);

    m.set_zoomed(true, &layout);
    assert_eq!(m.phase(), ZoomPhase::Open);
}

#[test]
fn test_rezoom_while_exiting_restarts_enter() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Exiting);

    let effects = m.set_zoomed(true, &layout);
    assert_eq!(m.phase(), ZoomPhase::Open);
    assert!(!m.is_animating());
    assert!(m.is_scroll_locked());
    let clones = clone_targets(&effects);
    assert_eq!(clones.len(), 2);
    assert!(clones.iter().all(|c| c.on_rest.is_none()));
}

#[test]
fn test_rezoom_while_exiting_without_geometry_restores_thumbnail() {
    let mut layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Exiting);

    layout.viewport = Viewport::HEADLESS;
    let effects = m.set_zoomed(true, &layout);
    assert_eq!(m.phase(), ZoomPhase::Entering);
    assert!(!m.is_animating());
    assert!(effects.contains(&Effect::Thumbnail(OpacityTarget::immediate(1.0))));
    let clones = clone_targets(&effects);
    assert_eq!(clones.len(), 1);
    assert_eq!(clones[0].opacity, Some(0.0));
    assert!(clones[0].immediate);
    assert!(clones[0].on_rest.is_none());

    // The cancelled shrink no longer completes the exit.
    assert!(m.animation_rest(RestAction::FinishExit).is_empty());

    layout.viewport = Viewport::new(800.0, 600.0);
    let effects = m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Closed);
    assert!(effects.contains(&Effect::ScrollLock(false)));
}

// ---------------------------------------------------------------------------
// Dragging
// ---------------------------------------------------------------------------

#[test]
fn test_drag_rejected_unless_open() {
    let layout = FakeLayout::scenario();
    let mut m = machine();
    assert!(!m.should_claim_drag());
    assert!(m.drag_move(0.0, 100.0).is_empty());

    m.set_zoomed(true, &layout);
    assert_eq!(m.phase(), ZoomPhase::Entering);
    assert!(!m.should_claim_drag());
    assert!(m.drag_move(0.0, 100.0).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Entering);
}

#[test]
fn test_drag_rejected_while_exiting() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.set_zoomed(false, &layout);
    assert!(!m.should_claim_drag());
    assert!(m.drag_move(0.0, 50.0).is_empty());
    assert_eq!(m.phase(), ZoomPhase::Exiting);
}

#[test]
fn test_drag_move_is_immediate() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);

    let effects = m.drag_move(50.0, 200.0);
    assert_eq!(m.phase(), ZoomPhase::Dragging);

    let live = clone_targets(&effects)[0];
    assert!(live.immediate);
    let t = live.transform.unwrap();
    assert_abs_diff_eq!(t.scale, 0.7, epsilon = 1e-5);
    assert_abs_diff_eq!(t.translate_x, 40.0, epsilon = 1e-4);
    // clone box height is 400: diff = 0.3 * 400 / 2 = 60
    assert_abs_diff_eq!(t.translate_y, 140.0, epsilon = 1e-3);

    let backdrop = effects
        .iter()
        .find_map(|e| match e {
            Effect::Backdrop(b) => Some(*b),
            _ => None,
        })
        .unwrap();
    assert!(backdrop.immediate);
    assert_abs_diff_eq!(backdrop.opacity, 0.7, epsilon = 1e-5);
}

#[test]
fn test_release_past_threshold_requests_close() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.drag_move(0.0, 21.0);
    let effects = m.drag_release(0.0, 21.0);
    assert_eq!(effects, vec![Effect::RequestClose]);

    // Consumer honours the request.
    m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Exiting);
}

#[test]
fn test_release_within_threshold_snaps_back() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.drag_move(5.0, 20.0);
    let effects = m.drag_release(5.0, 20.0);

    assert_eq!(m.phase(), ZoomPhase::Open);
    assert!(!effects.contains(&Effect::RequestClose));
    assert!(effects.contains(&Effect::Clone(
        AnimationTarget::eased().transform(Transform::IDENTITY)
    )));
    assert!(effects.contains(&Effect::Backdrop(OpacityTarget::eased(1.0))));
}

#[test]
fn test_terminate_matches_release() {
    let layout = FakeLayout::scenario();

    let mut a = open_machine(&layout);
    a.drag_move(0.0, -80.0);
    let released = a.drag_release(0.0, -80.0);

    let mut b = open_machine(&layout);
    b.drag_move(0.0, -80.0);
    let terminated = b.drag_terminate(0.0, -80.0);

    assert_eq!(released, terminated);
}

#[test]
fn test_close_during_drag_exits() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.drag_move(0.0, 120.0);
    m.set_zoomed(false, &layout);
    assert_eq!(m.phase(), ZoomPhase::Exiting);
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_repositions_immediately() {
    let mut layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);

    layout.viewport = Viewport::new(1000.0, 1000.0);
    let effects = m.viewport_resized(&layout);

    let clones = clone_targets(&effects);
    assert_eq!(clones.len(), 1);
    assert!(clones[0].immediate);
    assert_eq!(clones[0].transform, Some(Transform::IDENTITY));
    let b = clones[0].bounding_box.unwrap();
    assert_abs_diff_eq!(b.x, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(b.y, 250.0, epsilon = 1e-3);
    assert_abs_diff_eq!(b.w, 1000.0, epsilon = 1e-3);
    assert_abs_diff_eq!(b.h, 500.0, epsilon = 1e-3);
    assert_eq!(m.phase(), ZoomPhase::Open);
}

#[test]
fn test_resize_ignored_while_dragging() {
    let mut layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.drag_move(0.0, 60.0);
    layout.viewport = Viewport::new(1000.0, 1000.0);
    assert!(m.viewport_resized(&layout).is_empty());
}

#[test]
fn test_resize_ignored_after_close() {
    let mut layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    m.set_zoomed(false, &layout);
    m.animation_rest(RestAction::FinishExit);
    assert!(!m.is_resize_subscribed());

    layout.viewport = Viewport::new(1000.0, 1000.0);
    assert!(m.viewport_resized(&layout).is_empty());
}

#[test]
fn test_exit_after_resize_aligns_with_current_box() {
    let mut layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    layout.viewport = Viewport::new(1000.0, 1000.0);
    m.viewport_resized(&layout);

    let effects = m.set_zoomed(false, &layout);
    let t = clone_targets(&effects)[0].transform.unwrap();
    assert_abs_diff_eq!(t.scale, 0.1, epsilon = 1e-5);
    assert_abs_diff_eq!(t.translate_x, -440.0, epsilon = 1e-3);
    assert_abs_diff_eq!(t.translate_y, -465.0, epsilon = 1e-3);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_teardown_releases_resources() {
    let layout = FakeLayout::scenario();
    let mut m = open_machine(&layout);
    let effects = m.teardown();
    assert!(effects.contains(&Effect::UnsubscribeResize));
    assert!(effects.contains(&Effect::ScrollLock(false)));
    assert!(!m.is_resize_subscribed());
    assert!(m.teardown().is_empty());
}

#[test]
fn test_view_state_tracks_flags() {
    let layout = FakeLayout::scenario();
    let mut m = machine();

    let v = m.view_state(true);
    assert!(!v.render_overlay);
    assert!(!v.overlay_interactive);

    m.set_zoomed(true, &layout);
    let v = m.view_state(true);
    assert!(v.render_overlay);
    assert!(v.overlay_interactive);
    assert!(!v.overlay_aria_hidden);
    assert!(v.show_loading_indicator);
    assert!(!m.view_state(false).show_loading_indicator);

    m.clone_loaded(NATURAL, &layout).unwrap();
    assert!(!m.view_state(true).show_loading_indicator);

    m.set_zoomed(false, &layout);
    let v = m.view_state(true);
    assert!(v.render_overlay, "clone stays mounted");
    assert!(!v.overlay_interactive);
    assert!(v.overlay_aria_hidden);
}

// ---------------------------------------------------------------------------
// plan_position_update
// ---------------------------------------------------------------------------

fn flags(zoomed: bool, clone_loaded: bool) -> ZoomFlags {
    ZoomFlags {
        zoomed,
        clone_loaded,
    }
}

#[test]
fn test_plan_rising_zoom() {
    assert_eq!(
        plan_position_update(flags(false, true), flags(true, true), false),
        PositionUpdate::ZoomIn
    );
}

#[test]
fn test_plan_load_edge_while_zoomed() {
    assert_eq!(
        plan_position_update(flags(true, false), flags(true, true), false),
        PositionUpdate::ZoomIn
    );
}

#[test]
fn test_plan_load_edge_while_closed_is_unchanged() {
    assert_eq!(
        plan_position_update(flags(false, false), flags(false, true), false),
        PositionUpdate::Unchanged
    );
}

#[test]
fn test_plan_falling_zoom() {
    assert_eq!(
        plan_position_update(flags(true, true), flags(false, true), false),
        PositionUpdate::ZoomOut
    );
}

#[test]
fn test_plan_immediate_without_edges_repositions() {
    assert_eq!(
        plan_position_update(flags(true, true), flags(true, true), true),
        PositionUpdate::Reposition
    );
    assert_eq!(
        plan_position_update(flags(true, true), flags(true, true), false),
        PositionUpdate::Unchanged
    );
}
