use enlarge_core::machine::ZoomPhase;
use enlarge_core::presentation::{EnlargerProps, OverlayColor, ViewState};

#[test]
fn test_parse_rgba() {
    let c: OverlayColor = "rgba(255, 255, 255, 0.8)".parse().unwrap();
    assert_eq!((c.r, c.g, c.b), (255, 255, 255));
    assert!((c.a - 0.8).abs() < 1e-6);
}

#[test]
fn test_parse_rgb_is_opaque() {
    let c: OverlayColor = "rgb(10,20,30)".parse().unwrap();
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
    assert_eq!(c.a, 1.0);
}

#[test]
fn test_parse_hex() {
    let c: OverlayColor = "#102030".parse().unwrap();
    assert_eq!((c.r, c.g, c.b, c.a), (0x10, 0x20, 0x30, 1.0));

    let c: OverlayColor = "#000000ff".parse().unwrap();
    assert_eq!(c.a, 1.0);
}

#[test]
fn test_parse_rejects_garbage() {
    for bad in [
        "",
        "white",
        "#12345",
        "#gg0000",
        "rgba(1,2,3)",
        "rgb(1,2,3,0.5)",
        "rgba(256,0,0,1)",
        "rgba(0,0,0,1.5)",
        "rgb(0,0,0",
        "#ééé",
    ] {
        assert!(bad.parse::<OverlayColor>().is_err(), "accepted {bad:?}");
    }
}

#[test]
fn test_display_roundtrip() {
    let c: OverlayColor = "rgba(1,2,3,0.25)".parse().unwrap();
    assert_eq!(c.to_string(), "rgba(1,2,3,0.25)");
    assert_eq!(c.to_string().parse::<OverlayColor>().unwrap(), c);
}

#[test]
fn test_with_opacity_scales_alpha() {
    let c = OverlayColor::default();
    assert_eq!(c.with_opacity(1.0), [255, 255, 255, 204]);
    assert_eq!(c.with_opacity(0.0), [255, 255, 255, 0]);
    assert_eq!(c.with_opacity(2.0), [255, 255, 255, 204]);
}

#[test]
fn test_clone_source_prefers_enlarged() {
    let props = EnlargerProps::new("thumb.jpg");
    assert_eq!(props.clone_source(), "thumb.jpg");

    let props = props.with_enlarged_src("full.jpg");
    assert_eq!(props.clone_source(), "full.jpg");
    assert_eq!(props.src, "thumb.jpg");
}

#[test]
fn test_view_state_loading_needs_indicator() {
    let v = ViewState::derive(ZoomPhase::Entering, true, false, true, false);
    assert!(!v.show_loading_indicator);
    let v = ViewState::derive(ZoomPhase::Entering, true, false, true, true);
    assert!(v.show_loading_indicator);
    let v = ViewState::derive(ZoomPhase::Open, true, true, true, true);
    assert!(!v.show_loading_indicator);
}
