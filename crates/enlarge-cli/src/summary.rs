use console::Style;
use enlarge_core::drag::{DragConfig, DragFrame, ReleaseDecision};
use enlarge_core::geometry::{Rect, Size, Viewport};
use enlarge_core::machine::Placement;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    dismiss: Style,
    snap: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            dismiss: Style::new().yellow(),
            snap: Style::new().green(),
        }
    }
}

fn fmt_rect(r: &Rect) -> String {
    format!("x={:.2} y={:.2} w={:.2} h={:.2}", r.x, r.y, r.w, r.h)
}

pub fn print_placement(placement: &Placement, natural: Size, viewport: Viewport, padding: f32) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Enlarge Target"));
    println!();

    println!("  {}", s.header.apply_to("Input"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Thumbnail"),
        s.value.apply_to(fmt_rect(&placement.thumbnail))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Natural"),
        s.value.apply_to(format!("{}x{}", natural.width, natural.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Padding"),
        s.value.apply_to(padding)
    );
    println!();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Target"),
        s.value.apply_to(fmt_rect(&placement.target))
    );
    let alignment = if placement.alignment.is_identity() {
        "identity (thumbnail already at target)".to_string()
    } else {
        placement.alignment.to_string()
    };
    println!(
        "    {:<12}{}",
        s.label.apply_to("Alignment"),
        s.value.apply_to(alignment)
    );
    if placement.target.is_degenerate() {
        println!(
            "    {}",
            s.dismiss.apply_to("target is empty, positioning would be skipped")
        );
    }
    println!();
}

pub fn print_drag_header(config: &DragConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Drag Mapping"));
    println!(
        "  {} {}  {} {}  {} {}  {} {}",
        s.label.apply_to("distance"),
        s.value.apply_to(config.scale_distance),
        s.label.apply_to("min scale"),
        s.value.apply_to(config.min_scale),
        s.label.apply_to("damping"),
        s.value.apply_to(config.horizontal_damping),
        s.label.apply_to("threshold"),
        s.value.apply_to(config.dismiss_threshold),
    );
    println!();
    println!(
        "  {}",
        s.header.apply_to(format!(
            "{:>8}  {:>7}  {:>9}  {:>9}  {:>8}  release",
            "dy", "scale", "tx", "ty", "backdrop"
        ))
    );
}

pub fn print_drag_row(dy: f32, frame: &DragFrame, decision: ReleaseDecision) {
    let s = Styles::new();
    let t = &frame.transform;
    let release = match decision {
        ReleaseDecision::Dismiss => s.dismiss.apply_to("dismiss"),
        ReleaseDecision::SnapBack => s.snap.apply_to("snap back"),
    };
    println!(
        "  {:>8.1}  {:>7.4}  {:>9.2}  {:>9.2}  {:>8.3}  {}",
        dy, t.scale, t.translate_x, t.translate_y, frame.backdrop_opacity, release
    );
}
