use crate::app::EnlargeApp;
use crate::convert::to_egui_rect;

/// Backdrop and clone, painted above everything once a zoom has been requested.
pub fn show(ctx: &egui::Context, app: &mut EnlargeApp) {
    let clone_texture = app.viewport.clone.as_ref().map(|t| t.id());
    let Some(widget) = app.widget.as_mut() else {
        return;
    };
    let view = widget.view_state();
    if !view.render_overlay {
        return;
    }

    let screen = ctx.screen_rect();
    let response = egui::Area::new(egui::Id::new("enlarge_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .interactable(view.overlay_interactive)
        .show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(screen.size(), egui::Sense::click_and_drag());
            let painter = ui.painter();

            let [r, g, b, a] = widget
                .props
                .overlay_color
                .with_opacity(widget.scene.backdrop.value());
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(r, g, b, a));

            let frame = widget.scene.clone.current();
            if let Some(texture_id) = clone_texture {
                if frame.opacity > 0.0 {
                    painter.image(
                        texture_id,
                        to_egui_rect(frame.visual_rect()),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE.gamma_multiply(frame.opacity),
                    );
                }
            }

            if view.show_loading_indicator {
                ui.put(
                    egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0)),
                    egui::Spinner::new(),
                );
            }

            if view.overlay_interactive && widget.machine().should_claim_drag() {
                ctx.set_cursor_icon(egui::CursorIcon::Grab);
            }

            response
        })
        .inner;

    if !view.overlay_interactive {
        widget.cancel_drag();
        return;
    }

    widget.handle_drag(&response);
    if response.clicked() {
        app.set_zoomed(false);
    }
}
