use enlarge_core::geometry::Viewport;

use crate::app::EnlargeApp;
use crate::convert::to_core_rect;

const MAX_THUMBNAIL_WIDTH: f32 = 320.0;

/// The page hosting the thumbnail. Scrolls unless the widget holds the scroll lock.
pub fn show(ctx: &egui::Context, app: &mut EnlargeApp) {
    let screen = ctx.screen_rect();
    if let Some(widget) = app.widget.as_mut() {
        widget.observe_viewport(Viewport::new(screen.width(), screen.height()));
    }

    let scroll_locked = app.widget.as_ref().is_some_and(|w| w.is_scroll_locked());
    let mut clicked = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        let texture = app.viewport.thumbnail.as_ref().map(|t| (t.id(), t.size_vec2()));
        let Some((texture_id, natural)) = texture else {
            show_placeholder(ui);
            return;
        };

        egui::ScrollArea::vertical()
            .enable_scrolling(!scroll_locked)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(24.0);
                ui.heading("Enlarge");
                ui.label("Click the image to enlarge it. Drag it up or down to dismiss.");
                ui.add_space(16.0);

                let size = thumbnail_display_size(natural);
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

                let opacity = app.widget.as_ref().map_or(1.0, |w| w.scene.thumbnail.value());
                ui.painter().image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE.gamma_multiply(opacity),
                );

                if let Some(widget) = app.widget.as_mut() {
                    widget.observe_thumbnail(Some(to_core_rect(rect)));
                    let response = match widget.props.thumbnail_attributes.get("alt") {
                        Some(alt) => response.on_hover_text(alt.as_str()),
                        None => response,
                    };
                    clicked = response.clicked();
                }

                ui.add_space(16.0);
                for _ in 0..40 {
                    ui.label(
                        egui::RichText::new("Page content below the thumbnail.")
                            .color(egui::Color32::from_gray(110)),
                    );
                }
            });
    });

    if clicked && !app.ui_state.zoomed {
        app.set_zoomed(true);
    }
}

fn thumbnail_display_size(natural: egui::Vec2) -> egui::Vec2 {
    if natural.x <= MAX_THUMBNAIL_WIDTH {
        natural
    } else {
        natural * (MAX_THUMBNAIL_WIDTH / natural.x)
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
