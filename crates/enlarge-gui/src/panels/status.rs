use crate::app::EnlargeApp;

pub fn show(ctx: &egui::Context, app: &mut EnlargeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let Some(widget) = app.widget.as_ref() else {
                ui.label("No image");
                return;
            };
            let machine = widget.machine();
            ui.label(format!("Phase: {}", machine.phase()));
            ui.separator();
            if let Some(size) = machine.clone_size() {
                ui.label(format!("Enlarged: {}x{}", size.width, size.height));
                ui.separator();
            }
            if let Some([w, h]) = app.viewport.thumbnail_size {
                ui.label(format!("Thumbnail: {w}x{h}"));
                ui.separator();
            }
            ui.label(format!(
                "Scroll lock: {}",
                if widget.is_scroll_locked() { "on" } else { "off" }
            ));
        });

        ui.add_space(2.0);
    });
}
