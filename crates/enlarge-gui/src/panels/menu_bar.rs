use enlarge_core::config::EnlargerConfig;

use crate::app::EnlargeApp;
use crate::messages::{AssetSlot, LoaderResult};

pub fn show(ctx: &egui::Context, app: &mut EnlargeApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app, AssetSlot::Thumbnail);
                }

                let enabled = app.ui_state.thumbnail_path.is_some();
                if ui.add_enabled(enabled, egui::Button::new("Open Enlarged Image...")).clicked() {
                    ui.close();
                    open_file(app, AssetSlot::Clone);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let label = if app.ui_state.zoomed { "Close Zoom" } else { "Zoom" };
                if ui.add_enabled(app.widget.is_some(), egui::Button::new(label)).clicked() {
                    ui.close();
                    let zoomed = !app.ui_state.zoomed;
                    app.set_zoomed(zoomed);
                }

                if ui.checkbox(&mut app.ui_state.loading_indicator, "Loading Indicator").changed() {
                    if let Some(widget) = app.widget.as_mut() {
                        widget.props.has_loading_indicator = app.ui_state.loading_indicator;
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app, AssetSlot::Thumbnail);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &mut EnlargeApp, slot: AssetSlot) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(LoaderResult::Picked { slot, path });
        }
    });
}

fn import_config(app: &mut EnlargeApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<EnlargerConfig>(&content).map_err(|e| e.to_string()));
        let _ = match result {
            Ok(config) => result_tx.send(LoaderResult::ConfigImported { config }),
            Err(e) => result_tx.send(LoaderResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            }),
        };
    });
}

fn export_config(app: &mut EnlargeApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("enlarge.toml")
            .save_file()
        {
            let written = toml::to_string_pretty(&config)
                .map_err(|e| e.to_string())
                .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
            let message = match written {
                Ok(()) => format!("Config saved to {}", path.display()),
                Err(e) => format!("Failed to save config: {e}"),
            };
            let _ = result_tx.send(LoaderResult::Log { message });
        }
    });
}
