use std::path::Path;
use std::sync::mpsc;

use enlarge_core::asset::DecodedAsset;
use enlarge_core::config::EnlargerConfig;
use enlarge_core::presentation::EnlargerProps;

use crate::convert::asset_to_color_image;
use crate::messages::{AssetSlot, LoaderCommand, LoaderResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::widget::ZoomWidget;
use crate::worker;

pub struct EnlargeApp {
    pub cmd_tx: mpsc::Sender<LoaderCommand>,
    pub result_tx: mpsc::Sender<LoaderResult>,
    pub result_rx: mpsc::Receiver<LoaderResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: EnlargerConfig,
    pub widget: Option<ZoomWidget>,
    pub show_about: bool,
}

impl EnlargeApp {
    pub fn new(ctx: &egui::Context) -> anyhow::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config: EnlargerConfig::default(),
            widget: None,
            show_about: false,
        })
    }

    /// Drain all pending results from the loader and dialogs.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                LoaderResult::Picked { slot, path } => self.on_picked(slot, &path),
                LoaderResult::Loaded { slot, path, asset } => {
                    self.on_loaded(ctx, slot, &path, &asset)
                }
                LoaderResult::ConfigImported { config } => match config.validate() {
                    Ok(()) => {
                        self.config = config;
                        self.ui_state.add_log("Config imported".into());
                        self.rebuild_widget();
                    }
                    Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
                },
                LoaderResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                LoaderResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn on_picked(&mut self, slot: AssetSlot, path: &Path) {
        match slot {
            AssetSlot::Thumbnail => {
                self.ui_state.thumbnail_path = Some(path.to_path_buf());
                self.viewport.thumbnail = None;
                self.viewport.thumbnail_size = None;
            }
            AssetSlot::Clone => self.ui_state.enlarged_path = Some(path.to_path_buf()),
        }
        self.ui_state.add_log(format!("Opened: {}", path.display()));
        if slot == AssetSlot::Thumbnail {
            self.send_command(LoaderCommand::Load {
                slot,
                path: path.to_path_buf(),
            });
        }
        self.rebuild_widget();
    }

    fn on_loaded(
        &mut self,
        ctx: &egui::Context,
        slot: AssetSlot,
        path: &Path,
        asset: &DecodedAsset,
    ) {
        let image = asset_to_color_image(asset);
        match slot {
            AssetSlot::Thumbnail => {
                self.viewport.thumbnail_size = Some(image.size);
                self.viewport.thumbnail =
                    Some(ctx.load_texture("thumbnail", image, egui::TextureOptions::LINEAR));
            }
            AssetSlot::Clone => {
                // A result for a source the current widget no longer shows.
                let Some(widget) = self.widget.as_mut() else {
                    return;
                };
                if Path::new(widget.props.clone_source()) != path {
                    return;
                }
                self.viewport.clone =
                    Some(ctx.load_texture("clone", image, egui::TextureOptions::LINEAR));
                if let Err(e) = widget.clone_loaded(asset.natural_size()) {
                    self.ui_state.add_log(format!("ERROR: {e}"));
                }
            }
        }
    }

    /// Replace the widget after its sources or config changed.
    pub fn rebuild_widget(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.teardown();
        }
        self.ui_state.zoomed = false;
        self.viewport.clone = None;

        let Some(ref thumb) = self.ui_state.thumbnail_path else {
            self.widget = None;
            return;
        };
        let mut props = EnlargerProps::new(thumb.to_string_lossy());
        if let Some(ref enlarged) = self.ui_state.enlarged_path {
            props = props.with_enlarged_src(enlarged.to_string_lossy());
        }
        props.overlay_color = self.config.overlay_color;
        props.has_loading_indicator = self.ui_state.loading_indicator;
        if let Some(name) = thumb.file_name() {
            props
                .thumbnail_attributes
                .insert("alt".into(), name.to_string_lossy().into_owned());
        }

        self.widget = Some(ZoomWidget::new(self.config.clone(), props));
    }

    /// Push the consumer-owned zoom flag into the widget.
    pub fn set_zoomed(&mut self, zoomed: bool) {
        self.ui_state.zoomed = zoomed;
        if let Some(widget) = self.widget.as_mut() {
            widget.set_zoomed(zoomed);
        }
    }

    /// Start loading the clone once the widget mounts it, and honour close requests.
    fn service_widget(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        if let Some(source) = widget.take_pending_mount() {
            let _ = self.cmd_tx.send(LoaderCommand::Load {
                slot: AssetSlot::Clone,
                path: source.into(),
            });
        }
        if widget.take_close_request() {
            self.set_zoomed(false);
        }
    }

    pub fn send_command(&self, cmd: LoaderCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for EnlargeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::overlay::show(ctx, self);

        self.service_widget();

        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        if let Some(widget) = self.widget.as_mut() {
            if widget.tick(dt) {
                ctx.request_repaint();
            }
        }

        // About dialog
        if self.show_about {
            egui::Window::new("About Enlarge")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Enlarge");
                        ui.label("Click-to-zoom image widget");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
