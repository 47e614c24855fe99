use std::path::PathBuf;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub thumbnail_path: Option<PathBuf>,
    pub enlarged_path: Option<PathBuf>,

    /// Consumer-owned zoom flag handed to the widget.
    pub zoomed: bool,

    /// Show the spinner while the enlarged asset loads.
    pub loading_indicator: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
