use std::path::PathBuf;

use enlarge_core::asset::DecodedAsset;
use enlarge_core::config::EnlargerConfig;

/// Which slot a decoded asset fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetSlot {
    Thumbnail,
    Clone,
}

/// Commands sent from UI thread to loader thread.
pub enum LoaderCommand {
    /// Decode an image file into the given slot.
    Load { slot: AssetSlot, path: PathBuf },
}

/// Results sent from loader thread (and file dialogs) back to UI thread.
pub enum LoaderResult {
    /// A file was picked from the Open dialog.
    Picked { slot: AssetSlot, path: PathBuf },
    Loaded {
        slot: AssetSlot,
        path: PathBuf,
        asset: DecodedAsset,
    },
    ConfigImported {
        config: EnlargerConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
