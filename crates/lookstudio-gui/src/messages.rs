use std::path::PathBuf;
use std::time::Duration;

use lookstudio_core::config::{ServiceConfig, StudioConfig};
use lookstudio_core::controller::{EditJob, EditOutcome};
use lookstudio_core::data_uri::DataUri;
use lookstudio_core::intake::ImageFile;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read an image file from disk.
    LoadImage { path: PathBuf },

    /// Run one edit request against the remote service.
    Edit { job: EditJob },

    /// Decode and write the edited image.
    SaveImage { path: PathBuf, image: DataUri },

    /// Read a studio config file.
    ImportConfig { path: PathBuf },

    /// Rebuild the service client with new settings.
    Configure { service: ServiceConfig },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        path: PathBuf,
        file: ImageFile,
    },

    /// The edit request finished, successfully or not.
    EditSettled {
        outcome: EditOutcome,
        elapsed: Duration,
    },

    ImageSaved {
        path: PathBuf,
    },
    ConfigImported {
        path: PathBuf,
        config: Box<StudioConfig>,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
