use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user. Neither kind is fatal: a failed load leaves
/// the viewer open, a failed listing just makes navigation unavailable.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("could not load {}: {source}", path.display())]
    ImageLoadFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not read directory {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
