use image::GenericImageView;
use std::fs;
use std::path::Path;

use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Decoded image data
// ---------------------------------------------------------------------------

pub struct LoadedImage {
    pub rgba_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub format_name: String,
}

/// Decode an image file into straight RGBA8. Synchronous: decoding happens
/// on the UI thread between events.
pub fn load_image(path: &Path) -> Result<LoadedImage, ViewerError> {
    let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let img = image::open(path).map_err(|source| ViewerError::ImageLoadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let format_name = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_uppercase();

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    log::debug!(
        "loaded {} ({}x{}, {} KB)",
        path.display(),
        width,
        height,
        file_size / 1024
    );

    Ok(LoadedImage {
        rgba_bytes: rgba.into_raw(),
        width,
        height,
        file_size,
        format_name,
    })
}
